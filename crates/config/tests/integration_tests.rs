//! Integration tests for the configuration system

use hailcast_config::{
    AppConfig, Config, ConfigManager, ConfigSection, LibraryConfig, LogLevel, PlaybackConfig,
    CONFIG_VERSION,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let created = manager.initialize()?;
    assert!(created);

    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    let mut modified = config.clone();
    modified.library.audio_root = Some(PathBuf::from("/storage/emulated/0/Audio"));
    modified.playback.default_language = "Tamil".to_string();
    manager.save(&modified)?;

    let reloaded = manager.load()?;
    assert_eq!(
        reloaded.library.audio_root,
        Some(PathBuf::from("/storage/emulated/0/Audio"))
    );
    assert_eq!(reloaded.playback.default_language, "Tamil");

    manager.reset()?;
    let after_reset = manager.load()?;
    assert_eq!(after_reset, Config::default());

    Ok(())
}

#[test]
fn test_config_validation_integration() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    manager.save(&Config::default())?;

    let errors = manager.validate()?;
    assert!(errors.is_empty());

    let mut invalid = Config::default();
    invalid.playback.default_language = "Latin".to_string();
    let result = manager.save(&invalid);
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_atomic_save_keeps_backup() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let config = Config::default();
    manager.save(&config)?;
    assert!(manager.config_path().exists());

    manager.save(&config)?;

    let backup_path = manager.config_path().with_extension("toml.backup");
    assert!(backup_path.exists());

    Ok(())
}

#[test]
fn test_all_sections_default_are_valid() {
    assert!(AppConfig::default().validate().is_ok());
    assert!(LibraryConfig::default().validate().is_ok());
    assert!(PlaybackConfig::default().validate().is_ok());

    assert_eq!(AppConfig::default().section_name(), "app");
    assert_eq!(LibraryConfig::default().section_name(), "library");
    assert_eq!(PlaybackConfig::default().section_name(), "playback");
}

#[test]
fn test_graceful_degradation_on_load_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    std::fs::write(manager.config_path(), "[library\naudio_root = ")?;

    assert!(manager.load().is_err());
    assert_eq!(manager.load_or_default(), Config::default());

    Ok(())
}

#[test]
fn test_partial_file_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    std::fs::write(
        manager.config_path(),
        "[app]\nlog_level = \"trace\"\n\n[playback]\nrepeat = true\n",
    )?;

    let config = manager.load()?;
    assert_eq!(config.app.log_level, LogLevel::Trace);
    assert!(config.playback.repeat);
    assert_eq!(config.playback.default_language, "English");
    assert!(config.library.audio_root.is_none());
    assert_eq!(config.version, CONFIG_VERSION);

    Ok(())
}

#[test]
fn test_serialization_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.library.audio_root = Some(PathBuf::from("/data/Audio"));
    config.app.debug_mode = true;

    let text = toml::to_string_pretty(&config)?;
    let parsed: Config = toml::from_str(&text)?;
    assert_eq!(parsed, config);

    Ok(())
}

#[test]
fn test_multiple_validation_errors_collected() {
    let mut config = Config::default();
    config.app.max_missing_listed = 0;
    config.library.audio_root = Some(PathBuf::new());
    config.playback.progress_interval_secs = 600;

    let errors = config.validate().unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "app.max_missing_listed",
            "library.audio_root",
            "playback.progress_interval_secs"
        ]
    );
}
