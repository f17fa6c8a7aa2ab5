//! Configuration manager - main API for config operations

use crate::persistence::ConfigFile;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use hailcast_core::LanguageCatalog;
use std::path::PathBuf;

const ENV_LOG_LEVEL: &str = "HAILCAST_APP_LOG_LEVEL";
const ENV_AUDIO_ROOT: &str = "HAILCAST_LIBRARY_AUDIO_ROOT";
const ENV_DEFAULT_LANGUAGE: &str = "HAILCAST_PLAYBACK_DEFAULT_LANGUAGE";

/// Loads, saves and resets the config file
pub struct ConfigManager {
    file: ConfigFile,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/hailcast/`
    /// - macOS: `~/Library/Application Support/hailcast/`
    /// - Windows: `%APPDATA%\hailcast\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        let file = ConfigFile::new(config_path);

        Ok(Self {
            file,
            config_dir,
        })
    }

    /// Returns the default config directory based on the platform
    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "hailcast")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::NoConfigDir {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.file.read()
    }

    /// Loads the configuration, falling back to defaults on any error
    ///
    /// This is a convenience method that never returns an error.
    /// Errors are logged but the function always returns a valid config.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration to file
    ///
    /// This performs validation before saving and uses atomic writes
    /// to prevent corruption.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.file.write(config)
    }

    /// Updates the configuration using a closure
    ///
    /// This loads the current config, applies the update function,
    /// and saves the result atomically.
    ///
    /// ```rust,no_run
    /// # use hailcast_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.playback.default_language = "Hindi".to_string();
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Generates a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.file.write_default()?;
        Ok(true)
    }

    /// Resets the configuration to defaults
    ///
    /// This overwrites the existing config file with default values.
    pub fn reset(&self) -> ConfigResult<()> {
        let default_config = Config::default();
        self.save(&default_config)
    }

    /// Validates the current configuration file
    ///
    /// Returns all validation errors found, or Ok if valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config and applies `HAILCAST_*` environment overrides
    ///
    /// Recognized variables:
    /// - `HAILCAST_APP_LOG_LEVEL`
    /// - `HAILCAST_LIBRARY_AUDIO_ROOT`
    /// - `HAILCAST_PLAYBACK_DEFAULT_LANGUAGE`
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }
}

/// Applies overrides read through `lookup` onto `config`
pub(crate) fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.app.log_level =
            level
                .parse::<LogLevel>()
                .map_err(|_| ConfigError::EnvOverride {
                    variable: ENV_LOG_LEVEL.to_string(),
                    value: level.clone(),
                })?;
        log::debug!("{} override applied", ENV_LOG_LEVEL);
    }

    if let Some(root) = lookup(ENV_AUDIO_ROOT) {
        if root.trim().is_empty() {
            return Err(ConfigError::EnvOverride {
                variable: ENV_AUDIO_ROOT.to_string(),
                value: root,
            });
        }
        config.library.audio_root = Some(PathBuf::from(root));
        log::debug!("{} override applied", ENV_AUDIO_ROOT);
    }

    if let Some(language) = lookup(ENV_DEFAULT_LANGUAGE) {
        let resolved = LanguageCatalog::resolve(&language).ok_or_else(|| {
            ConfigError::EnvOverride {
                variable: ENV_DEFAULT_LANGUAGE.to_string(),
                value: language.clone(),
            }
        })?;
        config.playback.default_language = resolved.name().to_string();
        log::debug!("{} override applied", ENV_DEFAULT_LANGUAGE);
    }

    Ok(())
}
