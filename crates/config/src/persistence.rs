//! Reading and writing `config.toml`
//!
//! Writes go to a temp file beside `config.toml` and are renamed over it, so
//! a crash mid-save never leaves a half-written file. The file being replaced
//! is copied to `config.toml.backup` first.

use crate::{Config, ConfigError, ConfigResult, ValidationError, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One `config.toml` on disk
pub struct ConfigFile {
    path: PathBuf,
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_extension("toml.backup")
    }

    /// Reads the file; a missing file means defaults
    ///
    /// A blank file is an error. Out-of-range values are logged and kept so
    /// the caller can see what the user wrote.
    pub fn read(&self) -> ConfigResult<Config> {
        if !self.path.exists() {
            log::info!("No config at {}, using defaults", self.path.display());
            return Ok(Config::default());
        }

        let read_error = |source| ConfigError::Read {
            path: self.path.clone(),
            source,
        };
        let text = fs::read_to_string(&self.path).map_err(read_error)?;
        if text.trim().is_empty() {
            return Err(read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "config file is blank",
            )));
        }

        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        // One format so far; older files are read as current
        if config.version != CONFIG_VERSION {
            log::warn!(
                "Config version {} differs from {}, reading as current",
                config.version,
                CONFIG_VERSION
            );
            config.version = CONFIG_VERSION;
        }

        if let Err(errors) = config.validate() {
            log::warn!("{}: {}", self.path.display(), describe(&errors));
        }

        Ok(config)
    }

    /// Validates `config` and replaces the file with it
    pub fn write(&self, config: &Config) -> ConfigResult<()> {
        config
            .validate()
            .map_err(|errors| ConfigError::Invalid(describe(&errors)))?;

        let dir = self
            .path
            .parent()
            .ok_or_else(|| ConfigError::NoConfigDir {
                reason: format!("{} has no parent directory", self.path.display()),
            })?;
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("Created config directory {}", dir.display());
        }

        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|source| ConfigError::Backup {
                path: backup.clone(),
                source,
            })?;
            log::debug!("Previous config kept at {}", backup.display());
        }

        let text = toml::to_string_pretty(config)?;
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::Write {
                path: self.path.clone(),
                source: e.error,
            })?;

        log::info!("Config saved to {}", self.path.display());
        Ok(())
    }

    pub fn write_default(&self) -> ConfigResult<()> {
        self.write(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file() -> (TempDir, ConfigFile) {
        let temp_dir = TempDir::new().expect("temp dir");
        let file = ConfigFile::new(temp_dir.path().join("config.toml"));
        (temp_dir, file)
    }

    #[test]
    fn test_missing_file_reads_as_defaults() {
        let (_temp_dir, file) = config_file();
        assert_eq!(file.read().expect("defaults"), Config::default());
    }

    #[test]
    fn test_write_then_read() {
        let (_temp_dir, file) = config_file();

        let mut config = Config::default();
        config.library.audio_root = Some(PathBuf::from("/sdcard/Android/data/hailcast/files/Audio"));
        config.playback.default_language = "Spanish".to_string();

        file.write(&config).expect("write");
        assert_eq!(file.read().expect("read"), config);
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("hailcast").join("config.toml");
        let file = ConfigFile::new(path.clone());

        file.write_default().expect("write");
        assert!(path.is_file());
    }

    #[test]
    fn test_overwrite_keeps_previous_file() {
        let (_temp_dir, file) = config_file();
        file.write_default().expect("first write");

        let mut config = Config::default();
        config.playback.repeat = true;
        file.write(&config).expect("second write");

        let backup = fs::read_to_string(file.backup_path()).expect("backup");
        assert!(backup.contains("repeat = false"));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let (_temp_dir, file) = config_file();
        fs::write(file.path(), "this is not valid TOML {{{").expect("write");
        assert!(matches!(file.read(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unsupported_language_is_not_saved() {
        let (_temp_dir, file) = config_file();

        let mut config = Config::default();
        config.playback.default_language = "Esperanto".to_string();

        assert!(matches!(file.write(&config), Err(ConfigError::Invalid(_))));
        assert!(!file.path().exists());
    }

    #[test]
    fn test_blank_file_is_a_read_error() {
        let (_temp_dir, file) = config_file();
        fs::write(file.path(), "  \n").expect("write");
        assert!(matches!(file.read(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_out_of_range_values_still_read() {
        let (_temp_dir, file) = config_file();
        fs::write(
            file.path(),
            "version = 1\n[playback]\ndefault_language = \"Klingon\"\n",
        )
        .expect("write");

        let config = file.read().expect("read despite warnings");
        assert_eq!(config.playback.default_language, "Klingon");
        assert!(config.library.create_root_on_startup);
    }
}
