//! Hailcast import pipeline
//!
//! Everything between the host UI and the filesystem mirror of audio
//! commands: locating the import root, validating it, copying a source tree
//! into it, choosing that source, obtaining storage access, and resolving
//! files for playback.
//!
//! The import root layout is `<root>/<Language>/<track>.{mp3|wav}` with
//! tracks 1 to 65. Only English must be complete; any other language falls
//! back to English at playback time.

pub mod error;
pub mod importer;
pub mod integrity;
mod listing;
pub mod paths;
pub mod permission;
pub mod picker;
pub mod progress;
pub mod resolver;
pub mod session;
pub mod setup;
pub mod validator;

pub use error::{LibraryError, LibraryResult};
pub use importer::{
    drive, FileImporter, ImportGuard, ImportLock, ImportOutcome, ImportPlan, LanguageSource,
};
pub use integrity::{directory_size, verify_file_integrity};
pub use paths::{PathResolver, StorageRoots, AUDIO_DIR_NAME};
pub use permission::{
    PermissionBackend, PermissionGate, PermissionPrompt, RuntimePermission, SettingsGuide,
    StorageStrategy, ALL_FILES_GUIDE, MEDIA_AUDIO_PROMPT, STORAGE_PROMPT,
};
pub use picker::{normalize_content_uri, DirectoryPicker, FolderChooser, PickOutcome};
pub use progress::{ImportStatus, ProgressSnapshot, ProgressTracker};
pub use resolver::{PlaybackResolver, TrackEntry};
pub use session::{PlayerSession, Transport, TransportError, TransportOptions, TransportState};
pub use setup::{Alert, SetupFlow, SetupState};
pub use validator::{create_audio_directory, DirectoryValidator};

use hailcast_config::Config;
use std::time::Duration;

/// Import root for `resolver`, honoring `library.audio_root` from config
pub fn audio_root(resolver: PathResolver, config: &Config) -> std::path::PathBuf {
    resolver
        .with_override(config.library.audio_root.clone())
        .default_audio_directory()
}

impl From<&Config> for TransportOptions {
    fn from(config: &Config) -> Self {
        Self {
            progress_interval: Duration::from_secs(config.playback.progress_interval_secs),
            repeat: config.playback.repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hailcast_core::Platform;
    use std::path::PathBuf;

    #[test]
    fn test_config_override_sets_root() {
        let mut config = Config::default();
        let resolver = PathResolver::new(
            Platform::Desktop,
            StorageRoots::single("/home/u/.local/share/hailcast"),
        );
        assert_eq!(
            audio_root(resolver.clone(), &config),
            PathBuf::from("/home/u/.local/share/hailcast/Audio")
        );

        config.library.audio_root = Some(PathBuf::from("/srv/Audio"));
        assert_eq!(audio_root(resolver, &config), PathBuf::from("/srv/Audio"));
    }

    #[test]
    fn test_transport_options_from_config() {
        let mut config = Config::default();
        config.playback.progress_interval_secs = 5;
        config.playback.repeat = true;

        let options = TransportOptions::from(&config);
        assert_eq!(options.progress_interval, Duration::from_secs(5));
        assert!(options.repeat);
    }
}
