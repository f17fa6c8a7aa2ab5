//! Hailcast core domain
//!
//! Pure types shared by the import pipeline, the playback resolver and the
//! platform bridges. Nothing in this crate touches the filesystem.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, RecoveryAction, Result, USER_CANCELLED_MESSAGE};
pub use types::{
    command_title, commands_for, is_audio_file_name, AudioExtension, Category, Command,
    DirectoryMatch, ImportProgress, Language, LanguageCatalog, LanguageStatus, Platform, TrackId,
    TrackNumber, ValidationReport, ALL_LANGUAGES, COMMANDS, ENGLISH_REQUIRED_ERROR,
    REQUIRED_FILES_COUNT, TOTAL_TRACKS,
};
