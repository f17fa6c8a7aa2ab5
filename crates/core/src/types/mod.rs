//! Domain types for Hailcast
//!
//! - `language`: canonical language registry and directory-name matching
//! - `category`: command categories and track numbering
//! - `audio`: recognized audio file extensions
//! - `commands`: fixed command texts for every track
//! - `report`: directory validation results
//! - `progress`: import progress snapshots
//! - `platform`: host platform identity

mod audio;
mod category;
mod commands;
mod language;
mod platform;
mod progress;
mod report;

// Re-export all public types
pub use audio::{is_audio_file_name, AudioExtension, REQUIRED_FILES_COUNT};
pub use category::{Category, TrackId, TrackNumber, TOTAL_TRACKS};
pub use commands::{command_title, commands_for, Command, COMMANDS};
pub use language::{DirectoryMatch, Language, LanguageCatalog, ALL_LANGUAGES};
pub use platform::Platform;
pub use progress::ImportProgress;
pub use report::{LanguageStatus, ValidationReport, ENGLISH_REQUIRED_ERROR};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_and_tracks_agree() {
        assert_eq!(REQUIRED_FILES_COUNT as u32, TOTAL_TRACKS);
        assert_eq!(COMMANDS.len(), REQUIRED_FILES_COUNT);
    }

    #[test]
    fn test_every_track_has_a_category() {
        for n in TrackNumber::all() {
            let category = Category::for_track(n);
            assert!(category.tracks().any(|t| t == n));
        }
    }
}
