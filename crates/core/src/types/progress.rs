//! Import progress snapshots

use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Progress of one import run
///
/// `progress` is a percentage of the files counted before copying started.
/// Within a run it never decreases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    pub progress: f64,
    pub current_file: Option<String>,
    pub language: Option<Language>,
}

impl ImportProgress {
    /// State at the start of a run
    pub fn initial() -> Self {
        Self::default()
    }

    /// Snapshot after a file was copied
    ///
    /// A zero denominator reports 100 rather than dividing by zero.
    pub fn after_copy(copied: usize, total: usize, file: impl Into<String>, language: Language) -> Self {
        let progress = if total == 0 {
            100.0
        } else {
            copied as f64 / total as f64 * 100.0
        };

        Self {
            progress,
            current_file: Some(file.into()),
            language: Some(language),
        }
    }

    /// Whole-number percentage for status lines
    pub fn percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        let p = ImportProgress::initial();
        assert_eq!(p.progress, 0.0);
        assert!(p.current_file.is_none());
        assert!(p.language.is_none());
        assert!(p.is_initial());
    }

    #[test]
    fn test_after_copy() {
        let p = ImportProgress::after_copy(1, 4, "1.mp3", Language::ENGLISH);
        assert_eq!(p.progress, 25.0);
        assert_eq!(p.current_file.as_deref(), Some("1.mp3"));
        assert_eq!(p.language, Some(Language::ENGLISH));
        assert_eq!(p.percent(), 25);
    }

    #[test]
    fn test_percent_rounds() {
        let p = ImportProgress::after_copy(2, 3, "2.mp3", Language::ENGLISH);
        assert_eq!(p.percent(), 67);
    }
}
