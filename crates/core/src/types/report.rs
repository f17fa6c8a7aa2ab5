//! Directory validation results

use crate::types::{Language, LanguageCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Error recorded whenever English is absent or incomplete
pub const ENGLISH_REQUIRED_ERROR: &str = "English audio files are required and must be complete";

/// Completeness of one language under the import root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageStatus {
    /// Directory holds exactly the required number of audio files
    Complete,
    /// Directory exists with the wrong number of audio files
    Incomplete,
    /// No directory; playback falls back to English
    Fallback,
}

impl fmt::Display for LanguageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Incomplete => write!(f, "incomplete"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Structured result of validating an import root
///
/// `is_valid` holds exactly when English is `Complete`; no other language
/// affects validity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Missing track names per language, always spelled `{n}.mp3`
    pub missing_files: BTreeMap<Language, Vec<String>>,
    pub language_status: BTreeMap<Language, LanguageStatus>,
    /// Subdirectories whose names matched no language
    #[serde(default)]
    pub unrecognized_directories: Vec<String>,
}

impl ValidationReport {
    /// Report for a root that does not exist
    pub fn missing_root(path: &Path) -> Self {
        Self::failed(format!("Directory does not exist: {}", path.display()))
    }

    /// Report for a traversal that failed part-way; all maps are empty
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Empty report with a missing-file list for every language
    pub fn with_all_languages() -> Self {
        Self {
            missing_files: LanguageCatalog::all().map(|l| (l, Vec::new())).collect(),
            ..Default::default()
        }
    }

    /// Status of a language, if it was evaluated
    pub fn status(&self, language: Language) -> Option<LanguageStatus> {
        self.language_status.get(&language).copied()
    }

    /// Languages whose directory is complete
    pub fn complete_languages(&self) -> Vec<Language> {
        self.languages_with(LanguageStatus::Complete)
    }

    /// Languages with a directory but missing files
    pub fn incomplete_languages(&self) -> Vec<Language> {
        self.languages_with(LanguageStatus::Incomplete)
    }

    fn languages_with(&self, status: LanguageStatus) -> Vec<Language> {
        self.language_status
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(l, _)| *l)
            .collect()
    }

    /// Missing file names for a language
    pub fn missing_for(&self, language: Language) -> &[String] {
        self.missing_files
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
