//! Supported languages and directory-name matching

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical names of every supported language, in catalog order
pub const ALL_LANGUAGES: [&str; 33] = [
    "Arabic",
    "Bahasa",
    "Bengali",
    "Burmese",
    "Chinese",
    "Dari",
    "Dutch",
    "English",
    "French",
    "German",
    "Gujarati",
    "Hebrew",
    "Hindi",
    "Italian",
    "Japanese",
    "Kannada",
    "Korean",
    "Malayalam",
    "Marathi",
    "Oriya",
    "Persian",
    "Polish",
    "Portuguese",
    "Russian",
    "Sinhala",
    "Somali",
    "Spanish",
    "Swahili",
    "Tamil",
    "Telugu",
    "Thai",
    "Urdu",
    "Vietnamese",
];

/// A supported language, identified by its canonical name
///
/// Values can only be obtained from [`LanguageCatalog`], so every `Language`
/// is a member of the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(&'static str);

impl Language {
    /// The language every other language falls back to
    pub const ENGLISH: Language = Language("English");

    /// Canonical name, in its authoritative casing
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Returns true for English
    pub fn is_english(&self) -> bool {
        *self == Self::ENGLISH
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        LanguageCatalog::resolve(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown language: {}", name)))
    }
}

/// Outcome of matching a directory name against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryMatch {
    /// Name resolved to a supported language
    Recognized(Language),
    /// Name matched nothing; callers skip the directory
    Unrecognized(String),
}

impl DirectoryMatch {
    /// Returns the language if the directory was recognized
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::Recognized(language) => Some(*language),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Static registry of supported languages
pub struct LanguageCatalog;

impl LanguageCatalog {
    /// Iterates every supported language in catalog order
    pub fn all() -> impl Iterator<Item = Language> {
        ALL_LANGUAGES.iter().map(|name| Language(name))
    }

    /// Number of supported languages
    pub fn len() -> usize {
        ALL_LANGUAGES.len()
    }

    /// Lookup key for a name: trimmed and lowercased
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Resolves a name to its canonical language
    ///
    /// Matching is exact after normalization; there is no partial matching.
    pub fn resolve(name: &str) -> Option<Language> {
        let key = Self::normalize(name);
        ALL_LANGUAGES
            .iter()
            .find(|canonical| canonical.to_lowercase() == key)
            .map(|canonical| Language(canonical))
    }

    /// Classifies a directory name
    pub fn classify(dir_name: &str) -> DirectoryMatch {
        match Self::resolve(dir_name) {
            Some(language) => DirectoryMatch::Recognized(language),
            None => DirectoryMatch::Unrecognized(dir_name.to_string()),
        }
    }
}
