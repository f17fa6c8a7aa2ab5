//! Completeness checks for the import root

use crate::error::Result;
use crate::listing::{ensure_dir, exists, list_dir};
use hailcast_core::{
    is_audio_file_name, AudioExtension, DirectoryMatch, Language, LanguageCatalog,
    LanguageStatus, TrackNumber, ValidationReport, ENGLISH_REQUIRED_ERROR, REQUIRED_FILES_COUNT,
};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::Path;

/// Validates the language directories under an import root
pub struct DirectoryValidator;

impl DirectoryValidator {
    /// Builds a [`ValidationReport`] for `root`
    ///
    /// Never fails: a missing root or a traversal error is reported through
    /// `errors` with `is_valid == false`.
    pub async fn validate(root: &Path) -> ValidationReport {
        info!("Validating directory: {}", root.display());

        if !exists(root).await {
            return ValidationReport::missing_root(root);
        }

        match Self::inspect(root).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Error validating directory {}: {}", root.display(), e);
                ValidationReport::failed(e.to_string())
            }
        }
    }

    async fn inspect(root: &Path) -> Result<ValidationReport> {
        let mut report = ValidationReport::with_all_languages();

        for entry in list_dir(root).await? {
            if !entry.is_dir {
                continue;
            }

            let language = match LanguageCatalog::classify(&entry.name) {
                DirectoryMatch::Recognized(language) => language,
                DirectoryMatch::Unrecognized(name) => {
                    info!("Unknown language directory: {}", name);
                    report.unrecognized_directories.push(name);
                    continue;
                }
            };

            let files = list_dir(&entry.path).await?;
            let audio_files: HashSet<&str> = files
                .iter()
                .filter(|f| f.is_file && is_audio_file_name(&f.name))
                .map(|f| f.name.as_str())
                .collect();

            debug!(
                "{} has {} audio file(s) of {} entries",
                language,
                audio_files.len(),
                files.len()
            );

            let (status, missing) = Self::assess(&audio_files);
            if status == LanguageStatus::Incomplete {
                info!(
                    "{} has {} files instead of {}",
                    language,
                    audio_files.len(),
                    REQUIRED_FILES_COUNT
                );
            }
            report.language_status.insert(language, status);
            report.missing_files.insert(language, missing);
        }

        for language in LanguageCatalog::all() {
            report.language_status.entry(language).or_insert_with(|| {
                debug!("{} directory not found, will use English as fallback", language);
                LanguageStatus::Fallback
            });
        }

        report.is_valid = report.status(Language::ENGLISH) == Some(LanguageStatus::Complete);
        if !report.is_valid {
            report.errors.push(ENGLISH_REQUIRED_ERROR.to_string());
        }

        Ok(report)
    }

    /// Status and missing track names for one language directory
    ///
    /// Only the file count decides completeness; the missing list names every
    /// track with neither extension present, always spelled `{n}.mp3`.
    fn assess(audio_files: &HashSet<&str>) -> (LanguageStatus, Vec<String>) {
        if audio_files.len() == REQUIRED_FILES_COUNT {
            return (LanguageStatus::Complete, Vec::new());
        }

        let missing = TrackNumber::all()
            .filter(|track| {
                AudioExtension::ALL
                    .iter()
                    .all(|ext| !audio_files.contains(ext.file_name(*track).as_str()))
            })
            .map(|track| AudioExtension::Mp3.file_name(track))
            .collect();

        (LanguageStatus::Incomplete, missing)
    }
}

/// Creates the import root if it is absent
///
/// Returns false instead of failing; the cause is logged.
pub async fn create_audio_directory(path: &Path) -> bool {
    match ensure_dir(path).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Error creating audio directory {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fill(dir: &Path, tracks: impl Iterator<Item = u32>, ext: &str) {
        fs::create_dir_all(dir).expect("create language dir");
        for n in tracks {
            fs::write(dir.join(format!("{}.{}", n, ext)), b"audio").expect("write track");
        }
    }

    #[tokio::test]
    async fn test_missing_root() {
        let report = DirectoryValidator::validate(Path::new("/definitely/not/here/Audio")).await;
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec!["Directory does not exist: /definitely/not/here/Audio".to_string()]
        );
        assert!(report.language_status.is_empty());
    }

    #[tokio::test]
    async fn test_assess_counts_only() {
        let names: Vec<String> = (1..=64).map(|n| format!("{}.wav", n)).collect();
        let mut set: HashSet<&str> = names.iter().map(String::as_str).collect();

        let (status, missing) = DirectoryValidator::assess(&set);
        assert_eq!(status, LanguageStatus::Incomplete);
        assert_eq!(missing, vec!["65.mp3".to_string()]);

        // 65 audio names that do not cover track 65 still count as complete
        set.insert("bonus.mp3");
        let (status, missing) = DirectoryValidator::assess(&set);
        assert_eq!(status, LanguageStatus::Complete);
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_empty_root_is_invalid() -> Result<()> {
        let temp = TempDir::new()?;
        let report = DirectoryValidator::validate(temp.path()).await;

        assert!(!report.is_valid);
        assert_eq!(report.errors, vec![ENGLISH_REQUIRED_ERROR.to_string()]);
        assert!(report
            .language_status
            .values()
            .all(|s| *s == LanguageStatus::Fallback));
        Ok(())
    }

    #[tokio::test]
    async fn test_case_insensitive_directory_names() -> Result<()> {
        let temp = TempDir::new()?;
        fill(&temp.path().join(" english "), 1..=65, "mp3");

        let report = DirectoryValidator::validate(temp.path()).await;
        assert!(report.is_valid);
        assert_eq!(report.status(Language::ENGLISH), Some(LanguageStatus::Complete));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_audio_directory() -> Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path().join("Audio");

        assert!(create_audio_directory(&root).await);
        assert!(create_audio_directory(&root).await);
        assert!(!create_audio_directory(&temp.path().join("a").join("b")).await);
        Ok(())
    }
}
