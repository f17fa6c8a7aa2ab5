//! Integration tests for DirectoryValidator

use hailcast_core::{Language, LanguageCatalog, LanguageStatus, ENGLISH_REQUIRED_ERROR};
use hailcast_library::{DirectoryValidator, LibraryError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

type Result<T> = std::result::Result<T, LibraryError>;

fn write_tracks(dir: &Path, tracks: impl IntoIterator<Item = u32>, ext: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    for n in tracks {
        fs::write(dir.join(format!("{}.{}", n, ext)), b"FAKE_AUDIO_DATA")?;
    }
    Ok(())
}

fn language(name: &str) -> Language {
    LanguageCatalog::resolve(name).expect("supported language")
}

#[tokio::test]
async fn test_valid_iff_english_complete() -> Result<()> {
    let cases: &[&[&str]] = &[
        &["English"],
        &["English", "French", "Hindi"],
        &["French"],
        &["Spanish", "Tamil"],
        &[],
    ];

    for languages in cases {
        let temp = TempDir::new()?;
        for name in languages.iter() {
            let ext = if *name == "English" { "mp3" } else { "wav" };
            write_tracks(&temp.path().join(name), 1..=65, ext)?;
        }

        let report = DirectoryValidator::validate(temp.path()).await;
        let has_english = languages.contains(&"English");
        assert_eq!(report.is_valid, has_english, "languages: {:?}", languages);

        for name in languages.iter() {
            assert_eq!(report.status(language(name)), Some(LanguageStatus::Complete));
        }
        assert_eq!(report.language_status.len(), 33);
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_root_never_fails() {
    let report = DirectoryValidator::validate(Path::new("/no/such/place/Audio")).await;
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("/no/such/place/Audio"));
    assert!(report.missing_files.is_empty());
    assert!(report.language_status.is_empty());
}

#[tokio::test]
async fn test_incomplete_english_lists_missing_as_mp3() -> Result<()> {
    let temp = TempDir::new()?;
    let english = temp.path().join("English");
    write_tracks(&english, (1..=65).filter(|n| *n != 7 && *n != 40), "wav")?;

    let report = DirectoryValidator::validate(temp.path()).await;

    assert!(!report.is_valid);
    assert_eq!(report.errors, vec![ENGLISH_REQUIRED_ERROR.to_string()]);
    assert_eq!(report.status(Language::ENGLISH), Some(LanguageStatus::Incomplete));
    assert_eq!(
        report.missing_for(Language::ENGLISH),
        ["7.mp3".to_string(), "40.mp3".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_mixed_extensions_complete() -> Result<()> {
    let temp = TempDir::new()?;
    let english = temp.path().join("English");
    write_tracks(&english, 1..=30, "mp3")?;
    write_tracks(&english, 31..=65, "wav")?;

    let report = DirectoryValidator::validate(temp.path()).await;
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_both_extensions_for_a_track_overcounts() -> Result<()> {
    let temp = TempDir::new()?;
    let english = temp.path().join("English");
    write_tracks(&english, 1..=65, "mp3")?;
    write_tracks(&english, [12], "wav")?;

    let report = DirectoryValidator::validate(temp.path()).await;
    assert!(!report.is_valid);
    assert_eq!(report.status(Language::ENGLISH), Some(LanguageStatus::Incomplete));
    assert!(report.missing_for(Language::ENGLISH).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_non_audio_and_uppercase_extensions_are_ignored() -> Result<()> {
    let temp = TempDir::new()?;
    let english = temp.path().join("English");
    write_tracks(&english, 1..=64, "mp3")?;
    fs::write(english.join("65.MP3"), b"x")?;
    fs::write(english.join("readme.txt"), b"x")?;
    fs::create_dir(english.join("66.mp3"))?;

    let report = DirectoryValidator::validate(temp.path()).await;
    assert_eq!(report.status(Language::ENGLISH), Some(LanguageStatus::Incomplete));
    assert_eq!(report.missing_for(Language::ENGLISH), ["65.mp3".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_directories_are_reported_not_errors() -> Result<()> {
    let temp = TempDir::new()?;
    write_tracks(&temp.path().join("English"), 1..=65, "mp3")?;
    write_tracks(&temp.path().join("Klingon"), 1..=65, "wav")?;
    fs::write(temp.path().join("stray.mp3"), b"x")?;

    let report = DirectoryValidator::validate(temp.path()).await;
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert_eq!(report.unrecognized_directories, vec!["Klingon".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_absent_languages_fall_back() -> Result<()> {
    let temp = TempDir::new()?;
    write_tracks(&temp.path().join("English"), 1..=65, "mp3")?;
    write_tracks(&temp.path().join("dutch"), 1..=10, "wav")?;

    let report = DirectoryValidator::validate(temp.path()).await;
    assert_eq!(report.status(language("Dutch")), Some(LanguageStatus::Incomplete));
    assert_eq!(report.missing_for(language("Dutch")).len(), 55);
    assert_eq!(report.status(language("Urdu")), Some(LanguageStatus::Fallback));
    assert_eq!(report.incomplete_languages(), vec![language("Dutch")]);
    assert_eq!(report.complete_languages(), vec![Language::ENGLISH]);
    Ok(())
}
