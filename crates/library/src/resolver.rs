//! Audio file lookup for playback

use crate::error::{LibraryError, Result};
use crate::listing::exists;
use hailcast_core::{command_title, AudioExtension, Category, Language, TrackId, TrackNumber};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A track ready to hand to the media transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntry {
    /// `{language}-{category}-{track}`
    pub id: String,
    /// `file://` URL of the resolved file
    pub url: String,
    pub title: String,
    /// Requested language name
    pub artist: String,
    pub category: Category,
    pub track: TrackNumber,
}

impl TrackEntry {
    pub fn new(language: Language, category: Category, track: TrackNumber, path: &Path) -> Self {
        Self {
            id: TrackId::new(language.name(), category, track).to_string(),
            url: format!("file://{}", path.display()),
            title: command_title(track).to_string(),
            artist: language.name().to_string(),
            category,
            track,
        }
    }
}

/// Resolves track files under the import root, falling back to English
#[derive(Debug, Clone)]
pub struct PlaybackResolver {
    root: PathBuf,
}

impl PlaybackResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{language}/{n}.{ext}`
    pub fn track_path(&self, language: Language, track: TrackNumber, ext: AudioExtension) -> PathBuf {
        self.root.join(language.name()).join(ext.file_name(track))
    }

    /// Lookup order for a track
    ///
    /// Requested language in its preferred extension, then swapped; then
    /// English the same way. The preferred extension is `.mp3` for English
    /// and `.wav` for everything else.
    pub fn candidates(&self, language: Language, track: TrackNumber) -> [PathBuf; 4] {
        let preferred = AudioExtension::preferred_for(language);
        let english = AudioExtension::preferred_for(Language::ENGLISH);
        [
            self.track_path(language, track, preferred),
            self.track_path(language, track, preferred.swapped()),
            self.track_path(Language::ENGLISH, track, english),
            self.track_path(Language::ENGLISH, track, english.swapped()),
        ]
    }

    /// First existing candidate, or `NotFound` naming the English path
    pub async fn resolve_path(&self, language: Language, track: TrackNumber) -> Result<PathBuf> {
        let candidates = self.candidates(language, track);

        for (i, candidate) in candidates.iter().enumerate() {
            if exists(candidate).await {
                if i >= 2 && !language.is_english() {
                    debug!(
                        "Audio file not found for {}, falling back to English",
                        language
                    );
                }
                return Ok(candidate.clone());
            }
        }

        let [_, _, english, _] = candidates;
        warn!("Audio file not found for English fallback: {}", english.display());
        Err(LibraryError::NotFound { path: english })
    }

    /// Playlist for a category in one language
    ///
    /// Only the preferred extension of the requested language is considered;
    /// tracks without that file are left out.
    pub async fn load_category(&self, language: Language, category: Category) -> Vec<TrackEntry> {
        let mut tracks = Vec::new();

        for track in category.tracks() {
            let path = self.track_path(language, track, AudioExtension::preferred_for(language));
            if !exists(&path).await {
                warn!("Audio file not found: {}", path.display());
                continue;
            }
            tracks.push(TrackEntry::new(language, category, track, &path));
        }

        tracks
    }
}
