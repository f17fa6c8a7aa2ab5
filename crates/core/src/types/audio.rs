//! Recognized audio file types

use crate::types::{Language, TrackNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of audio files a complete language directory holds
pub const REQUIRED_FILES_COUNT: usize = 65;

/// Audio container accepted by the import pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioExtension {
    Mp3,
    Wav,
}

impl AudioExtension {
    pub const ALL: [AudioExtension; 2] = [Self::Mp3, Self::Wav];

    /// Extension without the leading dot
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    /// The other recognized extension
    pub fn swapped(&self) -> Self {
        match self {
            Self::Mp3 => Self::Wav,
            Self::Wav => Self::Mp3,
        }
    }

    /// Source encoding assumed for a language: MP3 for English, WAV otherwise
    pub fn preferred_for(language: Language) -> Self {
        if language.is_english() {
            Self::Mp3
        } else {
            Self::Wav
        }
    }

    /// File name for a track, e.g. `12.wav`
    pub fn file_name(&self, track: TrackNumber) -> String {
        format!("{}.{}", track, self.as_str())
    }

    /// Extension of a file name, matched case-sensitively
    pub fn of_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".mp3") {
            Some(Self::Mp3)
        } else if name.ends_with(".wav") {
            Some(Self::Wav)
        } else {
            None
        }
    }
}

impl fmt::Display for AudioExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if a file name ends in `.mp3` or `.wav`
///
/// The stem is not checked; `notes.mp3` counts as audio.
pub fn is_audio_file_name(name: &str) -> bool {
    AudioExtension::of_file_name(name).is_some()
}
