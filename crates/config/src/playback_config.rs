//! Playback configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Playback preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Language selected when the app starts
    pub default_language: String,

    /// Replay the current command when it ends
    pub repeat: bool,

    /// Interval between transport progress events, in seconds
    pub progress_interval_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_language: "English".to_string(),
            repeat: false,
            progress_interval_secs: 1,
        }
    }
}

impl ConfigSection for PlaybackConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::supported_language(&self.default_language, "playback.default_language"),
            Validator::in_range(
                self.progress_interval_secs,
                1,
                60,
                "playback.progress_interval_secs",
            ),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.default_language = other.default_language;
        self.repeat = other.repeat;
        self.progress_interval_secs = other.progress_interval_secs;
    }

    fn section_name(&self) -> &'static str {
        "playback"
    }
}
