//! Host platform identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform the app runs on
///
/// Android carries its API level because storage permissions differ by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "os", rename_all = "lowercase")]
pub enum Platform {
    Android { api_level: u32 },
    Ios,
    Desktop,
}

impl Platform {
    /// First API level with the media-audio runtime permission (Android 13)
    pub const MEDIA_AUDIO_API_LEVEL: u32 = 33;

    /// First API level with the all-files-access setting (Android 11)
    pub const ALL_FILES_API_LEVEL: u32 = 30;

    pub fn is_android(&self) -> bool {
        matches!(self, Self::Android { .. })
    }

    /// Platform of the running binary
    ///
    /// Android hosts must supply their API level through [`Platform::Android`]
    /// directly; this only distinguishes iOS from everything else.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Desktop
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android { api_level } => write!(f, "android (API {})", api_level),
            Self::Ios => write!(f, "ios"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}
