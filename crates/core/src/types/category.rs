//! Command categories and track numbering

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Number of command tracks per language
pub const TOTAL_TRACKS: u32 = 65;

/// Track number in `1..=65`, shared across languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TrackNumber(u32);

impl TrackNumber {
    /// Creates a track number, rejecting values outside `1..=65`
    pub fn new(value: u32) -> Result<Self, AppError> {
        if (1..=TOTAL_TRACKS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidTrack { track: value })
        }
    }

    /// Every track, in order
    pub fn all() -> impl Iterator<Item = TrackNumber> {
        (1..=TOTAL_TRACKS).map(TrackNumber)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TrackNumber {
    type Error = AppError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrackNumber> for u32 {
    fn from(track: TrackNumber) -> Self {
        track.0
    }
}

impl fmt::Display for TrackNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command category, each owning a contiguous range of tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Introduction,
    Caution,
    Warning,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Self::Introduction, Self::Caution, Self::Warning];

    /// Inclusive track range owned by this category
    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            Self::Introduction => 1..=30,
            Self::Caution => 31..=49,
            Self::Warning => 50..=65,
        }
    }

    /// Tracks belonging to this category, in order
    pub fn tracks(&self) -> impl Iterator<Item = TrackNumber> {
        self.range().map(TrackNumber)
    }

    /// Category owning a track
    pub fn for_track(track: TrackNumber) -> Category {
        Self::ALL
            .into_iter()
            .find(|c| c.range().contains(&track.get()))
            .unwrap_or(Self::Warning)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::Caution => "Caution",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Case-insensitive; accepts the upper-case labels shown on screen
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "introduction" => Ok(Self::Introduction),
            "caution" => Ok(Self::Caution),
            "warning" => Ok(Self::Warning),
            _ => Err(AppError::InvalidArgument {
                argument: "category".to_string(),
                reason: format!("unknown category '{}'", s),
            }),
        }
    }
}

/// Identifier of a queued track: `{language}-{category}-{number}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(language: &str, category: Category, track: TrackNumber) -> Self {
        Self(format!("{}-{}-{}", language, category, track))
    }

    /// Extracts the track number from a track id or a bare number
    pub fn parse_track(id: &str) -> Result<TrackNumber, AppError> {
        let invalid = || AppError::InvalidArgument {
            argument: "track_id".to_string(),
            reason: "Invalid track ID format".to_string(),
        };

        let raw = if id.contains('-') {
            id.split('-').nth(2).ok_or_else(invalid)?
        } else {
            id
        };

        let value: u32 = raw.trim().parse().map_err(|_| invalid())?;
        TrackNumber::new(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_number_bounds() {
        assert!(TrackNumber::new(0).is_err());
        assert!(TrackNumber::new(1).is_ok());
        assert!(TrackNumber::new(65).is_ok());
        assert!(matches!(
            TrackNumber::new(66),
            Err(AppError::InvalidTrack { track: 66 })
        ));
    }

    #[test]
    fn test_category_ranges_are_disjoint_and_cover_all_tracks() {
        let total: usize = Category::ALL.iter().map(|c| c.tracks().count()).sum();
        assert_eq!(total, TOTAL_TRACKS as usize);

        assert_eq!(Category::Introduction.range(), 1..=30);
        assert_eq!(Category::Caution.range(), 31..=49);
        assert_eq!(Category::Warning.range(), 50..=65);
    }

    #[test]
    fn test_for_track() -> Result<(), AppError> {
        assert_eq!(Category::for_track(TrackNumber::new(30)?), Category::Introduction);
        assert_eq!(Category::for_track(TrackNumber::new(31)?), Category::Caution);
        assert_eq!(Category::for_track(TrackNumber::new(50)?), Category::Warning);
        Ok(())
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("WARNING".parse::<Category>().ok(), Some(Category::Warning));
        assert_eq!(" caution ".parse::<Category>().ok(), Some(Category::Caution));
        assert!("alert".parse::<Category>().is_err());
    }

    #[test]
    fn test_track_id_round_trip() -> Result<(), AppError> {
        let id = TrackId::new("French", Category::Caution, TrackNumber::new(42)?);
        assert_eq!(id.as_str(), "French-Caution-42");
        assert_eq!(TrackId::parse_track(id.as_str())?.get(), 42);
        Ok(())
    }

    #[test]
    fn test_parse_bare_number() -> Result<(), AppError> {
        assert_eq!(TrackId::parse_track("7")?.get(), 7);
        Ok(())
    }

    #[test]
    fn test_parse_invalid_track_id() {
        assert!(TrackId::parse_track("French-Caution").is_err());
        assert!(TrackId::parse_track("abc").is_err());
        assert!(TrackId::parse_track("").is_err());
    }

    #[test]
    fn test_track_number_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<TrackNumber>("12").is_ok());
        assert!(serde_json::from_str::<TrackNumber>("99").is_err());
    }
}
