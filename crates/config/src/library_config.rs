//! Import root configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where imported audio lives and how the root is prepared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Overrides the platform default import root (`<data dir>/Audio`)
    pub audio_root: Option<PathBuf>,

    /// Create the import root on startup if it is missing
    pub create_root_on_startup: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            audio_root: None,
            create_root_on_startup: true,
        }
    }
}

impl ConfigSection for LibraryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![Validator::optional_path_not_empty(
            self.audio_root.as_deref(),
            "library.audio_root",
        )])
    }

    fn merge(&mut self, other: Self) {
        if other.audio_root.is_some() {
            self.audio_root = other.audio_root;
        }
        self.create_root_on_startup = other.create_root_on_startup;
    }

    fn section_name(&self) -> &'static str {
        "library"
    }
}
