//! Platform import root

use crate::error::{LibraryError, Result};
use directories::ProjectDirs;
use hailcast_core::Platform;
use std::path::{Path, PathBuf};

/// Name of the import root under the platform storage directory
pub const AUDIO_DIR_NAME: &str = "Audio";

/// Storage directories the host exposes to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    /// App-specific external storage (Android)
    pub external_directory: PathBuf,
    /// App document directory (iOS and desktop)
    pub document_directory: PathBuf,
}

impl StorageRoots {
    /// Both roots pointing at the same directory
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            external_directory: dir.clone(),
            document_directory: dir,
        }
    }
}

/// Computes the import root for a platform
#[derive(Debug, Clone)]
pub struct PathResolver {
    platform: Platform,
    roots: StorageRoots,
    override_root: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(platform: Platform, roots: StorageRoots) -> Self {
        Self {
            platform,
            roots,
            override_root: None,
        }
    }

    /// Resolver for the running desktop, rooted in the user data directory
    pub fn for_desktop() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "hailcast").ok_or_else(|| LibraryError::NotFound {
            path: PathBuf::from("<user data directory>"),
        })?;

        Ok(Self::new(
            Platform::current(),
            StorageRoots::single(dirs.data_dir()),
        ))
    }

    /// Replaces the computed root with an explicit directory
    pub fn with_override(mut self, root: Option<PathBuf>) -> Self {
        self.override_root = root;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// `<external dir>/Audio` on Android, `<document dir>/Audio` elsewhere
    pub fn default_audio_directory(&self) -> PathBuf {
        if let Some(root) = &self.override_root {
            return root.clone();
        }

        let base: &Path = if self.platform.is_android() {
            &self.roots.external_directory
        } else {
            &self.roots.document_directory
        };
        base.join(AUDIO_DIR_NAME)
    }
}
