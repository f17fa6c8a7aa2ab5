//! Summary figures for an import root

use crate::error::Result;
use hailcast_core::{is_audio_file_name, DirectoryMatch, Language, LanguageCatalog};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio file count for each recognized language directory under `root`
///
/// Languages without a directory are absent from the map. Errors propagate.
pub async fn verify_file_integrity(root: &Path) -> Result<BTreeMap<Language, usize>> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || count_audio_files(&root)).await?
}

fn count_audio_files(root: &Path) -> Result<BTreeMap<Language, usize>> {
    let mut counts = BTreeMap::new();

    let dirs = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in dirs {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let language = match LanguageCatalog::classify(&name) {
            DirectoryMatch::Recognized(language) => language,
            DirectoryMatch::Unrecognized(name) => {
                info!("Skipping unknown language directory: {}", name);
                continue;
            }
        };

        let mut count = 0;
        for file in WalkDir::new(entry.path()).min_depth(1).max_depth(1) {
            let file = file?;
            if file.file_type().is_file() && is_audio_file_name(&file.file_name().to_string_lossy())
            {
                count += 1;
            }
        }
        counts.insert(language, count);
    }

    Ok(counts)
}

/// Total size in bytes of the files under `path`
///
/// An absent path or any error reading the tree yields 0.
pub async fn directory_size(path: &Path) -> u64 {
    let path: PathBuf = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || sum_file_sizes(&path)).await;

    match result {
        Ok(Ok(total)) => total,
        Ok(Err(e)) => {
            warn!("Error getting directory size: {}", e);
            0
        }
        Err(e) => {
            warn!("Directory size task failed: {}", e);
            0
        }
    }
}

fn sum_file_sizes(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Ok(0);
    }

    let mut total = 0;
    for entry in WalkDir::new(path).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}
