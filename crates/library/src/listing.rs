//! Sorted single-level directory listings

use crate::error::{LibraryError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One entry of a directory listing
///
/// Symlinks are neither files nor directories here.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_file: bool,
}

/// Lists the immediate children of `path`, ordered by name
pub(crate) async fn list_dir(path: &Path) -> Result<Vec<Entry>> {
    let mut reader = fs::read_dir(path)
        .await
        .map_err(|e| LibraryError::io(path, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| LibraryError::io(path, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| LibraryError::io(entry.path(), e))?;

        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Creates a single directory level; an existing directory is fine
pub(crate) async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path).await {
        Ok(()) => {
            log::debug!("Created directory {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(LibraryError::io(path, e)),
    }
}

/// True when something exists at `path`; lookup errors count as absent
pub(crate) async fn exists(path: &Path) -> bool {
    matches!(fs::try_exists(path).await, Ok(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_dir_is_sorted() -> Result<()> {
        let temp = TempDir::new()?;
        std::fs::create_dir(temp.path().join("b"))?;
        std::fs::write(temp.path().join("a.mp3"), b"x")?;
        std::fs::write(temp.path().join("c.txt"), b"x")?;

        let entries = list_dir(temp.path()).await?;
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "b", "c.txt"]);
        assert!(entries[0].is_file);
        assert!(entries[1].is_dir);
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() -> Result<()> {
        let temp = TempDir::new()?;
        let target = temp.path().join("Audio");

        ensure_dir(&target).await?;
        ensure_dir(&target).await?;
        assert!(target.is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_dir_does_not_create_parents() -> Result<()> {
        let temp = TempDir::new()?;
        let target = temp.path().join("missing").join("Audio");

        let result = ensure_dir(&target).await;
        assert!(matches!(result, Err(LibraryError::NotFound { .. })));
        Ok(())
    }
}
