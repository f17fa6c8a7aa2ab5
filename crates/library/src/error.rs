// FILE: crates/library/src/error.rs

use hailcast_core::AppError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An import is already in progress")]
    ImportInProgress,

    #[error("Import cancelled")]
    Cancelled,

    #[error("Background task failed: {0}")]
    Task(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl LibraryError {
    /// Attaches the path an I/O error occurred on; missing paths become `NotFound`
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True for the outcome of a caller-requested cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::App(AppError::Cancelled { .. }))
    }
}

impl From<io::Error> for LibraryError {
    fn from(err: io::Error) -> Self {
        Self::io(PathBuf::new(), err)
    }
}

impl From<walkdir::Error> for LibraryError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        match err.into_io_error() {
            Some(source) => Self::io(path, source),
            None => Self::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}

impl From<tokio::task::JoinError> for LibraryError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NotFound { path } => AppError::NotFound { path },
            LibraryError::Io { path, source } if source.kind() == io::ErrorKind::PermissionDenied => {
                AppError::PermissionDenied {
                    operation: format!("access {}", path.display()),
                }
            }
            LibraryError::Io { path, source } => AppError::io(path.display().to_string(), source),
            LibraryError::ImportInProgress => AppError::ImportInProgress,
            LibraryError::Cancelled => AppError::Cancelled {
                operation: "import".to_string(),
            },
            LibraryError::Task(message) => AppError::io(message.clone(), io::Error::other(message)),
            LibraryError::App(e) => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_becomes_not_found() {
        let err = LibraryError::io("/nowhere", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LibraryError::NotFound { .. }));
    }

    #[test]
    fn test_permission_denied_maps_to_app_error() {
        let err = LibraryError::io("/locked", io::Error::from(io::ErrorKind::PermissionDenied));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::PermissionDenied { .. }));
    }

    #[test]
    fn test_cancelled_is_silent() {
        let app: AppError = LibraryError::Cancelled.into();
        assert!(app.is_silent());
        assert!(LibraryError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_import_in_progress_round_trips() {
        let app: AppError = LibraryError::ImportInProgress.into();
        assert!(matches!(app, AppError::ImportInProgress));
    }
}
