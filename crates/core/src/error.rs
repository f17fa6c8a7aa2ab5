//! Error types and recovery strategies for Hailcast
//!
//! Every failure in the import pipeline resolves to a reported state rather
//! than a process fault. Errors carry three pieces of guidance for the UI:
//! - **Severity**: whether the app can carry on, degraded or not
//! - **Recovery action**: what the caller should do next
//! - **User message**: text fit for an alert, or none at all for silent outcomes
//!
//! `UserCancelled` and `UnknownDirectory` are silent: callers must never raise an
//! alert for them.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Message reported when the user dismisses the native folder chooser.
///
/// Hosts compare against this value to suppress alerts.
pub const USER_CANCELLED_MESSAGE: &str = "User cancelled directory selection";

/// Recovery actions that can be taken when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Ask the user to grant storage access and retry initialization
    GrantPermission,
    /// Ask the user to pick a source directory again
    SelectSource,
    /// Re-run the import; partially copied files are overwritten
    RetryImport,
    /// Nothing to do, the outcome is informational only
    Ignore,
    /// No automatic recovery - user intervention required
    UserIntervention,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrantPermission => write!(f, "Grant storage permission"),
            Self::SelectSource => write!(f, "Select source directory"),
            Self::RetryImport => write!(f, "Retry import"),
            Self::Ignore => write!(f, "No action needed"),
            Self::UserIntervention => write!(f, "User intervention required"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, never shown to the user
    Silent,
    /// Feature degraded but app can continue
    Degraded,
    /// The current flow cannot continue without user action
    Blocking,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "Silent"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Blocking => write!(f, "Blocking"),
        }
    }
}

/// Main error type for Hailcast
#[derive(Error, Debug)]
pub enum AppError {
    // ===== File System Errors =====
    /// Directory or file absent
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a storage operation
    #[error("Permission denied: {operation}")]
    PermissionDenied { operation: String },

    /// General I/O error
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    // ===== Import Errors =====
    /// Copy aborted mid-run; files copied so far are left in place
    #[error("Copy aborted after {copied} file(s): {reason}")]
    PartialCopyFailure { copied: usize, reason: String },

    /// Another import is still running
    #[error("An import is already in progress")]
    ImportInProgress,

    /// Operation was cancelled by the caller
    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    /// Directory name does not match any supported language
    #[error("Unknown language directory: {name}")]
    UnknownDirectory { name: String },

    // ===== Picker Errors =====
    /// The user dismissed the folder chooser
    #[error("{}", USER_CANCELLED_MESSAGE)]
    UserCancelled,

    /// The folder chooser failed or returned nothing usable
    #[error("Directory selection failed: {message}")]
    PickerFailed { message: String },

    // ===== Playback Errors =====
    /// Track number outside 1..=65
    #[error("Invalid track number: {track}")]
    InvalidTrack { track: u32 },

    /// Media transport rejected a command
    #[error("Playback error: {message}")]
    Playback { message: String },

    // ===== Misc =====
    /// Invalid configuration value
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    Configuration {
        setting: String,
        value: String,
        reason: String,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UserCancelled | Self::UnknownDirectory { .. } | Self::Cancelled { .. } => {
                ErrorSeverity::Silent
            }

            Self::InvalidTrack { .. }
            | Self::Playback { .. }
            | Self::PartialCopyFailure { .. }
            | Self::ImportInProgress => ErrorSeverity::Degraded,

            Self::PermissionDenied { .. } | Self::Configuration { .. } => ErrorSeverity::Blocking,

            // Context-dependent - default to degraded
            _ => ErrorSeverity::Degraded,
        }
    }

    /// Returns the recommended recovery action for this error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::PermissionDenied { .. } => RecoveryAction::GrantPermission,

            Self::NotFound { .. } | Self::PickerFailed { .. } => RecoveryAction::SelectSource,

            Self::PartialCopyFailure { .. } | Self::Io { .. } => RecoveryAction::RetryImport,

            Self::UserCancelled
            | Self::UnknownDirectory { .. }
            | Self::Cancelled { .. }
            | Self::ImportInProgress => RecoveryAction::Ignore,

            _ => RecoveryAction::UserIntervention,
        }
    }

    /// Returns true if callers must not present this error to the user
    pub fn is_silent(&self) -> bool {
        self.severity() == ErrorSeverity::Silent
    }

    /// Returns a user-friendly error message suitable for display in the UI
    ///
    /// Silent errors return `None`.
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            Self::UserCancelled | Self::UnknownDirectory { .. } | Self::Cancelled { .. } => {
                return None
            }
            Self::NotFound { .. } => {
                "The audio files could not be found. Please select the audio source directory."
                    .to_string()
            }
            Self::PermissionDenied { .. } => {
                "Voice Command App needs storage permission to access audio commands.".to_string()
            }
            Self::Io { message, .. } => format!("A file operation failed: {}", message),
            Self::PartialCopyFailure { reason, .. } => {
                format!("Failed to copy files: {}", reason)
            }
            Self::ImportInProgress => {
                "Audio files are already being copied. Please wait.".to_string()
            }
            Self::PickerFailed { message } => format!("Failed to select directory: {}", message),
            Self::InvalidTrack { .. } => "This command is not available.".to_string(),
            Self::Playback { .. } => "Cannot play this command right now.".to_string(),
            Self::Configuration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
        };
        Some(message)
    }

    /// Helper to wrap an I/O error with a description of the failed operation
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: PathBuf::from("unknown"),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: "file operation".to_string(),
            },
            _ => Self::Io {
                message: err.to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_user_cancelled_display_matches_constant() {
        assert_eq!(AppError::UserCancelled.to_string(), USER_CANCELLED_MESSAGE);
    }

    #[test]
    fn test_silent_errors_have_no_user_message() {
        let silent = vec![
            AppError::UserCancelled,
            AppError::UnknownDirectory {
                name: "Klingon".to_string(),
            },
            AppError::Cancelled {
                operation: "import".to_string(),
            },
        ];

        for err in silent {
            assert!(err.is_silent(), "{} should be silent", err);
            assert!(err.user_message().is_none());
            assert_eq!(err.recovery_action(), RecoveryAction::Ignore);
        }
    }

    #[test]
    fn test_permission_denied_blocks() {
        let err = AppError::PermissionDenied {
            operation: "read media audio".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Blocking);
        assert_eq!(err.recovery_action(), RecoveryAction::GrantPermission);
        assert!(err.user_message().is_some());
    }

    #[test]
    fn test_partial_copy_failure() {
        let err = AppError::PartialCopyFailure {
            copied: 12,
            reason: "disk full".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Degraded);
        assert_eq!(err.recovery_action(), RecoveryAction::RetryImport);
        assert!(err.to_string().contains("12"));
        let msg = err.user_message().unwrap_or_default();
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Silent < ErrorSeverity::Degraded);
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Blocking);
    }

    #[test]
    fn test_recovery_action_display() {
        assert_eq!(RecoveryAction::RetryImport.to_string(), "Retry import");
        assert_eq!(RecoveryAction::Ignore.to_string(), "No action needed");
    }

    #[test]
    fn test_from_io_error_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_from_io_error_permission_denied() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::PermissionDenied { .. }));
    }

    #[test]
    fn test_from_io_error_other_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io { .. }));
        assert!(app_err.source().is_some());
    }
}
