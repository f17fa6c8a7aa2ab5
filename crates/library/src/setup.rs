//! First-run orchestration: permission, root, validation, import

use crate::importer::FileImporter;
use crate::permission::{PermissionBackend, PermissionGate};
use crate::picker::{DirectoryPicker, FolderChooser};
use crate::validator::{create_audio_directory, DirectoryValidator};
use hailcast_core::{AppError, ImportProgress, ValidationReport};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Alert the host should present for a setup state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
    pub button: &'static str,
}

/// Where setup ended up
#[derive(Debug, Clone, PartialEq)]
pub enum SetupState {
    /// Storage access was refused; retry after the user grants it
    PermissionRequired,
    /// English is complete; the app can start
    Ready(ValidationReport),
    /// The root is not usable yet; a source directory must be imported
    NeedsSource(ValidationReport),
    /// An import finished but English is still incomplete
    IncompleteAfterImport(ValidationReport),
    /// The user dismissed the folder chooser
    Cancelled,
    /// Picking or copying failed; holds the alert message
    Failed(String),
}

impl SetupState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Report behind the state, if validation ran
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Ready(report) | Self::NeedsSource(report) | Self::IncompleteAfterImport(report) => {
                Some(report)
            }
            _ => None,
        }
    }

    /// Alert to show, or `None` when the state needs no alert
    pub fn alert(&self) -> Option<Alert> {
        match self {
            Self::Ready(_) | Self::Cancelled => None,
            Self::PermissionRequired => Some(Alert {
                title: "Storage Permission Required",
                message: "Voice Command App needs storage permission to access audio commands."
                    .to_string(),
                button: "Grant Permission",
            }),
            Self::NeedsSource(_) => Some(Alert {
                title: "Audio Commands Required",
                message: "Please select the directory containing your voice command audio files."
                    .to_string(),
                button: "Select Directory",
            }),
            Self::IncompleteAfterImport(_) => Some(Alert {
                title: "Warning",
                message: "Some files may not have been copied correctly. Please check the audio directory."
                    .to_string(),
                button: "OK",
            }),
            Self::Failed(message) => Some(Alert {
                title: "Error",
                message: message.clone(),
                button: "OK",
            }),
        }
    }
}

/// Drives setup from permission check to a usable import root
pub struct SetupFlow<B, C> {
    gate: PermissionGate<B>,
    picker: DirectoryPicker<C>,
    importer: FileImporter,
    create_root: bool,
}

impl<B: PermissionBackend, C: FolderChooser> SetupFlow<B, C> {
    pub fn new(gate: PermissionGate<B>, picker: DirectoryPicker<C>, importer: FileImporter) -> Self {
        Self {
            gate,
            picker,
            importer,
            create_root: true,
        }
    }

    /// Whether `run` creates a missing import root
    pub fn create_root(mut self, create: bool) -> Self {
        self.create_root = create;
        self
    }

    pub fn root(&self) -> &Path {
        self.importer.root()
    }

    pub fn importer(&self) -> &FileImporter {
        &self.importer
    }

    /// Checks permission, prepares the root and validates it
    ///
    /// Nothing is retried here; after `PermissionRequired` the host calls
    /// `run` again once the user has granted access.
    pub async fn run(&self) -> SetupState {
        if !self.gate.check_permission().await && !self.gate.request_permission().await {
            info!("Storage permission not granted");
            return SetupState::PermissionRequired;
        }

        let root = self.importer.root();
        info!("Audio directory: {}", root.display());
        if self.create_root && !create_audio_directory(root).await {
            warn!("Could not create {}", root.display());
        }

        let report = DirectoryValidator::validate(root).await;
        if report.is_valid {
            info!("Initialization complete");
            SetupState::Ready(report)
        } else {
            SetupState::NeedsSource(report)
        }
    }

    /// Asks for a source directory, imports it and re-validates
    pub async fn import_from_picker<F>(&self, cancel: CancellationToken, on_progress: F) -> SetupState
    where
        F: FnMut(&ImportProgress),
    {
        match self.picker.pick_directory().await {
            Ok(source) => self.import_from(source, cancel, on_progress).await,
            Err(AppError::UserCancelled) => SetupState::Cancelled,
            Err(e) => {
                let message = match e {
                    AppError::PickerFailed { message } => message,
                    other => other.to_string(),
                };
                SetupState::Failed(format!("Failed to select directory: {}", message))
            }
        }
    }

    /// Imports `source` and re-validates the root
    pub async fn import_from<F>(
        &self,
        source: impl Into<PathBuf>,
        cancel: CancellationToken,
        on_progress: F,
    ) -> SetupState
    where
        F: FnMut(&ImportProgress),
    {
        let outcome = self
            .importer
            .import_with_progress(source, cancel, on_progress)
            .await;

        if let Some(e) = outcome.error {
            if e.is_silent() {
                return SetupState::Cancelled;
            }
            return SetupState::Failed(format!("Failed to copy files: {}", e));
        }

        let report = DirectoryValidator::validate(self.importer.root()).await;
        if report.is_valid {
            SetupState::Ready(report)
        } else {
            warn!("Import finished but the audio directory is still incomplete");
            SetupState::IncompleteAfterImport(report)
        }
    }
}
