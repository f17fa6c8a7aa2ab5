//! Shared import progress for hosts that poll

use crate::importer::ImportOutcome;
use hailcast_core::ImportProgress;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Lifecycle of the tracked import
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ImportStatus {
    Idle,
    Running,
    Succeeded { copied: usize },
    Failed { error: String },
    Cancelled,
}

/// Point-in-time view of the tracked import
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(flatten)]
    pub status: ImportStatus,
    pub progress: ImportProgress,
}

#[derive(Debug)]
struct TrackerState {
    status: ImportStatus,
    progress: ImportProgress,
}

/// Thread-safe import progress tracker
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    inner: Arc<Mutex<TrackerState>>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrackerState {
                status: ImportStatus::Idle,
                progress: ImportProgress::initial(),
            })),
        }
    }

    /// Marks a new run as started and clears the previous progress
    pub fn start(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.status = ImportStatus::Running;
            state.progress = ImportProgress::initial();
        }
    }

    /// Records a progress event
    pub fn update(&self, progress: &ImportProgress) {
        if let Ok(mut state) = self.inner.lock() {
            state.progress = progress.clone();
        }
    }

    /// Records how the run ended
    pub fn finish(&self, outcome: &ImportOutcome) {
        let status = match &outcome.error {
            None => ImportStatus::Succeeded {
                copied: outcome.copied,
            },
            Some(e) if e.is_silent() => ImportStatus::Cancelled,
            Some(e) => ImportStatus::Failed {
                error: e.to_string(),
            },
        };

        if let Ok(mut state) = self.inner.lock() {
            state.status = status;
        }
    }

    /// Gets the current progress and status
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        self.inner.lock().ok().map(|state| ProgressSnapshot {
            status: state.status.clone(),
            progress: state.progress.clone(),
        })
    }

    /// Gets the current percentage
    pub fn percentage(&self) -> Option<f64> {
        self.inner.lock().ok().map(|state| state.progress.progress)
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|state| state.status == ImportStatus::Running)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hailcast_core::{AppError, Language};

    #[test]
    fn test_tracker_starts_idle() {
        let tracker = ProgressTracker::new();
        let snapshot = tracker.snapshot().expect("lock");
        assert_eq!(snapshot.status, ImportStatus::Idle);
        assert!(snapshot.progress.is_initial());
    }

    #[test]
    fn test_start_resets_progress() {
        let tracker = ProgressTracker::new();
        tracker.update(&ImportProgress::after_copy(3, 4, "3.mp3", Language::ENGLISH));
        assert_eq!(tracker.percentage(), Some(75.0));

        tracker.start();
        assert!(tracker.is_running());
        assert_eq!(tracker.percentage(), Some(0.0));
    }

    #[test]
    fn test_finish_records_outcome() {
        let tracker = ProgressTracker::new();
        tracker.start();
        tracker.finish(&ImportOutcome {
            copied: 65,
            error: None,
        });
        assert_eq!(
            tracker.snapshot().map(|s| s.status),
            Some(ImportStatus::Succeeded { copied: 65 })
        );

        tracker.finish(&ImportOutcome {
            copied: 1,
            error: Some(AppError::Cancelled {
                operation: "import".to_string(),
            }),
        });
        assert_eq!(
            tracker.snapshot().map(|s| s.status),
            Some(ImportStatus::Cancelled)
        );
    }

    #[test]
    fn test_snapshot_serializes_flat() -> Result<(), serde_json::Error> {
        let tracker = ProgressTracker::new();
        tracker.start();
        tracker.update(&ImportProgress::after_copy(1, 2, "1.wav", Language::ENGLISH));

        let json = serde_json::to_value(tracker.snapshot())?;
        assert_eq!(json["status"], "running");
        assert_eq!(json["progress"]["progress"], 50.0);
        assert_eq!(json["progress"]["currentFile"], "1.wav");
        Ok(())
    }
}
