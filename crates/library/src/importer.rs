//! Copies recognized language directories into the import root

use crate::error::{LibraryError, Result};
use crate::listing::{ensure_dir, list_dir};
use async_stream::try_stream;
use futures::{pin_mut, Stream, StreamExt};
use hailcast_core::{
    is_audio_file_name, AppError, DirectoryMatch, ImportProgress, Language, LanguageCatalog,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::fs;
use tokio_util::sync::CancellationToken;

/// Allows at most one import at a time
#[derive(Debug, Clone, Default)]
pub struct ImportLock {
    busy: Arc<AtomicBool>,
}

impl ImportLock {
    /// Claims the lock, failing with `ImportInProgress` while another run holds it
    pub fn try_acquire(&self) -> Result<ImportGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| LibraryError::ImportInProgress)?;

        Ok(ImportGuard {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the import lock when dropped
#[derive(Debug)]
pub struct ImportGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ImportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// A recognized language directory in the source tree
#[derive(Debug, Clone)]
pub struct LanguageSource {
    pub language: Language,
    pub path: PathBuf,
    /// Every entry in the directory, audio or not
    pub entry_count: usize,
    /// Regular files ending in `.mp3` or `.wav`, by name
    pub audio_files: Vec<String>,
}

/// What an import of a source directory would copy
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub languages: Vec<LanguageSource>,
    /// Source subdirectories that matched no language
    pub skipped: Vec<String>,
    /// Progress denominator: all entries of recognized directories
    pub total_entries: usize,
}

impl ImportPlan {
    /// Lists `source` and its recognized language directories
    pub async fn scan(source: &Path) -> Result<Self> {
        let mut plan = Self::default();

        for entry in list_dir(source).await? {
            if !entry.is_dir {
                continue;
            }

            let language = match LanguageCatalog::classify(&entry.name) {
                DirectoryMatch::Recognized(language) => language,
                DirectoryMatch::Unrecognized(name) => {
                    info!("Skipping unknown language directory: {}", name);
                    plan.skipped.push(name);
                    continue;
                }
            };

            let files = list_dir(&entry.path).await?;
            let audio_files = files
                .iter()
                .filter(|f| f.is_file && is_audio_file_name(&f.name))
                .map(|f| f.name.clone())
                .collect();

            plan.total_entries += files.len();
            plan.languages.push(LanguageSource {
                language,
                path: entry.path,
                entry_count: files.len(),
                audio_files,
            });
        }

        Ok(plan)
    }

    /// Number of files the import will copy
    pub fn audio_file_count(&self) -> usize {
        self.languages.iter().map(|l| l.audio_files.len()).sum()
    }
}

/// Result of a finished import run
#[derive(Debug)]
pub struct ImportOutcome {
    pub copied: usize,
    pub error: Option<AppError>,
}

impl ImportOutcome {
    fn completed(copied: usize) -> Self {
        Self {
            copied,
            error: None,
        }
    }

    fn failed(copied: usize, err: LibraryError) -> Self {
        let partial = copied > 0
            && matches!(err, LibraryError::Io { .. } | LibraryError::NotFound { .. });

        let error = if partial {
            AppError::PartialCopyFailure {
                copied,
                reason: err.to_string(),
            }
        } else {
            err.into()
        };

        Self {
            copied,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn into_result(self) -> std::result::Result<usize, AppError> {
        match self.error {
            None => Ok(self.copied),
            Some(e) => Err(e),
        }
    }
}

/// Mirrors audio files from a source directory into the import root
#[derive(Debug, Clone)]
pub struct FileImporter {
    root: PathBuf,
    lock: ImportLock,
}

impl FileImporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: ImportLock::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True while a run started by this importer (or a clone) is live
    pub fn is_busy(&self) -> bool {
        self.lock.is_held()
    }

    /// Starts an import and returns its progress events
    ///
    /// The stream is lazy: nothing is touched until it is polled. It yields
    /// one [`ImportProgress`] per copied file, in directory-then-file name
    /// order, then ends. The first error is yielded and ends the stream;
    /// files already copied stay in place. `cancel` is checked before each
    /// copy.
    ///
    /// A source language directory that already is its destination is
    /// skipped.
    ///
    /// Fails immediately with `ImportInProgress` if another run holds the
    /// lock; the lock is released when the stream is dropped.
    pub fn copy_audio_files(
        &self,
        source: impl Into<PathBuf>,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<ImportProgress>> + Send + 'static> {
        let guard = self.lock.try_acquire()?;
        let source = source.into();
        let root = self.root.clone();

        Ok(try_stream! {
            let _guard = guard;

            ensure_dir(&root).await?;

            let plan = ImportPlan::scan(&source).await?;
            let total = plan.total_entries;
            debug!(
                "Import plan: {} language(s), {} audio file(s), {} entries",
                plan.languages.len(),
                plan.audio_file_count(),
                total
            );

            let mut copied = 0usize;
            for source_dir in &plan.languages {
                let target_dir = root.join(source_dir.language.name());
                ensure_dir(&target_dir).await?;

                if same_directory(&source_dir.path, &target_dir).await? {
                    warn!(
                        "Skipping {}: it is already the {} directory of the import root",
                        source_dir.path.display(),
                        source_dir.language
                    );
                    continue;
                }

                for name in &source_dir.audio_files {
                    if cancel.is_cancelled() {
                        info!("Import cancelled after {} file(s)", copied);
                        Err::<(), LibraryError>(LibraryError::Cancelled)?;
                    }

                    let from = source_dir.path.join(name);
                    fs::copy(&from, target_dir.join(name))
                        .await
                        .map_err(|e| LibraryError::io(&from, e))?;

                    copied += 1;
                    yield ImportProgress::after_copy(
                        copied,
                        total,
                        name.clone(),
                        source_dir.language,
                    );
                }
            }

            info!("Copied {} audio file(s) into {}", copied, root.display());
        })
    }

    /// Runs an import to completion, reporting each event to `on_progress`
    pub async fn import_with_progress<F>(
        &self,
        source: impl Into<PathBuf>,
        cancel: CancellationToken,
        on_progress: F,
    ) -> ImportOutcome
    where
        F: FnMut(&ImportProgress),
    {
        let source = source.into();
        info!(
            "Importing audio from {} into {}",
            source.display(),
            self.root.display()
        );

        let events = match self.copy_audio_files(source, cancel) {
            Ok(events) => events,
            Err(e) => {
                warn!("Import not started: {}", e);
                return ImportOutcome::failed(0, e);
            }
        };
        drive(events, on_progress).await
    }
}

/// True when both paths resolve to one directory
///
/// Copying a file onto itself truncates it.
async fn same_directory(a: &Path, b: &Path) -> Result<bool> {
    let a = fs::canonicalize(a).await.map_err(|e| LibraryError::io(a, e))?;
    let b = fs::canonicalize(b).await.map_err(|e| LibraryError::io(b, e))?;
    Ok(a == b)
}

/// Drains a stream from [`FileImporter::copy_audio_files`] into an outcome
///
/// For hosts that acquire the import eagerly and run it on their own task.
pub async fn drive<S, F>(events: S, mut on_progress: F) -> ImportOutcome
where
    S: Stream<Item = Result<ImportProgress>>,
    F: FnMut(&ImportProgress),
{
    pin_mut!(events);

    let mut copied = 0;
    while let Some(event) = events.next().await {
        match event {
            Ok(progress) => {
                copied += 1;
                on_progress(&progress);
            }
            Err(e) => {
                if e.is_cancelled() {
                    info!("Import stopped by caller");
                } else {
                    warn!("Error copying audio files: {}", e);
                }
                return ImportOutcome::failed(copied, e);
            }
        }
    }

    ImportOutcome::completed(copied)
}
