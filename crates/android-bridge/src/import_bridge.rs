// crates/android-bridge/src/import_bridge.rs
//! Import bridge exposing validation, import and playback lookup to Android
//!
//! Java owns an [`ImportSession`] through a `long` handle. Imports run on a
//! shared tokio runtime; Java polls `nativeGetProgress` for the snapshot and
//! may cancel at any time. Structured results cross the boundary as JSON.

use crate::ffi::{
    bool_to_jboolean, json_to_jstring, jstring_to_option, jstring_to_string, string_to_jstring,
    FfiError, FfiResult, HandleManager,
};
use crate::jni_safe;
use hailcast_config::Config;
use hailcast_core::{
    AppError, Category, Language, LanguageCatalog, Platform, TrackNumber, ValidationReport,
};
use hailcast_library::{
    audio_root, create_audio_directory, drive, normalize_content_uri, DirectoryValidator,
    FileImporter, PathResolver, PlaybackResolver, ProgressSnapshot, ProgressTracker,
    StorageRoots, TrackEntry,
};
use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jint, jlong, jstring};
use jni::JNIEnv;
use log::{debug, info};
use once_cell::sync::{Lazy, OnceCell};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

static SESSIONS: Lazy<HandleManager<ImportSession>> = Lazy::new(HandleManager::new);

static RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Shared runtime for bridge work, built on first use
pub fn runtime() -> FfiResult<&'static Runtime> {
    RUNTIME.get_or_try_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("hailcast-bridge")
            .enable_all()
            .build()
            .map_err(FfiError::from)
    })
}

fn parse_language(name: &str) -> FfiResult<Language> {
    LanguageCatalog::resolve(name).ok_or_else(|| {
        FfiError::App(AppError::InvalidArgument {
            argument: "language".to_string(),
            reason: format!("unsupported language '{}'", name),
        })
    })
}

fn parse_track(track: jint) -> FfiResult<TrackNumber> {
    let value = u32::try_from(track).map_err(|_| AppError::InvalidTrack { track: 0 })?;
    Ok(TrackNumber::new(value)?)
}

/// Platform for an Android API level passed from Java
pub fn android_platform(api_level: jint) -> FfiResult<Platform> {
    let api_level = u32::try_from(api_level).map_err(|_| AppError::InvalidArgument {
        argument: "api_level".to_string(),
        reason: format!("negative API level {}", api_level),
    })?;
    Ok(Platform::Android { api_level })
}

/// Import root state shared with one Java owner
pub struct ImportSession {
    platform: Platform,
    importer: FileImporter,
    tracker: ProgressTracker,
    cancel: Mutex<Option<CancellationToken>>,
}

impl ImportSession {
    pub fn new(platform: Platform, roots: StorageRoots, config: &Config) -> Self {
        let root = audio_root(PathResolver::new(platform, roots), config);
        info!("Import session for {} at {}", platform, root.display());

        Self {
            platform,
            importer: FileImporter::new(root),
            tracker: ProgressTracker::new(),
            cancel: Mutex::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        self.importer.root()
    }

    /// Creates the import root if missing
    pub fn create_root(&self) -> FfiResult<bool> {
        Ok(runtime()?.block_on(create_audio_directory(self.root())))
    }

    pub fn validate(&self) -> FfiResult<ValidationReport> {
        Ok(runtime()?.block_on(DirectoryValidator::validate(self.root())))
    }

    /// Starts copying from `source` in the background
    ///
    /// `source` may be a raw picker URI; on Android it is normalized first.
    /// Fails with `ImportInProgress` while an earlier run is still live.
    pub fn start_import(&self, source: &str) -> FfiResult<()> {
        let source = if self.platform.is_android() {
            normalize_content_uri(source)?
        } else {
            source.to_string()
        };

        let runtime = runtime()?;
        let token = CancellationToken::new();
        let events = self
            .importer
            .copy_audio_files(PathBuf::from(&source), token.clone())?;

        *self.cancel.lock().unwrap_or_else(|e| e.into_inner()) = Some(token);
        self.tracker.start();
        info!("Import started from {}", source);

        let tracker = self.tracker.clone();
        runtime.spawn(async move {
            // The import lock lives in the stream; record the outcome before releasing it
            let mut events = Box::pin(events);
            let outcome = drive(events.as_mut(), |progress| tracker.update(progress)).await;
            tracker.finish(&outcome);
            drop(events);
            debug!("Import task finished: {:?}", outcome.error);
        });

        Ok(())
    }

    /// Requests cancellation of the running import; false if none was started
    pub fn cancel_import(&self) -> bool {
        match self.cancel.lock().unwrap_or_else(|e| e.into_inner()).take() {
            Some(token) => {
                token.cancel();
                info!("Import cancellation requested");
                true
            }
            None => false,
        }
    }

    pub fn is_importing(&self) -> bool {
        self.tracker.is_running() || self.importer.is_busy()
    }

    pub fn progress(&self) -> FfiResult<ProgressSnapshot> {
        self.tracker
            .snapshot()
            .ok_or_else(|| FfiError::Runtime("progress tracker poisoned".to_string()))
    }

    /// Playable file for a track, after English fallback
    pub fn resolve_path(&self, language: &str, track: jint) -> FfiResult<PathBuf> {
        let language = parse_language(language)?;
        let track = parse_track(track)?;
        let resolver = PlaybackResolver::new(self.root());
        Ok(runtime()?.block_on(resolver.resolve_path(language, track))?)
    }

    /// Playlist entries for a category
    pub fn category_tracks(&self, language: &str, category: &str) -> FfiResult<Vec<TrackEntry>> {
        let language = parse_language(language)?;
        let category: Category = category.parse()?;
        let resolver = PlaybackResolver::new(self.root());
        Ok(runtime()?.block_on(resolver.load_category(language, category)))
    }
}

/// Creates an import session
///
/// `config_dir` may be null; defaults are used when no config file exists.
///
/// # Safety
/// The returned handle must be released with `nativeDestroy`.
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeCreate(
    mut env: JNIEnv,
    _class: JClass,
    api_level: jint,
    external_dir: JString,
    document_dir: JString,
    config_dir: JString,
) -> jlong {
    jni_safe!(env, 0, {
        let platform = android_platform(api_level)?;
        let external = jstring_to_string(&mut env, &external_dir, "external_dir")?;
        let document = jstring_to_string(&mut env, &document_dir, "document_dir")?;
        let roots = StorageRoots {
            external_directory: PathBuf::from(external),
            document_directory: PathBuf::from(document),
        };

        let config = match jstring_to_option(&mut env, &config_dir)? {
            Some(dir) => hailcast_config::ConfigManager::with_directory(PathBuf::from(dir))
                .map(|manager| manager.load_or_default())
                .unwrap_or_default(),
            None => Config::default(),
        };

        let session = ImportSession::new(platform, roots, &config);
        if config.library.create_root_on_startup {
            session.create_root()?;
        }

        let handle = SESSIONS.insert(session);
        debug!("Created import session handle {}", handle);
        Ok(handle)
    })
}

/// Destroys an import session, cancelling any running import
///
/// # Safety
/// After calling this function, the handle becomes invalid and must not be used.
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeDestroy(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    jni_safe!(env, (), {
        let session = SESSIONS.remove(handle)?;
        session.cancel_import();
        debug!("Destroyed import session handle {}", handle);
        Ok(())
    })
}

/// Absolute path of the import root
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeGetRoot(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jstring {
    jni_safe!(env, std::ptr::null_mut(), {
        let session = SESSIONS.get(handle)?;
        string_to_jstring(&mut env, &session.root().display().to_string())
    })
}

/// Validates the import root; returns the report as JSON
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeValidate(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jstring {
    jni_safe!(env, std::ptr::null_mut(), {
        let report = SESSIONS.get(handle)?.validate()?;
        json_to_jstring(&mut env, &report)
    })
}

/// Starts an import from a picked directory
///
/// Throws `IllegalStateException` while another import is running.
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeStartImport(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    source: JString,
) -> jboolean {
    jni_safe!(env, bool_to_jboolean(false), {
        let session = SESSIONS.get(handle)?;
        let source = jstring_to_string(&mut env, &source, "source")?;
        session.start_import(&source)?;
        Ok(bool_to_jboolean(true))
    })
}

/// Current import status and progress as JSON
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeGetProgress(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jstring {
    jni_safe!(env, std::ptr::null_mut(), {
        let snapshot = SESSIONS.get(handle)?.progress()?;
        json_to_jstring(&mut env, &snapshot)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeIsImporting(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jboolean {
    jni_safe!(env, bool_to_jboolean(false), {
        Ok(bool_to_jboolean(SESSIONS.get(handle)?.is_importing()))
    })
}

/// Cancels the running import; copied files are kept
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeCancelImport(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jboolean {
    jni_safe!(env, bool_to_jboolean(false), {
        Ok(bool_to_jboolean(SESSIONS.get(handle)?.cancel_import()))
    })
}

/// Resolves the playable file for a track
///
/// Throws `FileNotFoundException` when neither the language nor English has it.
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeResolvePath(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    language: JString,
    track: jint,
) -> jstring {
    jni_safe!(env, std::ptr::null_mut(), {
        let session = SESSIONS.get(handle)?;
        let language = jstring_to_string(&mut env, &language, "language")?;
        let path = session.resolve_path(&language, track)?;
        string_to_jstring(&mut env, &path.display().to_string())
    })
}

/// Category playlist as a JSON array of track entries
#[no_mangle]
pub extern "system" fn Java_com_hailcast_ImportBridge_nativeLoadCategory(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    language: JString,
    category: JString,
) -> jstring {
    jni_safe!(env, std::ptr::null_mut(), {
        let session = SESSIONS.get(handle)?;
        let language = jstring_to_string(&mut env, &language, "language")?;
        let category = jstring_to_string(&mut env, &category, "category")?;
        let tracks = session.category_tracks(&language, &category)?;
        json_to_jstring(&mut env, &tracks)
    })
}
