// Hailcast Android Bridge
//
// JNI bindings between the Rust import pipeline and the Android host app.
// The host owns permission dialogs, the folder chooser and the media session;
// this library decides what to ask for and does the filesystem work.

#![warn(rust_2018_idioms)]

pub mod ffi;
pub mod import_bridge;

pub use ffi::{FfiError, FfiResult, HandleManager};
pub use import_bridge::ImportSession;

use ffi::{json_to_jstring, jstring_to_string, string_to_jstring};
use hailcast_core::{command_title, LanguageCatalog, TrackNumber};
use hailcast_library::{
    normalize_content_uri, PermissionPrompt, SettingsGuide, StorageStrategy, ALL_FILES_GUIDE,
};
use jni::{
    objects::{JClass, JString},
    sys::{jint, jstring},
    JNIEnv,
};
use serde::Serialize;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log tag used on logcat
pub const LOG_TAG: &str = "Hailcast";

/// Initialize logging for the library
///
/// On Android, logs go to logcat. With `desktop-testing`, they go to stderr
/// through env_logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(all(target_os = "android", feature = "android-logger"))]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag(LOG_TAG),
    );

    #[cfg(feature = "desktop-testing")]
    let _ = env_logger::builder().is_test(true).try_init();
}

/// JNI_OnLoad - called when library is loaded
#[cfg(target_os = "android")]
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn JNI_OnLoad(
    _vm: jni::JavaVM,
    _reserved: *mut std::ffi::c_void,
) -> jni::sys::jint {
    init_logging();
    log::info!("{} library loaded - version {}", LOG_TAG, VERSION);
    jni::sys::JNI_VERSION_1_6
}

/// What the host must do to obtain storage access
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPlan {
    pub strategy: StorageStrategy,
    /// Manifest permission to request at runtime, if any
    pub permission: Option<&'static str>,
    pub prompt: Option<PermissionPrompt>,
    /// Settings walkthrough for the all-files-access tier
    pub settings_guide: Option<SettingsGuide>,
}

impl PermissionPlan {
    pub fn for_api_level(api_level: jint) -> FfiResult<Self> {
        let strategy = StorageStrategy::for_platform(import_bridge::android_platform(api_level)?);
        let runtime = strategy.runtime_permission();

        Ok(Self {
            strategy,
            permission: runtime.map(|(permission, _)| permission.android_name()),
            prompt: runtime.map(|(_, prompt)| prompt),
            settings_guide: (strategy == StorageStrategy::AllFilesAccess)
                .then_some(ALL_FILES_GUIDE),
        })
    }
}

#[derive(Serialize)]
struct CommandEntry {
    track: u32,
    title: &'static str,
}

fn command_entries() -> Vec<CommandEntry> {
    TrackNumber::all()
        .map(|track| CommandEntry {
            track: track.get(),
            title: command_title(track),
        })
        .collect()
}

/// Get library version
#[no_mangle]
pub extern "system" fn Java_com_hailcast_Hailcast_nativeGetVersion(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    crate::jni_safe!(env, std::ptr::null_mut(), { string_to_jstring(&mut env, VERSION) })
}

/// Supported language names as a JSON array
#[no_mangle]
pub extern "system" fn Java_com_hailcast_Hailcast_nativeGetLanguages(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    crate::jni_safe!(env, std::ptr::null_mut(), {
        let names: Vec<&str> = LanguageCatalog::all().map(|l| l.name()).collect();
        json_to_jstring(&mut env, &names)
    })
}

/// Command titles as a JSON array of `{track, title}`
#[no_mangle]
pub extern "system" fn Java_com_hailcast_Hailcast_nativeGetCommands(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    crate::jni_safe!(env, std::ptr::null_mut(), {
        json_to_jstring(&mut env, &command_entries())
    })
}

/// Converts a folder chooser URI into a filesystem path
#[no_mangle]
pub extern "system" fn Java_com_hailcast_Hailcast_nativeNormalizeUri(
    mut env: JNIEnv,
    _class: JClass,
    uri: JString,
) -> jstring {
    crate::jni_safe!(env, std::ptr::null_mut(), {
        let uri = jstring_to_string(&mut env, &uri, "uri")?;
        let path = normalize_content_uri(&uri)?;
        string_to_jstring(&mut env, &path)
    })
}

/// Storage permission plan for an API level, as JSON
#[no_mangle]
pub extern "system" fn Java_com_hailcast_Hailcast_nativePermissionPlan(
    mut env: JNIEnv,
    _class: JClass,
    api_level: jint,
) -> jstring {
    crate::jni_safe!(env, std::ptr::null_mut(), {
        let plan = PermissionPlan::for_api_level(api_level)?;
        json_to_jstring(&mut env, &plan)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_permission_plan_tiers() -> FfiResult<()> {
        let plan = PermissionPlan::for_api_level(34)?;
        assert_eq!(plan.strategy, StorageStrategy::MediaAudio);
        assert_eq!(plan.permission, Some("android.permission.READ_MEDIA_AUDIO"));
        assert!(plan.settings_guide.is_none());

        let plan = PermissionPlan::for_api_level(31)?;
        assert_eq!(plan.strategy, StorageStrategy::AllFilesAccess);
        assert!(plan.permission.is_none());
        assert_eq!(plan.settings_guide, Some(ALL_FILES_GUIDE));

        let plan = PermissionPlan::for_api_level(29)?;
        assert_eq!(
            plan.permission,
            Some("android.permission.WRITE_EXTERNAL_STORAGE")
        );
        Ok(())
    }

    #[test]
    fn test_permission_plan_json() -> FfiResult<()> {
        let json = serde_json::to_value(PermissionPlan::for_api_level(33)?)?;
        assert_eq!(json["strategy"], "mediaAudio");
        assert_eq!(json["prompt"]["title"], "Audio Permission");
        assert_eq!(json["prompt"]["buttonPositive"], "OK");
        Ok(())
    }

    #[test]
    fn test_command_entries_cover_every_track() {
        let entries = command_entries();
        assert_eq!(entries.len(), 65);
        assert_eq!(entries[0].track, 1);
    }
}
