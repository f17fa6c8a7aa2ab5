// FFI utility functions and error handling for the JNI bridge
//
// Panics never cross the boundary: every exported function runs its body
// through `jni_safe!`, which turns errors and panics into Java exceptions.

use hailcast_core::AppError;
use hailcast_library::LibraryError;
use jni::{objects::JString, sys::jstring, JNIEnv};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error that can cross the Rust/Java boundary as an exception
#[derive(Debug, Error)]
pub enum FfiError {
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(String),

    #[error("Null argument: {0}")]
    NullArgument(&'static str),

    #[error("Invalid handle: {0}")]
    InvalidHandle(i64),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl FfiError {
    /// Java exception class thrown for this error
    pub fn exception_class(&self) -> &'static str {
        match self {
            Self::NullArgument(_) | Self::App(AppError::InvalidArgument { .. }) => {
                "java/lang/IllegalArgumentException"
            }
            Self::App(AppError::InvalidTrack { .. }) => "java/lang/IllegalArgumentException",
            Self::InvalidHandle(_) | Self::App(AppError::ImportInProgress) => {
                "java/lang/IllegalStateException"
            }
            Self::App(AppError::NotFound { .. }) => "java/io/FileNotFoundException",
            Self::App(AppError::Io { .. }) => "java/io/IOException",
            _ => "java/lang/RuntimeException",
        }
    }
}

impl From<LibraryError> for FfiError {
    fn from(err: LibraryError) -> Self {
        FfiError::App(err.into())
    }
}

impl From<std::str::Utf8Error> for FfiError {
    fn from(err: std::str::Utf8Error) -> Self {
        FfiError::Utf8(err.to_string())
    }
}

impl From<std::io::Error> for FfiError {
    fn from(err: std::io::Error) -> Self {
        FfiError::Runtime(err.to_string())
    }
}

pub type FfiResult<T> = Result<T, FfiError>;

/// Thread-safe table of values owned by Java through opaque `long` handles
pub struct HandleManager<T> {
    handles: RwLock<HashMap<i64, Arc<T>>>,
    next_handle: AtomicI64,
}

impl<T> Default for HandleManager<T> {
    fn default() -> Self {
        Self {
            handles: RwLock::new(HashMap::new()),
            next_handle: AtomicI64::new(1),
        }
    }
}

impl<T> HandleManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and returns its handle; handles are never reused
    pub fn insert(&self, value: T) -> i64 {
        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.handles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle, Arc::new(value));
        handle
    }

    pub fn get(&self, handle: i64) -> FfiResult<Arc<T>> {
        self.handles
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&handle)
            .cloned()
            .ok_or(FfiError::InvalidHandle(handle))
    }

    pub fn remove(&self, handle: i64) -> FfiResult<Arc<T>> {
        self.handles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle)
            .ok_or(FfiError::InvalidHandle(handle))
    }

    pub fn contains(&self, handle: i64) -> bool {
        self.handles
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.handles.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs a JNI function body, converting errors and panics into exceptions
///
/// The body must evaluate to `FfiResult<T>`; `$default` is returned to Java
/// whenever an exception was thrown.
#[macro_export]
macro_rules! jni_safe {
    ($env:expr, $default:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(
            || -> $crate::ffi::FfiResult<_> { $body },
        )) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                ::log::warn!("JNI call failed: {}", e);
                let _ = $env.throw_new(e.exception_class(), e.to_string());
                $default
            }
            Err(panic_err) => {
                let msg = $crate::ffi::panic_message(panic_err.as_ref());
                ::log::error!("{}", msg);
                let _ = $env.throw_new("java/lang/RuntimeException", msg);
                $default
            }
        }
    };
}

/// Message for a caught panic payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("Panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("Panic: {}", s)
    } else {
        "Unknown panic occurred".to_string()
    }
}

/// Convert Java string to Rust String
pub fn jstring_to_string(
    env: &mut JNIEnv,
    jstr: &JString,
    argument: &'static str,
) -> FfiResult<String> {
    if jstr.is_null() {
        return Err(FfiError::NullArgument(argument));
    }
    let java_str = env.get_string(jstr)?;
    Ok(java_str.to_str()?.to_string())
}

/// Convert an optional Java string; null and empty both become `None`
pub fn jstring_to_option(env: &mut JNIEnv, jstr: &JString) -> FfiResult<Option<String>> {
    if jstr.is_null() {
        return Ok(None);
    }
    let java_str = env.get_string(jstr)?;
    let value = java_str.to_str()?;
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Convert Rust String to Java string
pub fn string_to_jstring(env: &mut JNIEnv, s: &str) -> FfiResult<jstring> {
    let jstr = env.new_string(s)?;
    Ok(jstr.into_raw())
}

/// Serialize `value` and hand it to Java as a string
pub fn json_to_jstring<T: serde::Serialize>(env: &mut JNIEnv, value: &T) -> FfiResult<jstring> {
    let json = serde_json::to_string(value)?;
    string_to_jstring(env, &json)
}

/// Convert Rust bool to jboolean
pub fn bool_to_jboolean(b: bool) -> u8 {
    u8::from(b)
}

/// Convert jboolean to Rust bool
pub fn jboolean_to_bool(jb: u8) -> bool {
    jb != 0
}
