//! Source directory selection

use async_trait::async_trait;
use hailcast_core::{AppError, Platform, USER_CANCELLED_MESSAGE};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;

/// Prefix of Android Storage Access Framework URIs
pub const CONTENT_URI_SCHEME: &str = "content://";

/// Marker preceding the encoded relative path in primary-volume URIs
const PRIMARY_VOLUME_MARKER: &str = "primary%3A";

/// Mount point of the primary shared storage volume on Android
pub const ANDROID_PRIMARY_STORAGE: &str = "/storage/emulated/0/";

/// Message used when the chooser closes without a result
pub const NO_SELECTION_MESSAGE: &str = "No directory selected";

/// The platform's native folder chooser
#[async_trait]
pub trait FolderChooser: Send + Sync {
    /// Shows the chooser and returns the raw selection
    ///
    /// `Ok(None)` means nothing was chosen. Implementations report a dismissed
    /// chooser as `AppError::UserCancelled`.
    async fn choose_folder(&self) -> Result<Option<String>, AppError>;
}

/// Converts a primary-volume `content://` URI into a filesystem path
///
/// Everything after `primary%3A` is percent-decoded and appended to
/// `/storage/emulated/0/`. Other URIs, or a URI with nothing after the
/// marker, are returned unchanged; later filesystem calls then fail on them.
pub fn normalize_content_uri(uri: &str) -> Result<String, AppError> {
    if !uri.starts_with(CONTENT_URI_SCHEME) {
        return Ok(uri.to_string());
    }

    let encoded = match uri.find(PRIMARY_VOLUME_MARKER) {
        Some(at) => &uri[at + PRIMARY_VOLUME_MARKER.len()..],
        None => return Ok(uri.to_string()),
    };
    if encoded.is_empty() {
        return Ok(uri.to_string());
    }

    let decoded = urlencoding::decode(encoded).map_err(|e| AppError::PickerFailed {
        message: format!("Malformed directory URI: {}", e),
    })?;

    Ok(format!("{}{}", ANDROID_PRIMARY_STORAGE, decoded))
}

/// Uniform result of a pick, as the host UI consumes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PickOutcome {
    /// True when the user dismissed the chooser; hosts must not alert
    pub fn is_cancelled(&self) -> bool {
        self.error.as_deref() == Some(USER_CANCELLED_MESSAGE)
    }
}

impl From<Result<PathBuf, AppError>> for PickOutcome {
    fn from(result: Result<PathBuf, AppError>) -> Self {
        match result {
            Ok(path) => Self {
                success: true,
                path: Some(path),
                error: None,
            },
            Err(e) => {
                let error = match e {
                    AppError::PickerFailed { message } => message,
                    other => other.to_string(),
                };
                Self {
                    success: false,
                    path: None,
                    error: Some(error),
                }
            }
        }
    }
}

/// Invokes the folder chooser and normalizes what it returns
pub struct DirectoryPicker<C> {
    platform: Platform,
    chooser: C,
}

impl<C: FolderChooser> DirectoryPicker<C> {
    pub fn new(platform: Platform, chooser: C) -> Self {
        Self { platform, chooser }
    }

    /// Asks the user for a source directory
    ///
    /// Cancellation surfaces as `AppError::UserCancelled`, which is silent.
    pub async fn pick_directory(&self) -> Result<PathBuf, AppError> {
        let selection = match self.chooser.choose_folder().await {
            Ok(selection) => selection,
            Err(AppError::UserCancelled) => {
                debug!("Directory selection cancelled");
                return Err(AppError::UserCancelled);
            }
            Err(e) => {
                warn!("Directory picker error: {}", e);
                return Err(e);
            }
        };

        let raw = match selection {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return Err(AppError::PickerFailed {
                    message: NO_SELECTION_MESSAGE.to_string(),
                })
            }
        };
        info!("Selected directory URI: {}", raw);

        let path = if self.platform.is_android() {
            let converted = normalize_content_uri(&raw)?;
            if converted != raw {
                info!("Converted file path: {}", converted);
            }
            converted
        } else {
            raw
        };

        Ok(PathBuf::from(path))
    }

    /// [`pick_directory`](Self::pick_directory) as a `{success, path, error}` value
    pub async fn pick(&self) -> PickOutcome {
        self.pick_directory().await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedChooser(fn() -> Result<Option<String>, AppError>);

    #[async_trait]
    impl FolderChooser for FixedChooser {
        async fn choose_folder(&self) -> Result<Option<String>, AppError> {
            (self.0)()
        }
    }

    const ANDROID: Platform = Platform::Android { api_level: 34 };

    #[test]
    fn test_primary_volume_uri_is_decoded() -> Result<(), AppError> {
        let uri = "content://com.android.externalstorage.documents/tree/primary%3ALRAD%2FAudio%20Files";
        assert_eq!(
            normalize_content_uri(uri)?,
            "/storage/emulated/0/LRAD/Audio Files"
        );
        Ok(())
    }

    #[test]
    fn test_unmatched_uri_is_returned_unchanged() -> Result<(), AppError> {
        let sd_card = "content://com.android.externalstorage.documents/tree/1A2B-3C4D%3AAudio";
        assert_eq!(normalize_content_uri(sd_card)?, sd_card);

        let bare_marker = "content://com.android.externalstorage.documents/tree/primary%3A";
        assert_eq!(normalize_content_uri(bare_marker)?, bare_marker);

        assert_eq!(normalize_content_uri("/sdcard/Audio")?, "/sdcard/Audio");
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_is_distinguished() {
        let picker = DirectoryPicker::new(ANDROID, FixedChooser(|| Err(AppError::UserCancelled)));
        let outcome = picker.pick().await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("User cancelled directory selection"));
        assert!(outcome.is_cancelled());
    }

    #[tokio::test]
    async fn test_no_selection() {
        let picker = DirectoryPicker::new(Platform::Ios, FixedChooser(|| Ok(None)));
        let outcome = picker.pick().await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("No directory selected"));
        assert!(!outcome.is_cancelled());
    }

    #[tokio::test]
    async fn test_android_selection_is_normalized() -> Result<(), AppError> {
        let picker = DirectoryPicker::new(
            ANDROID,
            FixedChooser(|| {
                Ok(Some(
                    "content://com.android.externalstorage.documents/tree/primary%3ADownload%2FLRAD"
                        .to_string(),
                ))
            }),
        );

        assert_eq!(
            picker.pick_directory().await?,
            PathBuf::from("/storage/emulated/0/Download/LRAD")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_ios_selection_is_passed_through() -> Result<(), AppError> {
        let picker = DirectoryPicker::new(
            Platform::Ios,
            FixedChooser(|| Ok(Some("file:///private/var/mobile/Audio".to_string()))),
        );

        assert_eq!(
            picker.pick_directory().await?,
            PathBuf::from("file:///private/var/mobile/Audio")
        );
        Ok(())
    }
}
