//! Storage access permission, tiered by Android API level

use async_trait::async_trait;
use hailcast_core::{AppError, Platform};
use log::{debug, info, warn};
use serde::Serialize;

/// Runtime permissions the app asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuntimePermission {
    ReadMediaAudio,
    WriteExternalStorage,
}

impl RuntimePermission {
    /// Android manifest name
    pub fn android_name(&self) -> &'static str {
        match self {
            Self::ReadMediaAudio => "android.permission.READ_MEDIA_AUDIO",
            Self::WriteExternalStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
        }
    }
}

/// Rationale dialog shown with a runtime permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub button_neutral: &'static str,
    pub button_negative: &'static str,
    pub button_positive: &'static str,
}

pub const MEDIA_AUDIO_PROMPT: PermissionPrompt = PermissionPrompt {
    title: "Audio Permission",
    message: "Voice Command App needs access to audio files to play commands.",
    button_neutral: "Ask Me Later",
    button_negative: "Cancel",
    button_positive: "OK",
};

pub const STORAGE_PROMPT: PermissionPrompt = PermissionPrompt {
    title: "Storage Permission",
    message: "Voice Command App needs access to storage to play audio commands.",
    button_neutral: "Ask Me Later",
    button_negative: "Cancel",
    button_positive: "OK",
};

/// Alert walking the user to the all-files-access settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsGuide {
    pub title: &'static str,
    pub message: &'static str,
    pub settings_button: &'static str,
    pub cancel_button: &'static str,
}

pub const ALL_FILES_GUIDE: SettingsGuide = SettingsGuide {
    title: "Grant All Files Access",
    message: "To use this feature, please grant \"All files access\" to LRAD in the next screen.\n\n\
              1. Tap \"Allow\" or enable the switch for LRAD.\n\
              2. Return to this app and retry.\n\n\
              If you do not grant access, audio features will not work.",
    settings_button: "Go to Settings",
    cancel_button: "Cancel",
};

/// How storage access is obtained on a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageStrategy {
    /// API 33+: runtime READ_MEDIA_AUDIO
    MediaAudio,
    /// API 30-32: the all-files-access setting, granted outside the app
    AllFilesAccess,
    /// Below API 30: runtime WRITE_EXTERNAL_STORAGE
    LegacyStorage,
    /// Not Android; always granted
    NotRequired,
}

impl StorageStrategy {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Android { api_level } if api_level >= Platform::MEDIA_AUDIO_API_LEVEL => {
                Self::MediaAudio
            }
            Platform::Android { api_level } if api_level >= Platform::ALL_FILES_API_LEVEL => {
                Self::AllFilesAccess
            }
            Platform::Android { .. } => Self::LegacyStorage,
            _ => Self::NotRequired,
        }
    }

    /// Runtime permission and prompt for the direct-request tiers
    pub fn runtime_permission(&self) -> Option<(RuntimePermission, PermissionPrompt)> {
        match self {
            Self::MediaAudio => Some((RuntimePermission::ReadMediaAudio, MEDIA_AUDIO_PROMPT)),
            Self::LegacyStorage => Some((RuntimePermission::WriteExternalStorage, STORAGE_PROMPT)),
            Self::AllFilesAccess | Self::NotRequired => None,
        }
    }
}

/// Host permission APIs
#[async_trait]
pub trait PermissionBackend: Send + Sync {
    /// Whether a runtime permission is currently granted
    async fn check(&self, permission: RuntimePermission) -> Result<bool, AppError>;

    /// Requests a runtime permission, showing `prompt` as the rationale
    async fn request(
        &self,
        permission: RuntimePermission,
        prompt: &PermissionPrompt,
    ) -> Result<bool, AppError>;

    /// All-files-access flag; `None` when the native module is unavailable
    async fn has_all_files_access(&self) -> Result<Option<bool>, AppError>;

    /// Presents `guide`; its settings button opens the system screen
    async fn show_settings_guide(&self, guide: &SettingsGuide) -> Result<(), AppError>;
}

/// Checks and requests storage access for the running platform
///
/// Both operations answer with a plain bool; backend errors count as "not
/// granted". After the all-files guide is shown the grant happens outside
/// the app, so callers re-run the check when the user returns.
pub struct PermissionGate<B> {
    strategy: StorageStrategy,
    backend: B,
}

impl<B: PermissionBackend> PermissionGate<B> {
    pub fn new(platform: Platform, backend: B) -> Self {
        Self {
            strategy: StorageStrategy::for_platform(platform),
            backend,
        }
    }

    pub fn strategy(&self) -> StorageStrategy {
        self.strategy
    }

    pub async fn check_permission(&self) -> bool {
        debug!("Checking storage permission ({:?})", self.strategy);
        match self.try_check().await {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Error checking storage permission: {}", e);
                false
            }
        }
    }

    pub async fn request_permission(&self) -> bool {
        info!("Requesting storage permission ({:?})", self.strategy);
        match self.try_request().await {
            Ok(granted) => {
                info!("Storage permission granted: {}", granted);
                granted
            }
            Err(e) => {
                warn!("Error requesting storage permission: {}", e);
                false
            }
        }
    }

    async fn try_check(&self) -> Result<bool, AppError> {
        match self.strategy {
            StorageStrategy::NotRequired => Ok(true),
            StorageStrategy::AllFilesAccess => self.all_files_flag().await,
            StorageStrategy::MediaAudio | StorageStrategy::LegacyStorage => {
                match self.strategy.runtime_permission() {
                    Some((permission, _)) => self.backend.check(permission).await,
                    None => Ok(false),
                }
            }
        }
    }

    async fn try_request(&self) -> Result<bool, AppError> {
        match self.strategy {
            StorageStrategy::NotRequired => Ok(true),
            StorageStrategy::AllFilesAccess => match self.backend.has_all_files_access().await? {
                Some(true) => Ok(true),
                Some(false) => {
                    self.backend.show_settings_guide(&ALL_FILES_GUIDE).await?;
                    Ok(false)
                }
                None => {
                    warn!("ManageExternalStorage native module not available");
                    Ok(false)
                }
            },
            StorageStrategy::MediaAudio | StorageStrategy::LegacyStorage => {
                match self.strategy.runtime_permission() {
                    Some((permission, prompt)) => self.backend.request(permission, &prompt).await,
                    None => Ok(false),
                }
            }
        }
    }

    async fn all_files_flag(&self) -> Result<bool, AppError> {
        match self.backend.has_all_files_access().await? {
            Some(granted) => Ok(granted),
            None => {
                warn!("ManageExternalStorage native module not available");
                Ok(false)
            }
        }
    }
}
