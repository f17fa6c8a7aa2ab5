// FILE: crates/cli/src/desktop.rs
//! Terminal stand-ins for the host folder chooser and permission APIs

use async_trait::async_trait;
use console::{style, Term};
use hailcast_core::AppError;
use hailcast_library::{
    FolderChooser, PermissionBackend, PermissionPrompt, RuntimePermission, SettingsGuide,
};
use log::debug;

/// Answers typed at the prompt that dismiss it
const DISMISS_ANSWERS: [&str; 2] = ["q", "quit"];

/// Folder chooser backed by a command-line argument or a terminal prompt
pub struct TerminalChooser {
    preset: Option<String>,
}

impl TerminalChooser {
    pub fn new(preset: Option<String>) -> Self {
        Self { preset }
    }
}

/// Maps a typed answer to a chooser result
///
/// Blank means nothing was chosen; `q` dismisses the chooser.
pub fn interpret_answer(answer: &str) -> Result<Option<String>, AppError> {
    let answer = answer.trim();
    if DISMISS_ANSWERS.contains(&answer) {
        return Err(AppError::UserCancelled);
    }
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

#[async_trait]
impl FolderChooser for TerminalChooser {
    async fn choose_folder(&self) -> Result<Option<String>, AppError> {
        if let Some(preset) = &self.preset {
            return Ok(Some(preset.clone()));
        }

        let answer = tokio::task::spawn_blocking(|| {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} Enter the directory containing your voice command audio files ({} to cancel):",
                style("?").cyan().bold(),
                style("q").bold()
            ))?;
            term.read_line()
        })
        .await
        .map_err(|e| AppError::PickerFailed {
            message: e.to_string(),
        })?
        .map_err(|e| AppError::PickerFailed {
            message: e.to_string(),
        })?;

        interpret_answer(&answer)
    }
}

/// Desktop storage is always accessible
pub struct DesktopPermissions;

#[async_trait]
impl PermissionBackend for DesktopPermissions {
    async fn check(&self, permission: RuntimePermission) -> Result<bool, AppError> {
        debug!("{} is implied on desktop", permission.android_name());
        Ok(true)
    }

    async fn request(
        &self,
        _permission: RuntimePermission,
        _prompt: &PermissionPrompt,
    ) -> Result<bool, AppError> {
        Ok(true)
    }

    async fn has_all_files_access(&self) -> Result<Option<bool>, AppError> {
        Ok(Some(true))
    }

    async fn show_settings_guide(&self, guide: &SettingsGuide) -> Result<(), AppError> {
        println!("{}\n{}", style(guide.title).bold(), guide.message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_answer() {
        assert_eq!(interpret_answer("  /data/audio \n").unwrap(), Some("/data/audio".to_string()));
        assert_eq!(interpret_answer("").unwrap(), None);
        assert!(matches!(interpret_answer("q"), Err(AppError::UserCancelled)));
    }

    #[tokio::test]
    async fn test_preset_skips_prompt() {
        let chooser = TerminalChooser::new(Some("/data/audio".to_string()));
        assert_eq!(
            chooser.choose_folder().await.unwrap(),
            Some("/data/audio".to_string())
        );
    }

    #[tokio::test]
    async fn test_desktop_permissions_grant() {
        let backend = DesktopPermissions;
        assert!(backend.check(RuntimePermission::ReadMediaAudio).await.unwrap());
        assert_eq!(backend.has_all_files_access().await.unwrap(), Some(true));
    }
}
