//! Owned player session over an external media transport

use crate::error::{LibraryError, Result};
use crate::resolver::{PlaybackResolver, TrackEntry};
use async_trait::async_trait;
use hailcast_core::{AppError, Category, Language, TrackId};
use log::{debug, info};
use std::time::Duration;
use thiserror::Error;

/// Playback state reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Ready,
    Playing,
    Paused,
    Stopped,
}

/// Failures reported by the transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("The player has already been initialized")]
    AlreadyInitialized,

    #[error("{0}")]
    Rejected(String),
}

impl From<TransportError> for LibraryError {
    fn from(err: TransportError) -> Self {
        LibraryError::App(AppError::Playback {
            message: err.to_string(),
        })
    }
}

/// Options applied when the transport is set up
#[derive(Debug, Clone, PartialEq)]
pub struct TransportOptions {
    pub progress_interval: Duration,
    pub repeat: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_secs(1),
            repeat: false,
        }
    }
}

/// External media-session component
#[async_trait]
pub trait Transport: Send + Sync {
    async fn setup(&self, options: &TransportOptions) -> std::result::Result<(), TransportError>;
    async fn reset(&self) -> std::result::Result<(), TransportError>;
    async fn add(&self, tracks: &[TrackEntry]) -> std::result::Result<(), TransportError>;
    async fn play(&self) -> std::result::Result<(), TransportError>;
    async fn pause(&self) -> std::result::Result<(), TransportError>;
    async fn state(&self) -> std::result::Result<TransportState, TransportError>;
    async fn skip_to_next(&self) -> std::result::Result<(), TransportError>;
    async fn skip_to_previous(&self) -> std::result::Result<(), TransportError>;
}

/// A set-up transport plus the resolver that feeds it
///
/// Holding a session is proof the transport was initialized; `cleanup`
/// consumes it.
pub struct PlayerSession<T> {
    transport: T,
    resolver: PlaybackResolver,
}

impl<T: Transport> PlayerSession<T> {
    /// Sets up `transport`; an already initialized transport counts as success
    pub async fn setup(
        transport: T,
        resolver: PlaybackResolver,
        options: &TransportOptions,
    ) -> Result<Self> {
        match transport.setup(options).await {
            Ok(()) => info!("Player setup completed"),
            Err(TransportError::AlreadyInitialized) => info!("Player was already initialized"),
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            transport,
            resolver,
        })
    }

    pub fn resolver(&self) -> &PlaybackResolver {
        &self.resolver
    }

    /// Replaces the queue with a category playlist
    pub async fn load_category(
        &self,
        language: Language,
        category: Category,
    ) -> Result<Vec<TrackEntry>> {
        let tracks = self.resolver.load_category(language, category).await;
        debug!("Loaded {} {} track(s) for {}", tracks.len(), category, language);

        self.transport.reset().await?;
        self.transport.add(&tracks).await?;
        Ok(tracks)
    }

    /// Plays one track, resolving its file through the fallback chain
    ///
    /// `track_id` is a `{language}-{category}-{n}` id or a bare number.
    pub async fn play_track(
        &self,
        track_id: &str,
        language: Language,
        category: Category,
    ) -> Result<TrackEntry> {
        let track = TrackId::parse_track(track_id)?;
        let path = self.resolver.resolve_path(language, track).await?;
        info!("Playing audio file: {}", path.display());

        let entry = TrackEntry::new(language, category, track, &path);
        self.transport.reset().await?;
        self.transport.add(std::slice::from_ref(&entry)).await?;
        self.transport.play().await?;
        Ok(entry)
    }

    /// Pauses when playing, plays otherwise; returns the new state
    pub async fn toggle_playback(&self) -> Result<TransportState> {
        if self.transport.state().await? == TransportState::Playing {
            self.transport.pause().await?;
            Ok(TransportState::Paused)
        } else {
            self.transport.play().await?;
            Ok(TransportState::Playing)
        }
    }

    pub async fn skip_to_next(&self) -> Result<()> {
        Ok(self.transport.skip_to_next().await?)
    }

    pub async fn skip_to_previous(&self) -> Result<()> {
        Ok(self.transport.skip_to_previous().await?)
    }

    /// Clears the queue and ends the session, handing back the transport
    pub async fn cleanup(self) -> Result<T> {
        self.transport.reset().await?;
        info!("Player session closed");
        Ok(self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubTransport {
        state: Mutex<Option<TransportState>>,
        fail_setup: bool,
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn setup(&self, _: &TransportOptions) -> std::result::Result<(), TransportError> {
            if self.fail_setup {
                Err(TransportError::Rejected("no audio focus".to_string()))
            } else {
                Err(TransportError::AlreadyInitialized)
            }
        }
        async fn reset(&self) -> std::result::Result<(), TransportError> {
            Ok(())
        }
        async fn add(&self, _: &[TrackEntry]) -> std::result::Result<(), TransportError> {
            Ok(())
        }
        async fn play(&self) -> std::result::Result<(), TransportError> {
            *self.state.lock().expect("state lock") = Some(TransportState::Playing);
            Ok(())
        }
        async fn pause(&self) -> std::result::Result<(), TransportError> {
            *self.state.lock().expect("state lock") = Some(TransportState::Paused);
            Ok(())
        }
        async fn state(&self) -> std::result::Result<TransportState, TransportError> {
            Ok(self.state.lock().expect("state lock").unwrap_or(TransportState::Idle))
        }
        async fn skip_to_next(&self) -> std::result::Result<(), TransportError> {
            Ok(())
        }
        async fn skip_to_previous(&self) -> std::result::Result<(), TransportError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_already_initialized_is_success() -> Result<()> {
        let session = PlayerSession::setup(
            StubTransport::default(),
            PlaybackResolver::new("/a"),
            &TransportOptions::default(),
        )
        .await?;
        session.cleanup().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_setup_failure_is_playback_error() {
        let transport = StubTransport {
            fail_setup: true,
            ..Default::default()
        };
        let result =
            PlayerSession::setup(transport, PlaybackResolver::new("/a"), &TransportOptions::default())
                .await;
        assert!(matches!(
            result,
            Err(LibraryError::App(AppError::Playback { .. }))
        ));
    }

    #[tokio::test]
    async fn test_toggle_alternates() -> Result<()> {
        let session = PlayerSession::setup(
            StubTransport::default(),
            PlaybackResolver::new("/a"),
            &TransportOptions::default(),
        )
        .await?;

        assert_eq!(session.toggle_playback().await?, TransportState::Playing);
        assert_eq!(session.toggle_playback().await?, TransportState::Paused);
        assert_eq!(session.toggle_playback().await?, TransportState::Playing);
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_track_id_is_rejected() -> Result<()> {
        let session = PlayerSession::setup(
            StubTransport::default(),
            PlaybackResolver::new("/a"),
            &TransportOptions::default(),
        )
        .await?;

        let result = session
            .play_track("English-Warning", Language::ENGLISH, Category::Warning)
            .await;
        assert!(matches!(
            result,
            Err(LibraryError::App(AppError::InvalidArgument { .. }))
        ));
        Ok(())
    }
}
