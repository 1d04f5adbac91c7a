//! Media engine bridge trait and lifecycle types.
//!
//! The core playback module never drives an audio pipeline itself; it issues
//! control commands to an embedded third-party media engine owned by the host
//! (a web player widget, a native wrapper, a test double). This abstraction
//! keeps the orchestration logic engine-agnostic and fully mockable.
//!
//! Commands flow downward through [`MediaEngine`]; lifecycle transitions flow
//! back asynchronously as [`EngineSignal`] values on a channel the host feeds.
//! The two directions are deliberately decoupled: command calls return as soon
//! as the engine accepts them, and observable state only changes when the
//! engine confirms via a signal.

use crate::error::Result;
use std::time::Duration;

/// Engine lifecycle state as last reported by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Engine object exists but has not finished initializing.
    Unstarted,
    /// Engine is initialized and will accept control commands.
    Ready,
    Playing,
    Paused,
    Buffering,
    /// Current track finished on its own.
    Ended,
    /// A track is loaded and cued but not yet rolling.
    Cued,
    /// Engine hit an unrecoverable error on the current track.
    Error,
}

impl EngineState {
    /// Whether the engine will accept control commands in this state.
    pub fn accepts_commands(&self) -> bool {
        !matches!(self, EngineState::Unstarted)
    }
}

/// Out-of-band lifecycle notification pushed by the host's engine binding.
///
/// Signals must be forwarded in the order the engine emitted them; the
/// orchestrator relies on arrival order to reconcile its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    /// Engine finished initializing; commands may now be issued.
    Ready,
    Playing,
    Paused,
    Buffering,
    /// A track was loaded and cued without autoplay.
    Cued,
    /// The current track played to completion.
    Ended,
    /// The engine failed on the current track with a vendor error code.
    Error { code: i32 },
}

impl EngineSignal {
    /// Human-readable description for logging.
    pub fn description(&self) -> String {
        match self {
            EngineSignal::Ready => "engine ready".to_string(),
            EngineSignal::Playing => "playback started".to_string(),
            EngineSignal::Paused => "playback paused".to_string(),
            EngineSignal::Buffering => "buffering".to_string(),
            EngineSignal::Cued => "track cued".to_string(),
            EngineSignal::Ended => "track ended".to_string(),
            EngineSignal::Error { code } => format!("engine error (code {})", code),
        }
    }
}

/// Trait for host bindings that drive an embedded media engine.
///
/// All methods are async because the underlying binding typically crosses a
/// process or script boundary. Implementations must be safe to call from any
/// task; the core guarantees only one component issues commands at a time.
#[async_trait::async_trait]
pub trait MediaEngine: Send + Sync {
    /// Load the track with the given external identifier and start playback.
    async fn load_track(&self, track_id: &str) -> Result<()>;

    /// Begin or resume playback of the loaded track.
    async fn play(&self) -> Result<()>;

    /// Pause playback without unloading the track.
    async fn pause(&self) -> Result<()>;

    /// Seek to an absolute position within the current track.
    async fn seek(&self, position: Duration) -> Result<()>;

    /// Adjust playback volume. Volume is a percentage in `0..=100`.
    async fn set_volume(&self, level: u8) -> Result<()>;

    /// Query the current playback position.
    async fn position(&self) -> Result<Duration>;

    /// Query the duration of the loaded track.
    async fn duration(&self) -> Result<Duration>;

    /// Fetch the engine's current understanding of its lifecycle state.
    async fn engine_state(&self) -> Result<EngineState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_rejects_commands() {
        assert!(!EngineState::Unstarted.accepts_commands());
        assert!(EngineState::Ready.accepts_commands());
        assert!(EngineState::Paused.accepts_commands());
    }

    #[test]
    fn error_signal_description_includes_code() {
        let signal = EngineSignal::Error { code: 150 };
        assert!(signal.description().contains("150"));
    }
}
