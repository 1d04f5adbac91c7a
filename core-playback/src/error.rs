//! # Playback Error Types
//!
//! Error types for queue navigation and engine control.

use thiserror::Error;

/// Errors that can occur during playback operations.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Queue Errors
    // ========================================================================
    /// Requested queue index does not exist.
    #[error("Queue index {index} out of range (queue length {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Operation requires a non-empty queue.
    #[error("Queue is empty")]
    EmptyQueue,

    // ========================================================================
    // Engine Errors
    // ========================================================================
    /// The engine has not reported readiness yet. Control surfaces treat
    /// this as a silent no-op rather than surfacing it.
    #[error("Media engine not ready")]
    EngineNotReady,

    /// The engine binding rejected or failed a command.
    #[error("Engine command failed: {0}")]
    Engine(#[from] bridge_traits::BridgeError),
}

impl PlaybackError {
    /// Returns `true` if the error stems from caller input rather than the
    /// engine or environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PlaybackError::InvalidIndex { .. } | PlaybackError::EmptyQueue
        )
    }

    /// Returns `true` if this error is transient and the operation may
    /// succeed later without caller intervention.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlaybackError::EngineNotReady | PlaybackError::Engine(_)
        )
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_message_names_both_values() {
        let err = PlaybackError::InvalidIndex { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
        assert!(err.is_caller_error());
        assert!(!err.is_transient());
    }

    #[test]
    fn engine_not_ready_is_transient() {
        assert!(PlaybackError::EngineNotReady.is_transient());
    }
}
