//! # Core Playback
//!
//! Queue management and engine orchestration for the playback core.
//!
//! This crate never touches an audio pipeline. It drives an injected
//! [`bridge_traits::MediaEngine`] binding, reconciles the engine's lifecycle
//! signals into a [`PlayerState`] snapshot, and publishes confirmed
//! transitions on the runtime event bus. Auto-advance through the queue
//! happens here, including skipping over tracks the engine fails on.

pub mod error;
pub mod orchestrator;
pub mod queue;
pub mod state;

pub use error::{PlaybackError, Result};
pub use orchestrator::PlayerOrchestrator;
pub use queue::PlayQueue;
pub use state::PlayerState;
