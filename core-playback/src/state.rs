//! Observable playback state snapshot.

use crate::queue::PlayQueue;
use core_metadata::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A point-in-time copy of everything a presentation layer needs to render
/// the player.
///
/// `is_playing` reflects engine confirmations only; issuing a play command
/// does not flip it. `position` and `duration` are refreshed once per poll
/// interval while playing and go stale between polls by design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub queue: PlayQueue,
    pub is_playing: bool,
    pub position: Duration,
    pub duration: Duration,
    /// Volume percentage 0-100. Updated immediately on request without
    /// waiting for engine confirmation.
    pub volume: u8,
}

impl PlayerState {
    pub(crate) fn new(volume: u8) -> Self {
        Self {
            volume,
            ..Default::default()
        }
    }

    /// Track at the queue cursor, or `None` when the queue is empty.
    ///
    /// Always consistent with `current_index()`; both come from the same
    /// queue snapshot.
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Queue cursor position.
    pub fn current_index(&self) -> usize {
        self.queue.cursor()
    }
}
