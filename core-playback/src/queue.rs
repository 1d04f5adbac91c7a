//! Play queue with a cursor over an ordered track list.
//!
//! All transitions are pure and synchronous; the orchestrator decides when a
//! transition should also drive the engine. The invariant maintained here is
//! that the cursor never points outside a non-empty queue, and navigation at
//! the edges never wraps.

use crate::error::{PlaybackError, Result};
use core_metadata::Track;
use serde::{Deserialize, Serialize};

/// Ordered track list plus cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    cursor: usize,
}

impl PlayQueue {
    /// Build a queue from a track list and a requested start position.
    ///
    /// An out-of-range start position on a non-empty list is clamped to the
    /// first track rather than rejected; callers handing over a whole new
    /// queue should always end up somewhere playable.
    pub fn new(tracks: Vec<Track>, start_index: usize) -> Self {
        let cursor = if start_index < tracks.len() {
            start_index
        } else {
            0
        };
        Self { tracks, cursor }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Cursor position. Meaningless when the queue is empty.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Track at the cursor, or `None` when the queue is empty.
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.cursor)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Whether the cursor sits on the final track.
    pub fn is_at_end(&self) -> bool {
        !self.tracks.is_empty() && self.cursor + 1 == self.tracks.len()
    }

    /// Move the cursor forward. Returns `false` without changing anything
    /// when already at the last track (no wrap-around).
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.tracks.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor backward. Returns `false` without changing anything
    /// when already at the first track (no wrap-around).
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 && !self.tracks.is_empty() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an explicit position. Out-of-range positions are rejected
    /// and leave the cursor untouched.
    pub fn jump(&mut self, index: usize) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }
        if index >= self.tracks.len() {
            return Err(PlaybackError::InvalidIndex {
                index,
                len: self.tracks.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_metadata::{ThumbnailSet, TrackId};

    fn track(id: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Track {}", id),
            display_artist: "Artist".to_string(),
            thumbnails: ThumbnailSet {
                default_url: String::new(),
                medium_url: String::new(),
                high_url: String::new(),
            },
            duration_text: "3:00".to_string(),
            published_at: None,
        }
    }

    fn queue_of(n: usize, start: usize) -> PlayQueue {
        let tracks = (0..n).map(|i| track(&i.to_string())).collect();
        PlayQueue::new(tracks, start)
    }

    #[test]
    fn out_of_range_start_clamps_to_zero() {
        let q = queue_of(3, 99);
        assert_eq!(q.cursor(), 0);
        assert_eq!(q.current().unwrap().id.as_str(), "0");
    }

    #[test]
    fn in_range_start_is_kept() {
        let q = queue_of(3, 2);
        assert_eq!(q.cursor(), 2);
    }

    #[test]
    fn empty_queue_has_no_current() {
        let q = PlayQueue::new(Vec::new(), 5);
        assert!(q.is_empty());
        assert!(q.current().is_none());
        assert!(!q.is_at_end());
    }

    #[test]
    fn advance_stops_at_end_without_wrapping() {
        let mut q = queue_of(2, 0);
        assert!(q.advance());
        assert_eq!(q.cursor(), 1);
        assert!(q.is_at_end());

        // At the end, advancing changes nothing.
        assert!(!q.advance());
        assert_eq!(q.cursor(), 1);
    }

    #[test]
    fn retreat_stops_at_zero_without_wrapping() {
        let mut q = queue_of(2, 1);
        assert!(q.retreat());
        assert_eq!(q.cursor(), 0);

        assert!(!q.retreat());
        assert_eq!(q.cursor(), 0);
    }

    #[test]
    fn jump_rejects_out_of_range_and_preserves_cursor() {
        let mut q = queue_of(3, 1);
        let err = q.jump(3).unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::InvalidIndex { index: 3, len: 3 }
        ));
        assert_eq!(q.cursor(), 1);

        q.jump(2).unwrap();
        assert_eq!(q.cursor(), 2);
    }

    #[test]
    fn jump_on_empty_queue_reports_empty() {
        let mut q = PlayQueue::new(Vec::new(), 0);
        let err = q.jump(0).unwrap_err();
        assert!(matches!(err, PlaybackError::EmptyQueue));
        assert!(err.is_caller_error());
    }

    #[test]
    fn single_track_queue_is_immediately_at_end() {
        let mut q = queue_of(1, 0);
        assert!(q.is_at_end());
        assert!(!q.advance());
        assert!(!q.retreat());
    }
}
