//! Track model shared across the search and playback layers.
//!
//! A [`Track`] is an immutable value assembled once from a validated search
//! payload. Nothing downstream mutates it; corrections happen by replacing
//! the whole value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the external catalog.
///
/// The core never inspects or synthesizes these; they are accepted verbatim
/// from search payloads and handed back to the media engine for loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Artwork URLs at the three resolutions the catalog serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSet {
    pub default_url: String,
    pub medium_url: String,
    pub high_url: String,
}

impl ThumbnailSet {
    /// Best available artwork URL, preferring higher resolutions.
    pub fn best(&self) -> &str {
        if !self.high_url.is_empty() {
            &self.high_url
        } else if !self.medium_url.is_empty() {
            &self.medium_url
        } else {
            &self.default_url
        }
    }
}

/// A playable catalog entry.
///
/// `display_artist` is derived by [`derive_artist`](crate::derive_artist) at
/// construction time and is best-effort, never authoritative.
/// `duration_text` is pre-rendered for display by
/// [`format_duration_code`](crate::format_duration_code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub display_artist: String,
    pub thumbnails: ThumbnailSet,
    pub duration_text: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_round_trips_through_serde() {
        let id = TrackId::new("dQw4w9WgXcQ");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dQw4w9WgXcQ\"");
        let back: TrackId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn thumbnail_best_prefers_high() {
        let thumbs = ThumbnailSet {
            default_url: "d".to_string(),
            medium_url: "m".to_string(),
            high_url: "h".to_string(),
        };
        assert_eq!(thumbs.best(), "h");

        let no_high = ThumbnailSet {
            high_url: String::new(),
            ..thumbs
        };
        assert_eq!(no_high.best(), "m");
    }
}
