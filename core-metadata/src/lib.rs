//! # Core Metadata
//!
//! Track model and metadata normalization for the playback core.
//!
//! ## Overview
//!
//! Catalog payloads arrive messy: artist credit buried in the title, ISO-8601
//! duration codes, label accounts posing as artists. This crate turns those
//! payloads into clean, immutable [`Track`] values:
//!
//! - [`derive_artist`] - ordered heuristics for a best-effort display artist
//! - [`classify_mood`] - keyword-based mood tag for presentation theming
//! - [`format_duration_code`] / [`parse_duration_code`] - `PT#H#M#S` handling
//!
//! Everything here is pure and synchronous; network retrieval lives in
//! `core-search`.

pub mod artist;
pub mod duration;
pub mod model;
pub mod mood;

pub use artist::{derive_artist, UNKNOWN_ARTIST};
pub use duration::{format_duration_code, parse_duration_code};
pub use model::{ThumbnailSet, Track, TrackId};
pub use mood::{classify_mood, MoodTag};
