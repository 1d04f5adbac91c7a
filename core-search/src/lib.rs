//! # Core Search
//!
//! Suggestion and catalog search layer for the playback core.
//!
//! Two remote sources sit behind this crate: a public autocomplete endpoint
//! ([`SuggestClient`]) and the keyed catalog data API
//! ([`VideoSearchClient`]). [`SuggestionService`] combines them with a
//! per-keystroke debounce and a session cache; [`SearchService`] wraps track
//! search so callers only ever see a (possibly empty) track list.
//!
//! All network traffic goes through the injected
//! [`bridge_traits::HttpClient`], so every path here is testable against a
//! scripted transport.

pub mod error;
pub mod service;
pub mod suggest;
pub mod video;

pub use error::{Result, SearchError};
pub use service::{SearchService, SuggestionService};
pub use suggest::SuggestClient;
pub use video::VideoSearchClient;
