//! # Suggestion and Search Services
//!
//! Debounced, cached suggestion resolution plus the degrade-to-empty track
//! search wrapper.
//!
//! ## Overview
//!
//! Suggestion requests arrive once per keystroke, so [`SuggestionService`]
//! keeps a single pending-debounce slot: scheduling a new request aborts the
//! previous one if it has not fired yet, and only the newest request ever
//! invokes its callback. Resolved primary suggestions are cached for the
//! lifetime of the service under the normalized query; fallback-derived
//! suggestions are not cached, so a later retry gets another shot at the
//! primary source.
//!
//! Nothing in this module surfaces an error to its caller. A search box that
//! throws is worse than a search box with no dropdown, so every failure path
//! degrades to an empty result and a log line.

use crate::error::SearchError;
use crate::suggest::SuggestClient;
use crate::video::VideoSearchClient;
use core_metadata::Track;
use core_runtime::{CoreEvent, EventBus, SearchEvent};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Primary suggestions kept per query.
const PRIMARY_CAP: usize = 8;
/// Fallback suggestions derived from search-result titles.
const FALLBACK_CAP: usize = 5;
/// Queries shorter than this resolve to empty without touching the network.
const MIN_QUERY_CHARS: usize = 2;

fn parenthetical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*?\)|\[.*?\]").unwrap())
}

fn boilerplate_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(official|video|song|music|lyrical|full)\b").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Debounced autocomplete resolution over a primary suggest source with a
/// title-derived fallback.
pub struct SuggestionService {
    suggest: Arc<SuggestClient>,
    fallback: Option<Arc<VideoSearchClient>>,
    events: EventBus,
    /// Normalized query -> primary suggestions. Session lifetime, never
    /// invalidated.
    cache: Mutex<HashMap<String, Vec<String>>>,
    /// The one not-yet-fired debounce task, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestionService {
    /// Create a service. Without a fallback client (no API key configured)
    /// only the primary source is consulted.
    pub fn new(
        suggest: Arc<SuggestClient>,
        fallback: Option<Arc<VideoSearchClient>>,
        events: EventBus,
    ) -> Self {
        Self {
            suggest,
            fallback,
            events,
            cache: Mutex::new(HashMap::new()),
            pending: Mutex::new(None),
        }
    }

    /// Schedule a debounced suggestion resolution.
    ///
    /// Any previously scheduled request that has not fired yet is aborted;
    /// its callback never runs. After `delay`, the query resolves and
    /// `on_result` is invoked exactly once with the outcome (possibly
    /// empty). A cache hit skips the network but still honors the delay.
    pub fn request_suggestions<F>(self: &Arc<Self>, query: &str, delay: Duration, on_result: F)
    where
        F: FnOnce(Vec<String>) + Send + 'static,
    {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }

        let service = Arc::clone(self);
        let query = query.to_string();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let suggestions = service.resolve(&query).await;
            service
                .events
                .emit(CoreEvent::Search(SearchEvent::SuggestionsReady {
                    query: query.clone(),
                    suggestions: suggestions.clone(),
                }))
                .ok();
            on_result(suggestions);
        });

        *self.pending.lock() = Some(handle);
    }

    /// Resolve a query immediately, bypassing the debounce slot.
    pub async fn resolve(&self, raw_query: &str) -> Vec<String> {
        let normalized = raw_query.trim().to_lowercase();
        if normalized.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        if let Some(hit) = self.cache.lock().get(&normalized) {
            debug!(query = %normalized, "Suggestion cache hit");
            return hit.clone();
        }

        match self.suggest.fetch(&normalized).await {
            Ok(primary) => {
                // A successful answer is authoritative even when empty; only
                // a failed primary lookup consults the fallback.
                let capped: Vec<String> = primary.into_iter().take(PRIMARY_CAP).collect();
                self.cache.lock().insert(normalized, capped.clone());
                capped
            }
            Err(e) => {
                warn!(query = %normalized, error = %e, "Primary suggestion source failed");
                self.fallback_suggestions(&normalized).await
            }
        }
    }

    /// Derive suggestions from search-result titles. Intentionally not
    /// cached: a later request for the same query retries the primary
    /// source first.
    async fn fallback_suggestions(&self, normalized: &str) -> Vec<String> {
        let Some(fallback) = &self.fallback else {
            return Vec::new();
        };

        let query = format!("{} music", normalized);
        match fallback.search_titles(&query, FALLBACK_CAP as u8).await {
            Ok(titles) => {
                let suggestions = clean_titles(titles);
                debug!(
                    query = %normalized,
                    count = suggestions.len(),
                    "Derived fallback suggestions from search titles"
                );
                suggestions
            }
            Err(e) => {
                warn!(query = %normalized, error = %e, "Fallback suggestion search failed");
                Vec::new()
            }
        }
    }
}

/// Turn raw result titles into suggestion strings: strip parenthetical and
/// bracketed text, drop boilerplate words, collapse whitespace, de-duplicate
/// preserving order, cap at [`FALLBACK_CAP`].
fn clean_titles(titles: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for title in titles {
        let cleaned = parenthetical_re().replace_all(&title, " ");
        let cleaned = boilerplate_word_re().replace_all(&cleaned, " ");
        let cleaned = whitespace_re().replace_all(&cleaned, " ");
        let cleaned = cleaned.trim().to_string();
        if cleaned.len() <= 1 {
            continue;
        }
        if seen.insert(cleaned.to_lowercase()) {
            out.push(cleaned);
        }
        if out.len() == FALLBACK_CAP {
            break;
        }
    }
    out
}

/// Degrade-to-empty wrapper over [`VideoSearchClient`] that reports search
/// completion on the event bus.
pub struct SearchService {
    video: Arc<VideoSearchClient>,
    events: EventBus,
}

impl SearchService {
    pub fn new(video: Arc<VideoSearchClient>, events: EventBus) -> Self {
        Self { video, events }
    }

    /// Search the catalog. Failures are logged and reported as zero results
    /// rather than propagated.
    pub async fn search(&self, query: &str, max_results: u8) -> Vec<Track> {
        let tracks = match self.video.search(query, max_results).await {
            Ok(tracks) => tracks,
            Err(e) => {
                log_search_failure(query, &e);
                Vec::new()
            }
        };
        self.events
            .emit(CoreEvent::Search(SearchEvent::SearchCompleted {
                query: query.to_string(),
                result_count: tracks.len(),
            }))
            .ok();
        tracks
    }
}

fn log_search_failure(query: &str, error: &SearchError) {
    if error.is_transient() {
        warn!(query, error = %error, "Search failed (transient)");
    } else {
        warn!(query, error = %error, "Search failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_titles_strips_noise_and_dedupes() {
        let titles = vec![
            "Tum Hi Ho (Official Video) [4K]".to_string(),
            "Tum Hi Ho - Full Song".to_string(),
            "tum hi ho".to_string(),
            "Raabta Lyrical".to_string(),
        ];
        let cleaned = clean_titles(titles);
        // "tum hi ho" collapses into the first entry; "Lyrical" is
        // boilerplate and gets stripped.
        assert_eq!(
            cleaned,
            vec![
                "Tum Hi Ho".to_string(),
                "Tum Hi Ho -".to_string(),
                "Raabta".to_string(),
            ]
        );
    }

    #[test]
    fn clean_titles_caps_at_five() {
        let titles: Vec<String> = (0..10).map(|i| format!("Track number {}", i)).collect();
        assert_eq!(clean_titles(titles).len(), FALLBACK_CAP);
    }

    #[test]
    fn clean_titles_drops_empty_leftovers() {
        let titles = vec!["(Official Video)".to_string(), "Music".to_string()];
        assert!(clean_titles(titles).is_empty());
    }
}
