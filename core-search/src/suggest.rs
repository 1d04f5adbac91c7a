//! Autocomplete Suggestion Client
//!
//! Primary suggestion source backed by the public autocomplete endpoint.
//!
//! The endpoint answers with a JSONP-wrapped JSON array: the payload of
//! interest is the bracketed array inside the callback invocation, whose
//! second element lists the suggestions. Depending on the `client`
//! parameter each suggestion is either a bare string or a `[text, rank]`
//! pair, so parsing accepts both shapes.

use crate::error::{Result, SearchError};
use bridge_traits::{HttpClient, HttpMethod, HttpRequest};
use core_runtime::logging::strip_query;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Timeout for suggestion requests. Autocomplete is latency-sensitive;
/// anything slower than this is worthless to the caller anyway.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn payload_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy on purpose: grabs from the first '[' to the last ']' so nested
    // arrays stay intact.
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").unwrap())
}

/// Client for the JSONP autocomplete endpoint.
pub struct SuggestClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl SuggestClient {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch raw suggestions for a query. Returns suggestions in ranked
    /// order; an answer with no suggestion list yields an empty vec.
    pub async fn fetch(&self, query: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}?client=firefox&ds=yt&q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!(url = %strip_query(&url), "Fetching suggestions");

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Accept", "*/*")
            .timeout(REQUEST_TIMEOUT);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SearchError::Network(format!("Suggest request failed: {}", e)))?;

        if !response.is_success() {
            return Err(SearchError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let text = response.text()?;
        Ok(parse_suggest_payload(&text))
    }
}

/// Extract suggestion strings from a JSONP or plain-JSON autocomplete
/// response. Anything unparsable yields an empty vec; the caller treats
/// that the same as no suggestions.
pub(crate) fn parse_suggest_payload(text: &str) -> Vec<String> {
    let Some(payload) = payload_re().find(text) else {
        return Vec::new();
    };
    let Ok(data) = serde_json::from_str::<Value>(payload.as_str()) else {
        return Vec::new();
    };
    let Some(entries) = data.get(1).and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Array(pair) => pair.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jsonp_wrapped_payload() {
        let body = r#"window.google.ac.h(["lofi",[["lofi beats",0],["lofi hip hop",0]],{"k":1}])"#;
        assert_eq!(
            parse_suggest_payload(body),
            vec!["lofi beats".to_string(), "lofi hip hop".to_string()]
        );
    }

    #[test]
    fn parses_plain_json_string_entries() {
        let body = r#"["lofi",["lofi beats","lofi girl"]]"#;
        assert_eq!(
            parse_suggest_payload(body),
            vec!["lofi beats".to_string(), "lofi girl".to_string()]
        );
    }

    #[test]
    fn unparsable_payload_yields_empty() {
        assert!(parse_suggest_payload("throttled").is_empty());
        assert!(parse_suggest_payload("callback([broken").is_empty());
    }

    #[test]
    fn missing_suggestion_list_yields_empty() {
        assert!(parse_suggest_payload(r#"["lofi"]"#).is_empty());
    }
}
