//! # Search Error Types
//!
//! Error types for the suggestion and track search clients.

use thiserror::Error;

/// Errors that can occur while talking to the search endpoints.
#[derive(Error, Debug)]
pub enum SearchError {
    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    // ========================================================================
    // Payload Errors
    // ========================================================================
    /// Response body could not be parsed.
    #[error("Failed to parse response: {0}")]
    JsonParse(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Track search requires an API key and none was configured.
    #[error("Search API key not configured")]
    MissingApiKey,

    /// Underlying HTTP bridge failure.
    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),
}

impl SearchError {
    /// Returns `true` if retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Network(_) | SearchError::Bridge(_) => true,
            SearchError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_transient() {
        assert!(SearchError::Http {
            status: 429,
            body: String::new()
        }
        .is_transient());
        assert!(SearchError::Http {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!SearchError::Http {
            status: 404,
            body: String::new()
        }
        .is_transient());
        assert!(!SearchError::MissingApiKey.is_transient());
    }
}
