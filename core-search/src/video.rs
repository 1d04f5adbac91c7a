//! Catalog Search Client
//!
//! Track search against the catalog data API.
//!
//! ## API Endpoints
//!
//! - **Search**: `{base}/search?part=snippet&type=video&videoCategoryId=10&maxResults={n}&q={query}&key={key}`
//! - **Details**: `{base}/videos?part=snippet,contentDetails&id={ids}&key={key}`
//!
//! Search results carry no duration, so a full track lookup is two-phase:
//! search for ids, then fetch details for every id in one batched call. The
//! query is decorated with a `+song` hint and restricted to the music
//! category so covers and podcasts rank below actual tracks.
//!
//! ## API Key Requirement
//!
//! The catalog API requires a key for all requests. Without one an instance
//! cannot be constructed; suggestion fallback and track search are simply
//! unavailable in that configuration.

use crate::error::{Result, SearchError};
use bridge_traits::{HttpClient, HttpMethod, HttpRequest};
use chrono::{DateTime, Utc};
use core_metadata::{derive_artist, format_duration_code, ThumbnailSet, Track, TrackId};
use core_runtime::logging::strip_query;
use core_runtime::SearchApiConfig;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for catalog API requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

impl Thumbnails {
    fn into_set(self) -> ThumbnailSet {
        let default_url = self.default.map(|t| t.url).unwrap_or_default();
        let medium_url = self
            .medium
            .map(|t| t.url)
            .unwrap_or_else(|| default_url.clone());
        let high_url = self.high.map(|t| t.url).unwrap_or_else(|| medium_url.clone());
        ThumbnailSet {
            default_url,
            medium_url,
            high_url,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the catalog data API.
pub struct VideoSearchClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
}

impl VideoSearchClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from the runtime search configuration. Fails when no
    /// API key is configured.
    pub fn from_config(
        http_client: Arc<dyn HttpClient>,
        config: &SearchApiConfig,
    ) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(SearchError::MissingApiKey)?;
        Ok(Self::new(http_client, config.search_base_url.clone(), api_key))
    }

    /// Search the catalog and return fully normalized tracks.
    ///
    /// Entries whose details never come back (deleted between the two
    /// phases) are dropped silently.
    pub async fn search(&self, query: &str, max_results: u8) -> Result<Vec<Track>> {
        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            info!(query, "Search returned no results");
            return Ok(Vec::new());
        }

        let details_url = format!(
            "{}/videos?part=snippet,contentDetails&id={}&key={}",
            self.base_url,
            ids.join(","),
            urlencoding::encode(&self.api_key)
        );
        let response: VideosResponse = self.get_json(&details_url).await?;

        let tracks: Vec<Track> = response
            .items
            .into_iter()
            .map(|item| {
                let display_artist = derive_artist(&item.snippet.title, &item.snippet.channel_title);
                Track {
                    id: TrackId::new(item.id),
                    title: item.snippet.title,
                    display_artist,
                    thumbnails: item.snippet.thumbnails.into_set(),
                    duration_text: format_duration_code(&item.content_details.duration),
                    published_at: item.snippet.published_at,
                }
            })
            .collect();

        info!(query, result_count = tracks.len(), "Search completed");
        Ok(tracks)
    }

    /// Single-phase search returning only result titles. Used to derive
    /// fallback suggestions without paying for the details call.
    pub async fn search_titles(&self, query: &str, max_results: u8) -> Result<Vec<String>> {
        let url = self.search_url(query, max_results);
        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.snippet.map(|s| s.title))
            .collect())
    }

    async fn search_ids(&self, query: &str, max_results: u8) -> Result<Vec<String>> {
        let url = self.search_url(&format!("{} +song", query), max_results);
        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    fn search_url(&self, query: &str, max_results: u8) -> String {
        format!(
            "{}/search?part=snippet&type=video&videoCategoryId=10&maxResults={}&q={}&key={}",
            self.base_url,
            max_results,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %strip_query(url), "Catalog API request");

        let request = HttpRequest::new(HttpMethod::Get, url.to_string())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SearchError::Network(format!("Catalog request failed: {}", e)))?;

        if !response.is_success() {
            return Err(SearchError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| SearchError::JsonParse(format!("Catalog response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnails_fall_back_to_lower_sizes() {
        let set = Thumbnails {
            default: Some(Thumbnail {
                url: "d.jpg".to_string(),
            }),
            medium: None,
            high: None,
        }
        .into_set();
        assert_eq!(set.default_url, "d.jpg");
        assert_eq!(set.medium_url, "d.jpg");
        assert_eq!(set.high_url, "d.jpg");
        assert_eq!(set.best(), "d.jpg");
    }

    #[test]
    fn search_url_decorates_query_and_category() {
        let client = VideoSearchClient::new(
            Arc::new(NoopHttp),
            "https://api.example.com/v3",
            "key123",
        );
        let url = client.search_url("tum hi ho +song", 10);
        assert!(url.contains("videoCategoryId=10"));
        assert!(url.contains("maxResults=10"));
        assert!(url.contains("q=tum%20hi%20ho%20%2Bsong"));
        assert!(url.contains("key=key123"));
    }

    struct NoopHttp;

    #[async_trait::async_trait]
    impl HttpClient for NoopHttp {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> std::result::Result<bridge_traits::HttpResponse, bridge_traits::BridgeError> {
            Err(bridge_traits::BridgeError::NotAvailable("noop".to_string()))
        }
    }
}
