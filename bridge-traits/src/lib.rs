//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and platform-specific
//! implementations. Each trait represents a capability the core requires but that
//! must be implemented differently per platform (desktop, mobile, web).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with retry and TLS
//! - [`MediaEngine`](engine::MediaEngine) - Control surface for the host's embedded
//!   media engine, paired with [`EngineSignal`](engine::EngineSignal) lifecycle
//!   notifications flowing the other way
//!
//! ## Fail-Fast Strategy
//!
//! The core should fail fast with descriptive errors when a required capability is
//! missing:
//!
//! ```ignore
//! use core_runtime::Error;
//!
//! pub fn new(config: CoreConfig) -> Result<Self> {
//!     let http_client = config.http_client
//!         .ok_or_else(|| Error::CapabilityMissing {
//!             capability: "HttpClient".to_string(),
//!             message: "No HTTP client implementation provided. \
//!                      Desktop: ensure default feature is enabled. \
//!                      Mobile: inject platform-native adapter.".to_string()
//!         })?;
//!     // ...
//! }
//! ```
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should convert platform-specific errors to `BridgeError` and
//! provide actionable messages with context.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent usage
//! across async tasks. Implementations must ensure thread safety.

pub mod engine;
pub mod error;
pub mod http;

pub use error::BridgeError;

// Re-export commonly used types
pub use engine::{EngineSignal, EngineState, MediaEngine};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
