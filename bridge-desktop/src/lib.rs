//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! The core never performs I/O directly; hosts inject implementations of the
//! `bridge-traits` ports. This crate supplies the desktop transport:
//! - `HttpClient` using `reqwest` (pooled, TLS, retry with backoff)
//!
//! The media engine port has no desktop implementation here: the engine is
//! an embedded player widget owned by the host shell, which forwards its
//! lifecycle callbacks into the core as engine signals.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use core_runtime::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .http_client(Arc::new(ReqwestHttpClient::new()))
//!     .build();
//! ```

mod http;

pub use http::ReqwestHttpClient;
