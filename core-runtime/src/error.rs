//! Runtime error types shared by the configuration surface and the logging
//! layer.

use thiserror::Error;

/// Errors raised while assembling or validating the runtime.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value failed validation, or the tracing subscriber
    /// could not be installed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A host capability the operation needs was never injected.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
