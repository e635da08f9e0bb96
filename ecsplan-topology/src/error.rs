//! Error taxonomy of the derivation core
//!
//! All three variants are detected locally, abort the derivation, and leave
//! no partial graph behind. None of them is retryable. Failures inside the
//! external provisioning engine are *not* part of this taxonomy; they pass
//! through the engine boundary unmodified as [`EngineError`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// Malformed or out-of-range input value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Structurally impossible combination of otherwise-valid parameters.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Cross-entity invariant violated after full graph assembly.
    #[error("composition error: {0}")]
    CompositionError(String),
}

impl TopologyError {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Opaque failure surfaced by the provisioning engine. The core never
/// inspects, wraps, or retries these.
#[derive(Debug, Error)]
#[error("provisioning engine failure: {message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
