//! Error types for the calltrace library.
//!
//! Tracing itself never fails on behalf of the traced operation: errors raised
//! by the wrapped code are recorded through `exception` and handed back to the
//! caller untouched. The types here cover *usage* errors only:
//!
//! - [`TraceIdError`] - An externally supplied chain id was rejected
//! - [`ConfigError`] - A [`TraceConfig`](crate::TraceConfig) failed validation
//!
//! [`TraceError`] unifies both for callers that do not need to distinguish them.
//!
//! # Examples
//!
//! ```rust
//! use calltrace::{TraceError, TraceId, TraceIdError};
//!
//! fn parse_parent(raw: &str) -> Result<TraceId, TraceError> {
//!     Ok(TraceId::with_level(raw, 0)?)
//! }
//!
//! assert!(parse_parent("3f2a9c1b").is_ok());
//! assert!(matches!(
//!     parse_parent(""),
//!     Err(TraceError::Id(TraceIdError::Empty))
//! ));
//! ```

mod config;
mod id;

pub use config::ConfigError;
pub use id::TraceIdError;

/// Unified error type for all calltrace usage errors.
///
/// Module-specific errors convert via `From`, so `?` works across both.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Error from constructing a [`TraceId`](crate::TraceId).
    #[error("Trace id error: {0}")]
    Id(#[from] TraceIdError),

    /// Error from building a [`TraceConfig`](crate::TraceConfig).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
