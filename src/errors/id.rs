//! Errors raised when a chain id is supplied from outside the library.

/// Errors that can occur when building a [`TraceId`](crate::TraceId) from an
/// externally supplied identifier (for example one propagated from another
/// process).
///
/// Ids generated by the library itself never fail; this type only guards the
/// boundary where a caller hands in its own parent id.
///
/// # Examples
///
/// ```rust
/// use calltrace::{TraceId, TraceIdError};
///
/// let err = TraceId::with_level("not valid!", 2).unwrap_err();
/// assert!(matches!(err, TraceIdError::Malformed { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceIdError {
    /// The id was empty.
    ///
    /// This is the equivalent of handing a missing parent id to `begin_sync`:
    /// lines traced under it could not be correlated with anything.
    #[error("Trace id must not be empty")]
    Empty,

    /// The id contained characters other than ASCII letters and digits.
    #[error("Malformed trace id {id:?}: only ASCII alphanumerics are allowed")]
    Malformed {
        /// The rejected id
        id: String,
    },

    /// The id was longer than any id the library would generate.
    #[error("Trace id {id:?} is longer than {max} characters")]
    TooLong {
        /// The rejected id
        id: String,
        /// Maximum accepted length
        max: usize,
    },

    /// The supplied level was deeper than any call stack the library expects.
    #[error("Trace level {level} is deeper than {max}")]
    LevelTooDeep {
        /// The rejected level
        level: u32,
        /// Maximum accepted level
        max: u32,
    },
}
