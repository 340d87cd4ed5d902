//! Configuration validation errors.

/// Errors reported by [`TraceConfigBuilder::build`](crate::TraceConfigBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Requested chain id length is outside the supported range.
    ///
    /// Ids are cut from a 32 hex digit UUID, so 32 is the upper bound. The
    /// lower bound keeps collisions between concurrent chains negligible.
    #[error("Trace id length {length} is out of range ({min}..={max})")]
    IdLengthOutOfRange {
        /// Requested length
        length: usize,
        /// Minimum supported length
        min: usize,
        /// Maximum supported length
        max: usize,
    },

    /// A glyph used to render trace lines was empty.
    #[error("Glyph `{name}` must not be empty")]
    EmptyGlyph {
        /// Which glyph was empty (e.g. "start", "complete")
        name: &'static str,
    },
}
