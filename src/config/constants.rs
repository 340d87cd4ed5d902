//! Default glyphs and limits
//!
//! This module centralizes the constants used to generate chain ids and to
//! render trace lines.

/// Chain id limits
pub mod id {
    /// Default number of characters in a generated chain id
    pub const DEFAULT_LENGTH: usize = 8;

    /// Shortest chain id the builder accepts
    ///
    /// 8 hex digits give 2^32 possible ids per root call.
    pub const MIN_LENGTH: usize = 8;

    /// Longest chain id the builder accepts (a full simple-format UUID)
    pub const MAX_LENGTH: usize = 32;

    /// Deepest level accepted for an externally supplied parent id
    ///
    /// Every level adds one indent to each rendered line.
    pub const MAX_LEVEL: u32 = 1024;
}

/// Default glyphs for rendering trace lines
pub mod glyphs {
    /// Marks the entry of an operation
    pub const START: &str = "-->";

    /// Marks normal completion
    pub const COMPLETE: &str = "<--";

    /// Marks completion with an error
    pub const EXCEPTION: &str = "<X-";

    /// Bar drawn in front of the prefix on nested lines
    pub const BRANCH: &str = "|";

    /// Filler drawn for every ancestor level above the direct parent
    pub const INDENT: &str = "|   ";
}
