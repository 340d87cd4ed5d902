//! Configuration for calltrace
//!
//! This module controls how chain ids are generated and how trace lines are
//! rendered.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use calltrace::TraceConfig;
//!
//! // 8 character ids, `-->` / `<--` / `<X-` glyphs
//! let config = TraceConfig::default();
//! assert_eq!(config.id_length, 8);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use calltrace::TraceConfigBuilder;
//!
//! let config = TraceConfigBuilder::new()
//!     .id_length(16)           // wider random space for busy services
//!     .exception_glyph("<!-")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.glyphs.exception, "<!-");
//! ```

use crate::errors::ConfigError;

pub mod constants;

/// Glyphs used to render trace lines
///
/// A nested line is drawn as `INDENT` repeated for every ancestor level above
/// the direct parent, then `BRANCH`, then the prefix:
///
/// ```text
/// [3f2a9c1b] -->OrderController.request()
/// [3f2a9c1b] |-->OrderService.orderItem()
/// [3f2a9c1b] |   |-->OrderRepository.save()
/// [3f2a9c1b] |   |<--OrderRepository.save() time=1ms
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceGlyphs {
    /// Prefix for `begin` lines
    pub start: String,
    /// Prefix for `end` lines
    pub complete: String,
    /// Prefix for `exception` lines
    pub exception: String,
    /// Bar in front of the prefix on nested lines
    pub branch: String,
    /// Filler for each ancestor level above the direct parent
    pub indent: String,
}

impl Default for TraceGlyphs {
    fn default() -> Self {
        Self {
            start: constants::glyphs::START.to_string(),
            complete: constants::glyphs::COMPLETE.to_string(),
            exception: constants::glyphs::EXCEPTION.to_string(),
            branch: constants::glyphs::BRANCH.to_string(),
            indent: constants::glyphs::INDENT.to_string(),
        }
    }
}

impl TraceGlyphs {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("start", &self.start),
            ("complete", &self.complete),
            ("exception", &self.exception),
            ("branch", &self.branch),
            ("indent", &self.indent),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::EmptyGlyph { name });
            }
        }
        Ok(())
    }
}

/// Configuration for a [`TraceContext`](crate::TraceContext)
///
/// Use [`TraceConfigBuilder`] for a validated, fluent construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Number of characters in generated chain ids
    /// Default: 8
    pub id_length: usize,

    /// Glyphs used to render lines
    pub glyphs: TraceGlyphs,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            id_length: constants::id::DEFAULT_LENGTH,
            glyphs: TraceGlyphs::default(),
        }
    }
}

impl TraceConfig {
    /// Check that the configuration can be used to render trace lines
    ///
    /// # Example
    ///
    /// ```rust
    /// use calltrace::TraceConfig;
    ///
    /// let mut config = TraceConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.id_length = 64;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (constants::id::MIN_LENGTH, constants::id::MAX_LENGTH);
        if !(min..=max).contains(&self.id_length) {
            return Err(ConfigError::IdLengthOutOfRange {
                length: self.id_length,
                min,
                max,
            });
        }
        self.glyphs.validate()
    }
}

/// Builder for [`TraceConfig`]
///
/// # Example
///
/// ```rust
/// use calltrace::TraceConfigBuilder;
///
/// let config = TraceConfigBuilder::new()
///     .start_glyph("=>")
///     .complete_glyph("<=")
///     .exception_glyph("<!")
///     .indent("|  ")
///     .build()
///     .unwrap();
/// assert_eq!(config.glyphs.start, "=>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraceConfigBuilder {
    config: TraceConfig,
}

impl TraceConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of characters in generated chain ids (8..=32)
    pub fn id_length(mut self, length: usize) -> Self {
        self.config.id_length = length;
        self
    }

    /// Set the prefix for `begin` lines
    pub fn start_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.config.glyphs.start = glyph.into();
        self
    }

    /// Set the prefix for `end` lines
    pub fn complete_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.config.glyphs.complete = glyph.into();
        self
    }

    /// Set the prefix for `exception` lines
    pub fn exception_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.config.glyphs.exception = glyph.into();
        self
    }

    /// Set the bar drawn in front of nested prefixes
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.config.glyphs.branch = branch.into();
        self
    }

    /// Set the filler drawn for each ancestor level
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.config.glyphs.indent = indent.into();
        self
    }

    /// Replace all glyphs at once
    pub fn glyphs(mut self, glyphs: TraceGlyphs) -> Self {
        self.config.glyphs = glyphs;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<TraceConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
