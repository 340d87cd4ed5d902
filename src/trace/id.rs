// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain identifier and nesting level.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::constants;
use crate::errors::TraceIdError;

/// Identifies one call chain and the depth of a call within it.
///
/// Every status created within the same logical call chain carries the same
/// `id`. A deeper call gets a new value from [`create_next_id`](Self::create_next_id);
/// the parent's value is never modified.
///
/// # Examples
///
/// ```rust
/// use calltrace::TraceId;
///
/// let root = TraceId::new();
/// let child = root.create_next_id();
///
/// assert_eq!(root.id(), child.id());
/// assert_eq!(root.level(), 0);
/// assert_eq!(child.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTraceId")]
pub struct TraceId {
    id: String,
    level: u32,
}

#[derive(Deserialize)]
struct RawTraceId {
    id: String,
    level: u32,
}

impl TryFrom<RawTraceId> for TraceId {
    type Error = TraceIdError;

    fn try_from(raw: RawTraceId) -> Result<Self, Self::Error> {
        Self::with_level(raw.id, raw.level)
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceId {
    /// Starts a new chain with a random 8 character id at level 0.
    pub fn new() -> Self {
        Self::generate(constants::id::DEFAULT_LENGTH)
    }

    /// Starts a new chain with a random id of `length` characters.
    ///
    /// `length` is clamped to the 8..=32 range supported by the builder.
    pub(crate) fn generate(length: usize) -> Self {
        let length = length.clamp(constants::id::MIN_LENGTH, constants::id::MAX_LENGTH);
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(length);
        Self { id, level: 0 }
    }

    /// Rebuilds a trace id from an externally supplied chain id.
    ///
    /// Use this to continue a chain whose id was propagated from elsewhere
    /// (another process, a request header). The id must be non-empty ASCII
    /// alphanumerics, at most 32 characters, and `level` at most 1024.
    ///
    /// # Errors
    ///
    /// Returns [`TraceIdError`] if the id is empty, too long or malformed, or
    /// if the level is too deep.
    pub fn with_level(id: impl Into<String>, level: u32) -> Result<Self, TraceIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TraceIdError::Empty);
        }
        if id.len() > constants::id::MAX_LENGTH {
            return Err(TraceIdError::TooLong {
                id,
                max: constants::id::MAX_LENGTH,
            });
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TraceIdError::Malformed { id });
        }
        if level > constants::id::MAX_LEVEL {
            return Err(TraceIdError::LevelTooDeep {
                level,
                max: constants::id::MAX_LEVEL,
            });
        }
        Ok(Self { id, level })
    }

    /// The chain id shared by every call in this chain.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Nesting depth, 0 for the chain's root.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Id for a call nested one level below this one (saturates at `u32::MAX`).
    pub fn create_next_id(&self) -> Self {
        Self {
            id: self.id.clone(),
            level: self.level.saturating_add(1),
        }
    }

    /// Id for the caller one level above this one (saturates at the root).
    pub fn create_previous_id(&self) -> Self {
        Self {
            id: self.id.clone(),
            level: self.level.saturating_sub(1),
        }
    }

    /// Whether this id belongs to the chain's root call.
    pub fn is_first_level(&self) -> bool {
        self.level == 0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
