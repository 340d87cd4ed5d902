// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sink that forwards trace lines to the `tracing` ecosystem.

use std::time::Duration;

use tracing::{debug, error, info, trace, warn, Level};

use super::{TraceEvent, TraceEventKind, TraceSink};

/// Emits each trace line as a `tracing` event.
///
/// `begin`/`end` lines are emitted at the configured level (default `INFO`).
/// `exception` lines are emitted at `WARN`, or at `ERROR` when that is the
/// configured level. Each event carries structured
/// `trace_id`, `depth` and `elapsed_ms` fields next to the rendered line, so
/// JSON subscribers can correlate by chain id without parsing the text.
///
/// # Example
///
/// ```rust
/// use calltrace::{TraceContext, TracingSink};
/// use tracing::Level;
///
/// let trace = TraceContext::new().with_sink(TracingSink::new().with_level(Level::DEBUG));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl TracingSink {
    /// Creates a sink emitting `begin`/`end` lines at `INFO`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level used for `begin`/`end` lines.
    ///
    /// Configuring `ERROR` also raises `exception` lines to `ERROR`.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl TraceSink for TracingSink {
    fn emit(&self, event: &TraceEvent) {
        let trace_id = event.trace_id.id();
        let depth = event.trace_id.level();
        let elapsed_ms = event.elapsed.map(elapsed_millis);
        let line = &event.line;

        let level = match event.kind {
            TraceEventKind::Exception if self.level == Level::ERROR => Level::ERROR,
            TraceEventKind::Exception => Level::WARN,
            _ => self.level,
        };

        // tracing macros need a constant level
        if level == Level::TRACE {
            trace!(trace_id, depth, elapsed_ms, kind = %event.kind, "{line}");
        } else if level == Level::DEBUG {
            debug!(trace_id, depth, elapsed_ms, kind = %event.kind, "{line}");
        } else if level == Level::INFO {
            info!(trace_id, depth, elapsed_ms, kind = %event.kind, "{line}");
        } else if level == Level::WARN {
            warn!(trace_id, depth, elapsed_ms, kind = %event.kind, "{line}");
        } else {
            error!(trace_id, depth, elapsed_ms, kind = %event.kind, "{line}");
        }
    }

    fn name(&self) -> &'static str {
        "TracingSink"
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
