//! Destinations for rendered trace lines
//!
//! Every `begin`, `end` and `exception` produces one [`TraceEvent`] that is
//! handed to a [`TraceSink`]:
//!
//! - [`TracingSink`]: Emits through the `tracing` macros (default)
//! - [`MemorySink`]: Collects events in memory for tests and in-process consumers
//! - [`NoOpSink`]: Discards everything
//!
//! # Examples
//!
//! ```rust
//! use calltrace::{MemorySink, TraceContext};
//!
//! let sink = MemorySink::new();
//! let trace = TraceContext::new().with_sink(sink.clone());
//!
//! let status = trace.begin("hello");
//! trace.end(status);
//!
//! assert_eq!(sink.lines().len(), 2);
//! ```

use std::fmt;
use std::time::Duration;

use crate::trace::TraceId;

mod memory;
mod noop;
mod subscriber;

pub use memory::MemorySink;
pub use noop::NoOpSink;
pub use subscriber::TracingSink;

/// Which operation produced a [`TraceEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEventKind {
    /// `begin` or `begin_sync`
    Begin,
    /// `end`
    End,
    /// `exception`
    Exception,
}

impl fmt::Display for TraceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Begin => "begin",
            Self::End => "end",
            Self::Exception => "exception",
        })
    }
}

/// A single trace line together with the fields it was rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Operation that produced the line
    pub kind: TraceEventKind,
    /// Chain id and level of the traced call
    pub trace_id: TraceId,
    /// Human-readable operation name
    pub message: String,
    /// Fully rendered line, e.g. `[3f2a9c1b] |<--hello2 time=0ms`
    pub line: String,
    /// Time between entry and completion; `None` for `Begin`
    pub elapsed: Option<Duration>,
    /// Rendered error for `Exception` events
    pub error: Option<String>,
}

/// Receives trace events
///
/// Implementations must be thread-safe: a single
/// [`TraceContext`](crate::TraceContext) may be shared across threads and
/// chains. Emission must not fail; a sink that cannot deliver a line drops it.
pub trait TraceSink: Send + Sync + fmt::Debug {
    /// Deliver one event
    fn emit(&self, event: &TraceEvent);

    /// Get sink name for debugging/logging
    fn name(&self) -> &'static str;
}
