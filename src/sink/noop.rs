//! No-operation sink that discards every event

use super::{TraceEvent, TraceSink};

/// A sink that discards every event
///
/// Use this to keep trace calls in place while silencing their output, e.g.
/// in benchmarks.
///
/// # Examples
///
/// ```rust
/// use calltrace::{NoOpSink, TraceContext};
///
/// let trace = TraceContext::new().with_sink(NoOpSink);
/// let status = trace.begin("silent");
/// trace.end(status);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl TraceSink for NoOpSink {
    fn emit(&self, _event: &TraceEvent) {}

    fn name(&self) -> &'static str {
        "NoOpSink"
    }
}
