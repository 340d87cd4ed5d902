//! In-memory sink that records every event.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{TraceEvent, TraceSink};

/// Records events in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to a [`TraceContext`](crate::TraceContext).
///
/// # Example
///
/// ```rust
/// use calltrace::{MemorySink, TraceContext};
///
/// let sink = MemorySink::new();
/// let trace = TraceContext::new().with_sink(sink.clone());
///
/// let root = trace.begin("hello1");
/// let child = trace.begin_sync(root.trace_id(), "hello2");
/// trace.end(child);
/// trace.end(root);
///
/// let lines = sink.lines();
/// assert!(lines[1].contains("|-->hello2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    /// Snapshot of all rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.line.clone()).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEvent>> {
        // a panic while pushing cannot leave the Vec half-written
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, event: &TraceEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "MemorySink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::TraceEventKind;
    use crate::trace::TraceId;

    fn event(line: &str) -> TraceEvent {
        TraceEvent {
            kind: TraceEventKind::Begin,
            trace_id: TraceId::new(),
            message: "hello".into(),
            line: line.into(),
            elapsed: None,
            error: None,
        }
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(&event("first"));
        sink.emit(&event("second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.emit(&event("shared"));
        assert_eq!(handle.lines(), vec!["shared"]);

        handle.clear();
        assert!(sink.is_empty());
    }
}
