//! Scoped completion of a [`TraceStatus`].

use std::fmt;

use super::format::ErrorDescription;
use super::id::TraceId;
use super::log_trace::LogTrace;
use super::status::TraceStatus;

/// Recorded in place of an error when a guard is dropped during a panic.
#[derive(Debug, Clone, Copy)]
struct Panicked;

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation panicked")
    }
}

/// Completes a traced operation on every exit path.
///
/// Call [`finish`](Self::finish) on success or [`fail`](Self::fail) with the
/// error. A guard dropped while still open completes itself: with an
/// exception line if the thread is panicking, otherwise with a normal `end`
/// line. An error returned early with `?` therefore shows up as a normal
/// completion; use [`TraceTemplate`](crate::TraceTemplate) when error results
/// must be marked automatically.
///
/// # Example
///
/// ```rust
/// use calltrace::{LogTrace, MemorySink, TraceContext};
///
/// let sink = MemorySink::new();
/// let trace = TraceContext::new().with_sink(sink.clone());
///
/// {
///     let root = trace.enter("hello1");
///     let child = trace.enter_sync(root.trace_id(), "hello2");
///     child.finish();
///     // `root` completes when it goes out of scope
/// }
///
/// assert_eq!(sink.len(), 4);
/// ```
#[must_use = "dropping the guard immediately completes the operation"]
pub struct TraceGuard<'a, T: LogTrace + ?Sized> {
    trace: &'a T,
    status: Option<TraceStatus>,
}

impl<'a, T: LogTrace + ?Sized> TraceGuard<'a, T> {
    pub(crate) fn new(trace: &'a T, status: TraceStatus) -> Self {
        Self {
            trace,
            status: Some(status),
        }
    }

    /// The open status.
    pub fn status(&self) -> &TraceStatus {
        match &self.status {
            Some(status) => status,
            // only `finish`, `fail` and `drop` take the status, and all of them consume the guard
            None => unreachable!("trace guard used after completion"),
        }
    }

    /// Id of the guarded operation, for nesting calls below it.
    pub fn trace_id(&self) -> &TraceId {
        self.status().trace_id()
    }

    /// Completes the operation normally.
    pub fn finish(mut self) {
        if let Some(status) = self.status.take() {
            self.trace.end(status);
        }
    }

    /// Completes the operation with an error marker, leaving `error` untouched.
    pub fn fail<E: fmt::Display + ?Sized>(mut self, error: &E) {
        if let Some(status) = self.status.take() {
            self.trace
                .exception_described(status, &ErrorDescription::of(error));
        }
    }
}

impl<T: LogTrace + ?Sized> fmt::Debug for TraceGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceGuard")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<T: LogTrace + ?Sized> Drop for TraceGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(status) = self.status.take() {
            if std::thread::panicking() {
                self.trace
                    .exception_described(status, &ErrorDescription::of(&Panicked));
            } else {
                self.trace.end(status);
            }
        }
    }
}
