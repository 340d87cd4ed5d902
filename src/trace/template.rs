//! Closure-based tracing.

use std::fmt;

use super::context::TraceContext;
use super::guard::TraceGuard;
use super::id::TraceId;
use super::log_trace::LogTrace;

/// Runs a closure between `begin` and `end`/`exception`.
///
/// An `Err` returned by the closure is recorded with `exception` and handed
/// back unchanged; a panic is recorded by the underlying [`TraceGuard`] and
/// keeps unwinding.
///
/// # Example
///
/// ```rust
/// use calltrace::{MemorySink, TraceContext};
///
/// let sink = MemorySink::new();
/// let trace = TraceContext::new().with_sink(sink.clone());
/// let template = trace.template();
///
/// let result: Result<u32, String> = template.execute_root("OrderController.request()", |id| {
///     template.execute_sync(id, "OrderService.orderItem()", |_| Err("out of stock".to_string()))
/// });
///
/// assert_eq!(result, Err("out of stock".to_string()));
/// assert!(sink.lines()[2].contains("|<X-OrderService.orderItem()"));
/// assert!(sink.lines()[3].contains("<X-OrderController.request()"));
/// ```
#[derive(Debug)]
pub struct TraceTemplate<'a, T: LogTrace + ?Sized> {
    trace: &'a T,
}

impl<T: LogTrace + ?Sized> Clone for TraceTemplate<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: LogTrace + ?Sized> Copy for TraceTemplate<'_, T> {}

impl<'a, T: LogTrace + ?Sized> TraceTemplate<'a, T> {
    /// Wraps `trace`.
    pub fn new(trace: &'a T) -> Self {
        Self { trace }
    }

    /// Runs `f` as one traced operation named `message`.
    pub fn execute<R, E, F>(&self, message: &str, f: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
        E: fmt::Display,
    {
        let guard = TraceGuard::new(self.trace, self.trace.begin(message));
        complete(guard, f())
    }
}

impl<'a> TraceTemplate<'a, TraceContext> {
    /// Runs `f` as the root of a new chain, passing it the root's id.
    pub fn execute_root<R, E, F>(&self, message: &str, f: F) -> Result<R, E>
    where
        F: FnOnce(&TraceId) -> Result<R, E>,
        E: fmt::Display,
    {
        let guard = self.trace.enter(message);
        let result = f(guard.trace_id());
        complete(guard, result)
    }

    /// Runs `f` one level below `parent`, passing it the child's id.
    pub fn execute_sync<R, E, F>(&self, parent: &TraceId, message: &str, f: F) -> Result<R, E>
    where
        F: FnOnce(&TraceId) -> Result<R, E>,
        E: fmt::Display,
    {
        let guard = self.trace.enter_sync(parent, message);
        let result = f(guard.trace_id());
        complete(guard, result)
    }
}

fn complete<T: LogTrace + ?Sized, R, E: fmt::Display>(
    guard: TraceGuard<'_, T>,
    result: Result<R, E>,
) -> Result<R, E> {
    match &result {
        Ok(_) => guard.finish(),
        Err(error) => guard.fail(error),
    }
    result
}
