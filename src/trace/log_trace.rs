//! The [`LogTrace`] seam and its implicitly synchronized implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::error;

use super::context::TraceContext;
use super::format::ErrorDescription;
use super::guard::TraceGuard;
use super::id::TraceId;
use super::status::TraceStatus;

/// Anything that can trace the entry and exit of an operation.
///
/// Decorators depend on this trait instead of a concrete tracer so the same
/// wrapper works with explicit propagation ([`TraceContext`]) and implicit
/// per-thread propagation ([`ThreadLocalLogTrace`]).
///
/// The trait is object safe. Generic helpers (`exception`, `enter`) are
/// provided for sized tracers and again on `dyn LogTrace`, so a decorator can
/// hold a `&dyn LogTrace` and pick the tracer at runtime.
///
/// # Example
///
/// ```rust
/// use calltrace::{LogTrace, MemorySink, ThreadLocalLogTrace, TraceContext};
///
/// struct OrderRepository<'a, T: LogTrace> {
///     trace: &'a T,
/// }
///
/// impl<T: LogTrace> OrderRepository<'_, T> {
///     fn save(&self, item_id: &str) -> Result<(), String> {
///         let status = self.trace.begin("OrderRepository.save()");
///         if item_id == "ex" {
///             let err = "bad item".to_string();
///             self.trace.exception(status, &err);
///             return Err(err);
///         }
///         self.trace.end(status);
///         Ok(())
///     }
/// }
///
/// let sink = MemorySink::new();
/// let trace = ThreadLocalLogTrace::with_context(TraceContext::new().with_sink(sink.clone()));
/// let repo = OrderRepository { trace: &trace };
///
/// assert!(repo.save("item").is_ok());
/// assert!(repo.save("ex").is_err());
/// assert_eq!(sink.len(), 4);
/// ```
pub trait LogTrace {
    /// Starts an operation.
    fn begin(&self, message: &str) -> TraceStatus;

    /// Completes `status` normally.
    fn end(&self, status: TraceStatus);

    /// Completes `status` with an already described error.
    fn exception_described(&self, status: TraceStatus, error: &ErrorDescription);

    /// Completes `status` with an error marker, leaving `error` untouched.
    fn exception<E: fmt::Display + ?Sized>(&self, status: TraceStatus, error: &E)
    where
        Self: Sized,
    {
        self.exception_described(status, &ErrorDescription::of(error));
    }

    /// Starts an operation and returns a guard that completes it on every exit path.
    fn enter(&self, message: &str) -> TraceGuard<'_, Self>
    where
        Self: Sized,
    {
        TraceGuard::new(self, self.begin(message))
    }
}

impl<'a> dyn LogTrace + 'a {
    /// Completes `status` with an error marker, leaving `error` untouched.
    ///
    /// The error is described through its static type, which is the trait
    /// object's type when called with an erased error.
    pub fn exception<E: fmt::Display + ?Sized>(&self, status: TraceStatus, error: &E) {
        self.exception_described(status, &ErrorDescription::of(error));
    }

    /// Starts an operation and returns a guard that completes it on every exit path.
    pub fn enter(&self, message: &str) -> TraceGuard<'_, dyn LogTrace + 'a> {
        TraceGuard::new(self, self.begin(message))
    }
}

thread_local! {
    // open chain per tracer instance on this thread
    static HOLDERS: RefCell<HashMap<u64, TraceId>> = RefCell::new(HashMap::new());
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// A [`LogTrace`] that propagates the chain through a per-thread holder.
///
/// `begin` joins the chain already open on the current thread (one level
/// deeper) or starts a new one. Completing a status pops one level; completing
/// the root clears the holder, so the next `begin` on this thread starts a
/// fresh chain.
///
/// Each instance has its own holder, and state never crosses threads. Do not
/// hold a status across an `.await`: the task may resume on another thread.
///
/// Dropping the tracer clears the holder of the thread it is dropped on.
/// Holders on other threads are only left behind by statuses that were never
/// completed there, and are freed when those threads exit.
///
/// # Example
///
/// ```rust
/// use calltrace::{LogTrace, MemorySink, ThreadLocalLogTrace, TraceContext};
///
/// let sink = MemorySink::new();
/// let trace = ThreadLocalLogTrace::with_context(TraceContext::new().with_sink(sink.clone()));
///
/// let s1 = trace.begin("OrderController.request()");
/// let s2 = trace.begin("OrderService.orderItem()");
/// assert_eq!(s2.trace_id().level(), 1);
/// assert_eq!(s2.trace_id().id(), s1.trace_id().id());
///
/// trace.end(s2);
/// trace.end(s1);
/// assert!(trace.current_trace_id().is_none());
/// ```
#[derive(Debug)]
pub struct ThreadLocalLogTrace {
    instance: u64,
    context: TraceContext,
}

impl Default for ThreadLocalLogTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadLocalLogTrace {
    /// Creates a tracer logging through `tracing` with default glyphs.
    pub fn new() -> Self {
        Self::with_context(TraceContext::new())
    }

    /// Creates a tracer that renders and emits through `context`.
    pub fn with_context(context: TraceContext) -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            context,
        }
    }

    /// Context used for rendering and emission.
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// Id of the innermost open operation on the current thread, if any.
    pub fn current_trace_id(&self) -> Option<TraceId> {
        HOLDERS.with(|holders| holders.borrow().get(&self.instance).cloned())
    }

    fn sync_trace_id(&self) -> TraceId {
        HOLDERS.with(|holders| {
            let mut holders = holders.borrow_mut();
            let next = match holders.get(&self.instance) {
                Some(current) => current.create_next_id(),
                None => self.context.new_root_id(),
            };
            holders.insert(self.instance, next.clone());
            next
        })
    }

    fn release_trace_id(&self, completed: &TraceId) {
        HOLDERS.with(|holders| {
            let mut holders = holders.borrow_mut();
            match holders.get(&self.instance) {
                Some(current) if current == completed => {
                    if current.is_first_level() {
                        holders.remove(&self.instance);
                    } else {
                        let previous = current.create_previous_id();
                        holders.insert(self.instance, previous);
                    }
                }
                current => {
                    error!(
                        completed_id = completed.id(),
                        completed_level = completed.level(),
                        open = ?current,
                        "Completed a trace status that is not the innermost open call on this thread"
                    );
                }
            }
        });
    }
}

impl LogTrace for ThreadLocalLogTrace {
    fn begin(&self, message: &str) -> TraceStatus {
        let trace_id = self.sync_trace_id();
        self.context.open(trace_id, message)
    }

    fn end(&self, status: TraceStatus) {
        let trace_id = status.trace_id().clone();
        self.context.end(status);
        self.release_trace_id(&trace_id);
    }

    fn exception_described(&self, status: TraceStatus, error: &ErrorDescription) {
        let trace_id = status.trace_id().clone();
        self.context.exception_described(status, error);
        self.release_trace_id(&trace_id);
    }
}

impl Drop for ThreadLocalLogTrace {
    fn drop(&mut self) {
        // only this thread's holder is reachable; the TLS may already be gone at thread exit
        let _ = HOLDERS.try_with(|holders| holders.borrow_mut().remove(&self.instance));
    }
}
