// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Explicitly propagated call-chain tracing.

use std::fmt;
use std::sync::Arc;

use crate::config::TraceConfig;
use crate::sink::{TraceEvent, TraceEventKind, TraceSink, TracingSink};

use super::format::{self, ErrorDescription};
use super::guard::TraceGuard;
use super::id::TraceId;
use super::log_trace::LogTrace;
use super::status::TraceStatus;
use super::template::TraceTemplate;

/// Produces correlated, indented trace lines for nested operations.
///
/// The chain is propagated explicitly: `begin` starts a chain and each nested
/// call passes its parent's [`TraceId`] to `begin_sync`. The context itself
/// holds no per-chain state, so one instance can be shared by any number of
/// threads and chains.
///
/// # Examples
///
/// ```rust
/// use calltrace::{MemorySink, TraceContext};
///
/// let sink = MemorySink::new();
/// let trace = TraceContext::new().with_sink(sink.clone());
///
/// let s1 = trace.begin("hello1");
/// let s2 = trace.begin_sync(s1.trace_id(), "hello2");
/// trace.end(s2);
/// trace.end(s1);
///
/// let lines = sink.lines();
/// let id = lines[0][1..9].to_string();
/// assert!(lines.iter().all(|l| l.starts_with(&format!("[{id}]"))));
/// assert!(lines[2].contains("|<--hello2 time="));
/// assert!(lines[3].contains("] <--hello1 time="));
/// ```
#[derive(Debug, Clone)]
pub struct TraceContext {
    config: Arc<TraceConfig>,
    sink: Arc<dyn TraceSink>,
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceContext {
    /// Creates a context with default glyphs that logs through `tracing`.
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    /// Creates a context with the given configuration that logs through `tracing`.
    ///
    /// Build `config` with [`TraceConfigBuilder`](crate::TraceConfigBuilder) to
    /// have it validated.
    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            config: Arc::new(config),
            sink: Arc::new(TracingSink::new()),
        }
    }

    /// Replaces the sink receiving trace lines.
    pub fn with_sink(self, sink: impl TraceSink + 'static) -> Self {
        self.with_shared_sink(Arc::new(sink))
    }

    /// Replaces the sink with one that is already shared.
    pub fn with_shared_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Name of the active sink, for diagnostics.
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Starts a new call chain at level 0.
    pub fn begin(&self, message: &str) -> TraceStatus {
        self.open(self.new_root_id(), message)
    }

    /// Starts an operation nested one level below `parent`.
    ///
    /// The child keeps `parent`'s chain id; `parent` itself is untouched.
    pub fn begin_sync(&self, parent: &TraceId, message: &str) -> TraceStatus {
        self.open(parent.create_next_id(), message)
    }

    /// Completes `status` normally and logs its elapsed time.
    pub fn end(&self, status: TraceStatus) {
        self.complete(status, None);
    }

    /// Completes `status` with an error marker.
    ///
    /// Only records the error: it is not consumed, wrapped or altered, and the
    /// caller keeps propagating it. The `ex=` kind is the error's static type
    /// name (see [`ErrorDescription`]).
    pub fn exception<E: fmt::Display + ?Sized>(&self, status: TraceStatus, error: &E) {
        self.complete(status, Some(&ErrorDescription::of(error)));
    }

    /// Completes `status` with an error that was already described.
    pub fn exception_described(&self, status: TraceStatus, error: &ErrorDescription) {
        self.complete(status, Some(error));
    }

    /// Like [`begin_sync`](Self::begin_sync), returning a guard that completes
    /// the status on every exit path.
    pub fn enter_sync(&self, parent: &TraceId, message: &str) -> TraceGuard<'_, Self> {
        TraceGuard::new(self, self.begin_sync(parent, message))
    }

    /// Closure-based wrapper around this context.
    pub fn template(&self) -> TraceTemplate<'_, Self> {
        TraceTemplate::new(self)
    }

    pub(crate) fn new_root_id(&self) -> TraceId {
        TraceId::generate(self.config.id_length)
    }

    pub(crate) fn open(&self, trace_id: TraceId, message: &str) -> TraceStatus {
        let line = format::begin_line(&self.config.glyphs, &trace_id, message);
        self.sink.emit(&TraceEvent {
            kind: TraceEventKind::Begin,
            trace_id: trace_id.clone(),
            message: message.to_string(),
            line,
            elapsed: None,
            error: None,
        });
        TraceStatus::new(trace_id, message)
    }

    fn complete(&self, status: TraceStatus, error: Option<&ErrorDescription>) {
        let elapsed = status.elapsed();
        let glyphs = &self.config.glyphs;
        let (kind, line) = match error {
            None => (
                TraceEventKind::End,
                format::end_line(glyphs, status.trace_id(), status.message(), elapsed),
            ),
            Some(error) => (
                TraceEventKind::Exception,
                format::exception_line(
                    glyphs,
                    status.trace_id(),
                    status.message(),
                    elapsed,
                    error,
                ),
            ),
        };
        self.sink.emit(&TraceEvent {
            kind,
            trace_id: status.trace_id().clone(),
            message: status.message().to_string(),
            line,
            elapsed: Some(elapsed),
            error: error.map(|e| e.to_string()),
        });
    }
}

impl LogTrace for TraceContext {
    /// Always starts a new chain; nest with [`TraceContext::begin_sync`].
    fn begin(&self, message: &str) -> TraceStatus {
        TraceContext::begin(self, message)
    }

    fn end(&self, status: TraceStatus) {
        TraceContext::end(self, status)
    }

    fn exception_described(&self, status: TraceStatus, error: &ErrorDescription) {
        TraceContext::exception_described(self, status, error)
    }
}
