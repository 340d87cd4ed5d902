//! One in-flight traced operation.

use std::time::{Duration, Instant};

use chrono::Utc;

use super::id::TraceId;

/// An open traced operation, created by `begin`/`begin_sync`.
///
/// A status is consumed by exactly one of `end` or `exception`. Both take it
/// by value and the type is not `Clone`, so completing a status twice does
/// not compile. Dropping a status without completing it loses its completion
/// line; use [`TraceGuard`](crate::TraceGuard) when every exit path must be
/// covered.
#[derive(Debug)]
#[must_use = "a trace status must be completed with `end` or `exception`"]
pub struct TraceStatus {
    trace_id: TraceId,
    message: String,
    start_time_millis: i64,
    started: Instant,
}

impl TraceStatus {
    pub(crate) fn new(trace_id: TraceId, message: impl Into<String>) -> Self {
        Self {
            trace_id,
            message: message.into(),
            start_time_millis: Utc::now().timestamp_millis(),
            started: Instant::now(),
        }
    }

    /// Id of this operation; pass it to `begin_sync` to nest a call below it.
    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    /// Human-readable operation name.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wall-clock entry time in Unix milliseconds.
    pub fn start_time_millis(&self) -> i64 {
        self.start_time_millis
    }

    /// Time since entry, measured on the monotonic clock.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
