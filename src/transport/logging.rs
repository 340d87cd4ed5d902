// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layer tracing each service call as one call chain.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Layer;

use crate::trace::{TraceContext, TraceStatus};

/// A Tower layer that traces every call of the wrapped service.
///
/// Each call starts a new chain with `label` as its message. The response
/// (or error) is passed through unchanged.
///
/// # Example
///
/// ```rust
/// use calltrace::transport::TraceLayer;
/// use calltrace::{MemorySink, TraceContext};
///
/// let sink = MemorySink::new();
/// let layer = TraceLayer::new("OrderController.request()")
///     .with_context(TraceContext::new().with_sink(sink));
/// ```
#[derive(Clone, Debug)]
pub struct TraceLayer {
    context: TraceContext,
    label: String,
}

impl TraceLayer {
    /// Creates a layer naming every traced call `label`, logging through `tracing`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            context: TraceContext::new(),
            label: label.into(),
        }
    }

    /// Uses `context` for rendering and emission.
    pub fn with_context(mut self, context: TraceContext) -> Self {
        self.context = context;
        self
    }
}

impl<S> Layer<S> for TraceLayer {
    type Service = TraceService<S>;

    fn layer(&self, service: S) -> Self::Service {
        TraceService {
            service,
            context: self.context.clone(),
            label: self.label.clone(),
        }
    }
}

/// A Tower service that traces each call of the inner service.
#[derive(Clone, Debug)]
pub struct TraceService<S> {
    service: S,
    context: TraceContext,
    label: String,
}

impl<S, Request> tower::Service<Request> for TraceService<S>
where
    S: tower::Service<Request>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: fmt::Display + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let status = self.context.begin(&self.label);
        let mut pending = PendingCall {
            context: self.context.clone(),
            status: Some(status),
        };
        let future = self.service.call(request);

        Box::pin(async move {
            let result = future.await;
            if let Some(status) = pending.status.take() {
                match &result {
                    Ok(_) => pending.context.end(status),
                    Err(e) => pending.context.exception(status, e),
                }
            }
            result
        })
    }
}

/// Recorded when a traced call's future is dropped before it resolves.
#[derive(Debug, Clone, Copy)]
struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("call dropped before completion")
    }
}

/// Owns the status of an in-flight call until its future resolves.
struct PendingCall {
    context: TraceContext,
    status: Option<TraceStatus>,
}

impl Drop for PendingCall {
    fn drop(&mut self) {
        if let Some(status) = self.status.take() {
            self.context.exception(status, &Cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, TraceEventKind};
    use std::future::{ready, Ready};
    use tower::Service;

    #[derive(Clone)]
    struct Echo;

    impl Service<&'static str> for Echo {
        type Response = String;
        type Error = String;
        type Future = Ready<Result<String, String>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: &'static str) -> Self::Future {
            if request == "ex" {
                ready(Err("illegal item".to_string()))
            } else {
                ready(Ok(format!("ok {request}")))
            }
        }
    }

    fn traced() -> (TraceService<Echo>, MemorySink) {
        let sink = MemorySink::new();
        let layer = TraceLayer::new("OrderController.request()")
            .with_context(TraceContext::new().with_sink(sink.clone()));
        (layer.layer(Echo), sink)
    }

    #[tokio::test]
    async fn test_trace_layer_passes_response() {
        let (mut service, sink) = traced();
        let response = service.call("item").await;

        assert_eq!(response, Ok("ok item".to_string()));
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "OrderController.request()");
        assert_eq!(events[1].kind, TraceEventKind::End);
    }

    #[tokio::test]
    async fn test_trace_layer_passes_error() {
        let (mut service, sink) = traced();
        let response = service.call("ex").await;

        assert_eq!(response, Err("illegal item".to_string()));
        let events = sink.events();
        assert_eq!(events[1].kind, TraceEventKind::Exception);
        assert!(events[1].line.ends_with("ex=String: illegal item"));
    }

    #[tokio::test]
    async fn test_each_call_is_its_own_chain() {
        let (mut service, sink) = traced();
        let _ = service.call("a").await;
        let _ = service.call("b").await;

        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert_ne!(events[0].trace_id.id(), events[2].trace_id.id());
        assert!(events.iter().all(|e| e.trace_id.level() == 0));
    }

    #[test]
    fn test_dropped_call_is_recorded() {
        let (mut service, sink) = traced();
        drop(service.call("never polled"));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, TraceEventKind::Exception);
        assert!(events[1].line.contains("Cancelled: call dropped before completion"));
    }
}
