//! Order flow traced three ways
//!
//! A controller -> service -> repository call stack, traced with explicit id
//! propagation, with the per-thread tracer, and with the closure template.
//! The repository rejects the item id `"ex"`.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=info cargo run --example order_flow
//! ```

use std::thread;
use std::time::Duration;

use calltrace::{LogTrace, ThreadLocalLogTrace, TraceContext, TraceId};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("illegal item {0}")]
struct IllegalItem(String);

fn save(item_id: &str) -> Result<(), IllegalItem> {
    if item_id == "ex" {
        return Err(IllegalItem(item_id.to_string()));
    }
    thread::sleep(Duration::from_millis(10));
    Ok(())
}

/// Each layer receives its parent's id and nests below it.
mod explicit {
    use super::*;

    pub fn controller(trace: &TraceContext, item_id: &str) -> Result<(), IllegalItem> {
        let status = trace.begin("OrderController.request()");
        match service(trace, status.trace_id(), item_id) {
            Ok(()) => {
                trace.end(status);
                Ok(())
            }
            Err(e) => {
                trace.exception(status, &e);
                Err(e)
            }
        }
    }

    fn service(trace: &TraceContext, parent: &TraceId, item_id: &str) -> Result<(), IllegalItem> {
        let status = trace.begin_sync(parent, "OrderService.orderItem()");
        match repository(trace, status.trace_id(), item_id) {
            Ok(()) => {
                trace.end(status);
                Ok(())
            }
            Err(e) => {
                trace.exception(status, &e);
                Err(e)
            }
        }
    }

    fn repository(trace: &TraceContext, parent: &TraceId, item_id: &str) -> Result<(), IllegalItem> {
        let status = trace.begin_sync(parent, "OrderRepository.save()");
        match save(item_id) {
            Ok(()) => {
                trace.end(status);
                Ok(())
            }
            Err(e) => {
                trace.exception(status, &e);
                Err(e)
            }
        }
    }
}

/// Layers share one tracer; the chain follows the thread.
mod per_thread {
    use super::*;

    pub fn controller(trace: &ThreadLocalLogTrace, item_id: &str) -> Result<(), IllegalItem> {
        let guard = trace.enter("OrderController.request()");
        let result = service(trace, item_id);
        match &result {
            Ok(()) => guard.finish(),
            Err(e) => guard.fail(e),
        }
        result
    }

    fn service(trace: &ThreadLocalLogTrace, item_id: &str) -> Result<(), IllegalItem> {
        let guard = trace.enter("OrderService.orderItem()");
        let result = repository(trace, item_id);
        match &result {
            Ok(()) => guard.finish(),
            Err(e) => guard.fail(e),
        }
        result
    }

    fn repository(trace: &ThreadLocalLogTrace, item_id: &str) -> Result<(), IllegalItem> {
        let guard = trace.enter("OrderRepository.save()");
        let result = save(item_id);
        match &result {
            Ok(()) => guard.finish(),
            Err(e) => guard.fail(e),
        }
        result
    }
}

fn templated(trace: &TraceContext, item_id: &str) -> Result<(), IllegalItem> {
    let template = trace.template();
    template.execute_root("OrderController.request()", |root| {
        template.execute_sync(root, "OrderService.orderItem()", |service| {
            template.execute_sync(service, "OrderRepository.save()", |_| save(item_id))
        })
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let trace = TraceContext::new();
    let thread_trace = ThreadLocalLogTrace::with_context(trace.clone());

    for item_id in ["item-1", "ex"] {
        if let Err(e) = explicit::controller(&trace, item_id) {
            tracing::error!("explicit: {e}");
        }
        if let Err(e) = per_thread::controller(&thread_trace, item_id) {
            tracing::error!("thread-local: {e}");
        }
        if let Err(e) = templated(&trace, item_id) {
            tracing::error!("template: {e}");
        }
    }
}
