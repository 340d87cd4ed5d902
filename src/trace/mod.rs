//! Call-chain tracing.
//!
//! A call chain is the set of nested operations run for one top-level action
//! (for example one inbound request). Every operation in a chain logs with the
//! chain's shared id and is indented by its depth:
//!
//! ```text
//! [3f2a9c1b] -->OrderController.request()
//! [3f2a9c1b] |-->OrderService.orderItem()
//! [3f2a9c1b] |   |-->OrderRepository.save()
//! [3f2a9c1b] |   |<X-OrderRepository.save() time=0ms ex=RepositoryError: bad item
//! [3f2a9c1b] |<X-OrderService.orderItem() time=0ms ex=RepositoryError: bad item
//! [3f2a9c1b] <X-OrderController.request() time=1ms ex=RepositoryError: bad item
//! ```
//!
//! - [`TraceContext`] propagates the chain explicitly through [`TraceId`] values
//! - [`ThreadLocalLogTrace`] propagates it implicitly per thread
//! - [`TraceGuard`] and [`TraceTemplate`] guarantee completion on every exit path

mod context;
mod format;
mod guard;
mod id;
mod log_trace;
mod status;
mod template;

pub use context::TraceContext;
pub use format::ErrorDescription;
pub use guard::TraceGuard;
pub use id::TraceId;
pub use log_trace::{LogTrace, ThreadLocalLogTrace};
pub use status::TraceStatus;
pub use template::TraceTemplate;
