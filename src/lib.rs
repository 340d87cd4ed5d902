//! Correlated call-chain tracing.
//!
//! `calltrace` gives nested operations a shared chain id and a nesting level,
//! and logs their entry and exit as indented, correlated lines:
//!
//! ```text
//! [3f2a9c1b] -->hello1
//! [3f2a9c1b] |-->hello2
//! [3f2a9c1b] |<--hello2 time=0ms
//! [3f2a9c1b] <--hello1 time=0ms
//! ```
//!
//! Tracing is woven in by the caller: explicit `begin`/`end` pairs, a
//! [`TraceGuard`], a [`TraceTemplate`] closure, or the [`transport::TraceLayer`]
//! tower middleware.
//!
//! # Example
//!
//! ```rust
//! use calltrace::{MemorySink, TraceContext};
//!
//! let sink = MemorySink::new();
//! let trace = TraceContext::new().with_sink(sink.clone());
//!
//! let s1 = trace.begin("hello1");
//! let s2 = trace.begin_sync(s1.trace_id(), "hello2");
//! assert_eq!(s2.trace_id().level(), 1);
//!
//! trace.end(s2);
//! trace.end(s1);
//! assert_eq!(sink.len(), 4);
//! ```

pub mod config;
pub mod errors;
pub mod sink;
pub mod trace;
pub mod transport;

pub use config::{TraceConfig, TraceConfigBuilder, TraceGlyphs};
pub use errors::{ConfigError, TraceError, TraceIdError};
pub use sink::{MemorySink, NoOpSink, TraceEvent, TraceEventKind, TraceSink, TracingSink};
pub use trace::{
    ErrorDescription, LogTrace, ThreadLocalLogTrace, TraceContext, TraceGuard, TraceId, TraceStatus, TraceTemplate,
};
