// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware for call-chain tracing.
//!
//! [`TraceLayer`] wraps any [`tower::Service`] so that every call runs as the
//! root of its own call chain: a `-->` line when the call starts, and a `<--`
//! or `<X-` line when the response future resolves.
//!
//! ## Usage
//!
//! ```rust
//! use calltrace::transport::TraceLayer;
//! use tower::{service_fn, ServiceBuilder};
//!
//! let order_controller = service_fn(|item_id: &'static str| async move {
//!     if item_id == "ex" {
//!         Err(format!("illegal item {item_id}"))
//!     } else {
//!         Ok(item_id.len())
//!     }
//! });
//!
//! let service = ServiceBuilder::new()
//!     .layer(TraceLayer::new("OrderController.request()"))
//!     .service(order_controller);
//! # let _ = service;
//! ```

mod logging;

pub use logging::{TraceLayer, TraceService};
