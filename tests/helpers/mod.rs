// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for calltrace integration tests
//!
//! Provides a small controller/service/repository call stack that traces
//! itself through any [`LogTrace`], plus a parser for rendered trace lines.

#![allow(dead_code)]

use anyhow::{anyhow, bail, Context, Result};
use calltrace::LogTrace;

/// Error raised by [`OrderRepository::save`] for the item id `"ex"`
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("illegal item {0}")]
pub struct IllegalItem(pub String);

/// Innermost layer: fails for item id `"ex"`
pub struct OrderRepository<'a, T: LogTrace> {
    pub trace: &'a T,
}

impl<T: LogTrace> OrderRepository<'_, T> {
    pub fn save(&self, item_id: &str) -> Result<(), IllegalItem> {
        let status = self.trace.begin("OrderRepository.save()");
        if item_id == "ex" {
            let err = IllegalItem(item_id.to_string());
            self.trace.exception(status, &err);
            return Err(err);
        }
        self.trace.end(status);
        Ok(())
    }
}

/// Middle layer: delegates to the repository
pub struct OrderService<'a, T: LogTrace> {
    pub trace: &'a T,
    pub repository: OrderRepository<'a, T>,
}

impl<T: LogTrace> OrderService<'_, T> {
    pub fn order_item(&self, item_id: &str) -> Result<(), IllegalItem> {
        let status = self.trace.begin("OrderService.orderItem()");
        match self.repository.save(item_id) {
            Ok(()) => {
                self.trace.end(status);
                Ok(())
            }
            Err(err) => {
                self.trace.exception(status, &err);
                Err(err)
            }
        }
    }
}

/// Service decorator that picks its tracer at runtime
pub struct OrderServiceProxy<'a> {
    pub trace: &'a dyn LogTrace,
    pub target: &'a dyn Fn(&str) -> Result<(), IllegalItem>,
}

impl OrderServiceProxy<'_> {
    pub fn order_item(&self, item_id: &str) -> Result<(), IllegalItem> {
        let guard = self.trace.enter("OrderService.orderItem()");
        let result = (self.target)(item_id);
        match &result {
            Ok(()) => guard.finish(),
            Err(err) => guard.fail(err),
        }
        result
    }
}

/// A rendered trace line split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub chain_id: String,
    /// Everything between the chain id and the message: indent plus prefix
    pub marker: String,
    pub rest: String,
}

impl ParsedLine {
    /// Rendered width of the indentation in front of the prefix
    pub fn indent_width(&self) -> usize {
        self.marker.len() - 3
    }

    /// Elapsed milliseconds reported by a completion line
    pub fn elapsed_ms(&self) -> Result<u128> {
        let tail = self
            .rest
            .split(" time=")
            .nth(1)
            .ok_or_else(|| anyhow!("no elapsed time in {:?}", self.rest))?;
        let ms = tail
            .split("ms")
            .next()
            .ok_or_else(|| anyhow!("malformed elapsed time in {:?}", self.rest))?;
        ms.parse().context("elapsed time is not a number")
    }
}

/// Parses `[<id>] <indent><prefix><rest>` using the default glyphs
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let line = line
        .strip_prefix('[')
        .ok_or_else(|| anyhow!("line does not start with a chain id: {line:?}"))?;
    let (chain_id, body) = line
        .split_once("] ")
        .ok_or_else(|| anyhow!("unterminated chain id: {line:?}"))?;

    for prefix in ["-->", "<--", "<X-"] {
        if let Some(at) = body.find(prefix) {
            let marker_end = at + prefix.len();
            return Ok(ParsedLine {
                chain_id: chain_id.to_string(),
                marker: body[..marker_end].to_string(),
                rest: body[marker_end..].to_string(),
            });
        }
    }
    bail!("no trace prefix in {body:?}")
}
