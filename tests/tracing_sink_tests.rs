//! Integration tests for the `tracing` sink
//!
//! Captures JSON output from a `tracing-subscriber` and checks that every
//! trace line arrives with its structured correlation fields.

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use calltrace::{TraceContext, TracingSink};
use serde_json::Value;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn records(&self) -> Result<Vec<Value>> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)?
            .lines()
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }
}

fn capture<F: FnOnce()>(f: F) -> Captured {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured
}

#[test]
fn test_lines_carry_correlation_fields() -> Result<()> {
    let trace = TraceContext::new();
    let mut chain = String::new();

    let captured = capture(|| {
        let s1 = trace.begin("hello1");
        let s2 = trace.begin_sync(s1.trace_id(), "hello2");
        chain = s1.trace_id().id().to_string();
        trace.end(s2);
        trace.exception(s1, "illegal state");
    });

    let records = captured.records()?;
    assert_eq!(records.len(), 4);

    for record in &records {
        assert_eq!(record["fields"]["trace_id"], chain.as_str());
        let message = record["fields"]["message"].as_str().unwrap_or_default();
        assert!(message.starts_with(&format!("[{chain}]")));
    }

    let depths: Vec<u64> = records
        .iter()
        .map(|r| r["fields"]["depth"].as_u64().unwrap_or(u64::MAX))
        .collect();
    assert_eq!(depths, vec![0, 1, 1, 0]);

    assert_eq!(records[0]["level"], "INFO");
    assert!(records[0]["fields"].get("elapsed_ms").is_none());
    assert!(records[2]["fields"]["elapsed_ms"].is_u64());
    assert_eq!(records[3]["level"], "WARN");
    assert_eq!(records[3]["fields"]["kind"], "exception");
    Ok(())
}

#[test]
fn test_configured_level_applies_to_begin_and_end() -> Result<()> {
    let trace = TraceContext::new().with_sink(TracingSink::new().with_level(Level::DEBUG));

    let captured = capture(|| {
        let status = trace.begin("quiet");
        trace.end(status);
    });

    let records = captured.records()?;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["level"] == "DEBUG"));
    Ok(())
}

#[test]
fn test_warn_and_error_levels_are_honoured() -> Result<()> {
    let cases = [
        (Level::WARN, "WARN", "WARN"),
        (Level::ERROR, "ERROR", "ERROR"),
    ];
    for (configured, begin_end, exception) in cases {
        let trace = TraceContext::new().with_sink(TracingSink::new().with_level(configured));

        let captured = capture(|| {
            let s1 = trace.begin("loud");
            let s2 = trace.begin_sync(s1.trace_id(), "louder");
            trace.end(s2);
            trace.exception(s1, "illegal state");
        });

        let records = captured.records()?;
        let levels: Vec<&str> = records
            .iter()
            .map(|r| r["level"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(levels, vec![begin_end, begin_end, begin_end, exception]);
    }
    Ok(())
}
