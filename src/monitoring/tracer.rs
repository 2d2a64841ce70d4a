/*!
 * Tracing
 * Structured logging for a bridge run using the tracing crate
 *
 * Logs always go to stderr: stdout belongs to the launched tool.
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Environment variable selecting JSON log lines
pub const TRACE_JSON_ENV: &str = "BRIDGE_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - BRIDGE_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for correlating one launch
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one bridge run, from descriptor reception to exec
///
/// On a successful exec the process image is replaced and the span is never
/// closed; the "exec'ing" event is the last thing logged.
pub struct LaunchSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl LaunchSpan {
    pub fn new(tool: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "launch",
            trace_id = %trace_id,
            tool = tool,
            fds_received = tracing::field::Empty,
            fds_moved = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn record_received(&self, count: usize) {
        self.span.record("fds_received", count);
    }

    pub fn record_moved(&self, count: usize) {
        self.span.record("fds_moved", count);
    }

    /// Record an error
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for LaunchSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros());

        if duration.as_millis() > 100 {
            warn!(
                trace_id = %self.trace_id,
                duration_ms = duration.as_millis(),
                slow = true,
                "slow launch"
            );
        } else {
            info!(trace_id = %self.trace_id, "launch ended without exec");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_unique() {
        let a = generate_trace_id();
        let b = generate_trace_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_launch_span_records_without_subscriber() {
        let span = LaunchSpan::new("true");
        span.record_received(2);
        span.record_moved(1);
        span.record_error("boom");
        assert!(!span.trace_id().is_empty());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
