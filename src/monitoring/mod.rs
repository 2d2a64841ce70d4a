/*!
 * Monitoring
 * Structured logging setup and launch tracing
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, LaunchSpan, TRACE_JSON_ENV};
