//! # callsig-observability
//!
//! OpenTelemetry-based observability for CallSig.
//!
//! ## Built-in metrics
//! - `callsig.candidates_tried`      — counter, candidates fed to the resolver
//! - `callsig.candidates_matched`    — counter, candidates that round-tripped
//! - `callsig.calls_classified`      — counter, tagged with method
//! - `callsig.calls_unclassified`    — counter
//! - `callsig.resolve_latency_ms`    — histogram
//! - `callsig.stale_results_dropped` — counter
//!
//! ## Structured logging
//! Text or JSON lines, levels configurable per component.
//! `RUST_LOG`, when set, replaces the configured directives.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::CallSigMetrics;
pub use tracing_setup::{env_filter, init_tracing, LogConfig};
