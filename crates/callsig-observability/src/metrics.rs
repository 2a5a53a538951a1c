//! CallSig metrics definitions.
//!
//! All metrics use OpenTelemetry conventions. With no global meter provider
//! installed every instrument is a no-op.

use opentelemetry::{
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Central metrics handle for CallSig.
#[derive(Clone)]
pub struct CallSigMetrics {
    pub candidates_tried: Counter<u64>,
    pub candidates_matched: Counter<u64>,
    pub calls_classified: Counter<u64>,
    pub calls_unclassified: Counter<u64>,
    pub resolve_latency_ms: Histogram<f64>,
    pub stale_results_dropped: Counter<u64>,
}

impl CallSigMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            candidates_tried: meter
                .u64_counter("callsig.candidates_tried")
                .with_description("Candidate signatures submitted for resolution")
                .init(),
            candidates_matched: meter
                .u64_counter("callsig.candidates_matched")
                .with_description("Candidates whose decode/re-encode round trip matched")
                .init(),
            calls_classified: meter
                .u64_counter("callsig.calls_classified")
                .with_description("Calls explained by at least one signature")
                .init(),
            calls_unclassified: meter
                .u64_counter("callsig.calls_unclassified")
                .with_description("Calls no candidate explained")
                .init(),
            resolve_latency_ms: meter
                .f64_histogram("callsig.resolve_latency_ms")
                .with_description("Time to resolve one call in milliseconds")
                .init(),
            stale_results_dropped: meter
                .u64_counter("callsig.stale_results_dropped")
                .with_description("Results discarded because a newer request superseded them")
                .init(),
        }
    }

    /// Handle on the global meter provider.
    pub fn global() -> Self {
        Self::new(&opentelemetry::global::meter("callsig"))
    }

    /// Record one finished resolution.
    pub fn record_resolution(&self, tried: usize, matched: usize, method: Option<&str>, ms: f64) {
        self.candidates_tried.add(tried as u64, &[]);
        self.candidates_matched.add(matched as u64, &[]);
        match method {
            Some(m) => self
                .calls_classified
                .add(1, &[KeyValue::new("method", m.to_string())]),
            None => self.calls_unclassified.add(1, &[]),
        }
        self.resolve_latency_ms.record(ms, &[]);
    }

    pub fn record_stale(&self) {
        self.stale_results_dropped.add(1, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_provider_accepts_records() {
        let metrics = CallSigMetrics::global();
        metrics.record_resolution(3, 1, Some("transfer"), 0.4);
        metrics.record_resolution(2, 0, None, 0.1);
        metrics.record_stale();
    }
}
