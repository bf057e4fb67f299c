//! Registry phase metrics: registrations and conversions.

use crate::constants::REGISTRY_PHASE;
use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct DispatchMetrics;

impl DispatchMetrics {
    pub fn record_registered() {
        ::metrics::counter!(phase_metric!(counter, "registry", "entries_registered")).increment(1);
    }

    pub fn record_duplicate_rejected() {
        ::metrics::counter!(phase_metric!(counter, "registry", "duplicates_rejected")).increment(1);
    }

    pub fn record_conversion(duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "registry", "conversions")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "registry", "conversion_duration_seconds"))
            .record(duration_secs);
    }

    pub fn record_unregistered_lookup() {
        ::metrics::counter!(phase_metric!(counter, "registry", "unregistered_lookups")).increment(1);
    }

    pub fn record_type_mismatch() {
        ::metrics::counter!(phase_metric!(counter, "registry", "type_mismatches")).increment(1);
    }
}

impl PhaseMetrics for DispatchMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        // Pre-register (bind to placeholders to satisfy must_use)
        let _ = counter!(phase_metric!(counter, "registry", "entries_registered"));
        let _ = counter!(phase_metric!(counter, "registry", "duplicates_rejected"));
        let _ = counter!(phase_metric!(counter, "registry", "conversions"));
        let _ = counter!(phase_metric!(counter, "registry", "unregistered_lookups"));
        let _ = counter!(phase_metric!(counter, "registry", "type_mismatches"));
        let _ = histogram!(phase_metric!(histogram, "registry", "conversion_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        REGISTRY_PHASE
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "registry", "entries_registered"),
                metric_type: MetricType::Counter,
                help: "Conversion entries added to a registry",
            },
            MetricDoc {
                name: phase_metric!(counter, "registry", "duplicates_rejected"),
                metric_type: MetricType::Counter,
                help: "Registrations rejected because the key pair was already bound",
            },
            MetricDoc {
                name: phase_metric!(counter, "registry", "conversions"),
                metric_type: MetricType::Counter,
                help: "Conversions dispatched to a registered function",
            },
            MetricDoc {
                name: phase_metric!(counter, "registry", "unregistered_lookups"),
                metric_type: MetricType::Counter,
                help: "Conversions requested for a key pair with no entry",
            },
            MetricDoc {
                name: phase_metric!(counter, "registry", "type_mismatches"),
                metric_type: MetricType::Counter,
                help: "Conversions requested with Rust types other than the entry's",
            },
            MetricDoc {
                name: phase_metric!(histogram, "registry", "conversion_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent inside conversion functions",
            },
        ]
    }
}
