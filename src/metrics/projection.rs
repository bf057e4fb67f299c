//! Projection phase metrics

use crate::constants::PROJECTION_PHASE;
use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct ProjectionMetrics;

impl ProjectionMetrics {
    /// Record a finished projection and how many properties it wrote, nested ones included
    pub fn record_projection(properties_written: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "projection", "projections")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "projection", "properties_written"))
            .increment(properties_written as u64);
        ::metrics::histogram!(phase_metric!(histogram, "projection", "duration_seconds"))
            .record(duration_secs);
    }

    pub fn record_rejected_source() {
        ::metrics::counter!(phase_metric!(counter, "projection", "rejected_sources")).increment(1);
    }
}

impl PhaseMetrics for ProjectionMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "projection", "projections"));
        let _ = counter!(phase_metric!(counter, "projection", "properties_written"));
        let _ = counter!(phase_metric!(counter, "projection", "rejected_sources"));
        let _ = histogram!(phase_metric!(histogram, "projection", "duration_seconds"));
    }

    fn phase_name() -> &'static str {
        PROJECTION_PHASE
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "projection", "projections"),
                metric_type: MetricType::Counter,
                help: "Records projected onto a destination",
            },
            MetricDoc {
                name: phase_metric!(counter, "projection", "properties_written"),
                metric_type: MetricType::Counter,
                help: "Destination properties written, nested records included",
            },
            MetricDoc {
                name: phase_metric!(counter, "projection", "rejected_sources"),
                metric_type: MetricType::Counter,
                help: "Projections refused because the source was an array",
            },
            MetricDoc {
                name: phase_metric!(histogram, "projection", "duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent projecting one source record",
            },
        ]
    }
}
