//! Metrics for the mapper, grouped by phase.
//!
//! Each phase (registry dispatch, projection) defines its metrics in a dedicated
//! submodule so names stay consistent and conflicts are caught at registration.
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

pub mod dispatch;
pub mod projection;
pub mod registry;

pub use dispatch::DispatchMetrics;
pub use projection::ProjectionMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

/// Install a Prometheus recorder and register all phase metrics.
///
/// Idempotent. No HTTP listener is started; callers render the returned handle
/// themselves. Returns `None` if another recorder was already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus recorder installed");
                registry::register_all_metrics();
                Some(handle)
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
                None
            }
        })
        .clone()
}

/// Implemented by each phase's metrics collection
pub trait PhaseMetrics {
    /// Register all metrics for this phase
    fn register_metrics();

    /// Get the phase name for prefixing metrics
    fn phase_name() -> &'static str;

    /// Get documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Build a metric name following `automapper_{phase}_{name}[_total]`
// `concat!` needs a literal; keep the prefix equal to `constants::METRIC_PREFIX`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("automapper_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("automapper_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
