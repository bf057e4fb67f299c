//! Shared names used across the crate so logs, metrics and errors stay consistent

// Logging
pub const DEFAULT_LOG_FILTER: &str = "automapper=info";
pub const LOG_FILE_NAME: &str = "automapper.log";

// Metrics (see `metrics::phase_metric!`)
pub const METRIC_PREFIX: &str = "automapper_";
pub const REGISTRY_PHASE: &str = "registry";
pub const PROJECTION_PHASE: &str = "projection";

/// Separator between segments of a dotted field path
pub const PATH_SEPARATOR: char = '.';

pub const ARRAY_SOURCE_MESSAGE: &str =
    "auto mapping is not available when the source object is an array";

// Extensions understood by `ProjectionConfig::load`
pub const TOML_EXTENSION: &str = "toml";
pub const JSON_EXTENSION: &str = "json";
