//! Key-based conversion registry and a configurable auto-map projector for
//! dynamic records.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod projector;
pub mod registry;
pub mod type_key;
pub mod value;

pub use config::{FieldPath, ProjectionConfig};
pub use error::{MapperError, Result};
pub use projector::{project, project_typed, Projector};
pub use registry::{ConversionEntry, FnProfile, MappingProfile, Registry, SharedRegistry};
pub use type_key::TypeKey;
pub use value::{Key, Record, Symbol, Value, ValueKind};
