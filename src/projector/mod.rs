//! Auto-map engine: filtered, depth-controlled copy of a source record onto a
//! destination record.

pub mod path_tree;

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ProjectionConfig;
use crate::error::{MapperError, Result};
use crate::metrics::ProjectionMetrics;
use crate::value::{Key, Record, Value};

pub use path_tree::PathTree;

/// Filters in force at one recursion depth
#[derive(Clone, Copy)]
struct Level<'t> {
    /// `None` selects every key
    select: Option<&'t PathTree>,
    ignore: Option<&'t PathTree>,
    /// Only refill keys the destination already has
    existing_keys_only: bool,
}

impl<'t> Level<'t> {
    fn admits(&self, key: &Key, destination: &Record) -> bool {
        let selected = match self.select {
            Some(select) => select.child(key).is_some(),
            None => !self.existing_keys_only || destination.contains_key(key),
        };
        selected && !self.ignore.is_some_and(|ignore| ignore.names_exactly(key))
    }

    fn descend(&self, key: &Key) -> Level<'t> {
        Level {
            // A bare select entry hands the whole subtree down
            select: self
                .select
                .and_then(|select| select.child(key))
                .filter(|node| !node.is_leaf()),
            ignore: self
                .ignore
                .and_then(|ignore| ignore.child(key))
                .filter(|node| !node.is_leaf()),
            existing_keys_only: false,
        }
    }
}

/// A projection config with its `select`/`ignore` paths compiled.
///
/// Build once and reuse across calls; projecting never mutates the config.
pub struct Projector<'c> {
    config: &'c ProjectionConfig,
    select: Option<PathTree>,
    ignore: Option<PathTree>,
}

impl<'c> Projector<'c> {
    pub fn new(config: &'c ProjectionConfig) -> Self {
        let select = config
            .select
            .as_ref()
            .filter(|paths| !paths.is_empty())
            .map(|paths| PathTree::from_paths(paths));
        let ignore = config
            .ignore
            .as_ref()
            .filter(|paths| !paths.is_empty())
            .map(|paths| PathTree::from_paths(paths));

        Self {
            config,
            select,
            ignore,
        }
    }

    /// Project `source` onto `destination` and return the destination.
    ///
    /// Primitives, `undefined` and `null` are returned as they are and the destination
    /// is dropped untouched. Arrays cannot be projected.
    pub fn project(&self, source: &Value, mut destination: Record) -> Result<Value> {
        match source {
            Value::Record(record) => {
                self.project_into(record, &mut destination);
                Ok(Value::Record(destination))
            }
            Value::Array(_) => {
                ProjectionMetrics::record_rejected_source();
                Err(MapperError::InvalidSourceKind)
            }
            other => Ok(other.clone()),
        }
    }

    /// Merge the projection of `source` into `destination` in place.
    ///
    /// Existing destination keys outside the projection are left alone. Without a
    /// `select`, a non-empty destination only has its existing keys refilled.
    pub fn project_into<'d>(&self, source: &Record, destination: &'d mut Record) -> &'d mut Record {
        let started = Instant::now();
        let level = Level {
            select: self.select.as_ref(),
            ignore: self.ignore.as_ref(),
            existing_keys_only: self.select.is_none() && !destination.is_empty(),
        };

        let written = self.project_level(source, destination, level);

        debug!(
            "Projected {} of {} source properties ({} written including nested)",
            destination.len(),
            source.len(),
            written
        );
        ProjectionMetrics::record_projection(written, started.elapsed().as_secs_f64());
        destination
    }

    fn project_level(&self, source: &Record, destination: &mut Record, level: Level<'_>) -> usize {
        let mut written = 0;

        for (key, value) in source.iter() {
            if !level.admits(key, destination) {
                trace!("Skipping unselected property '{}'", key);
                continue;
            }

            let projected = match value {
                Value::Array(items) => {
                    if !self.config.copy_arrays {
                        continue;
                    }
                    Value::Array(items.clone())
                }
                Value::Null => self.null_substitute(),
                Value::Undefined => self.undefined_substitute(),
                Value::Record(nested) => {
                    if !self.config.copy_objects {
                        continue;
                    }
                    let mut nested_destination = Record::new();
                    written += self.project_level(nested, &mut nested_destination, level.descend(key));
                    Value::Record(nested_destination)
                }
                primitive => primitive.clone(),
            };

            destination.insert(key.clone(), projected);
            written += 1;
        }

        written
    }

    fn null_substitute(&self) -> Value {
        self.config
            .default_value_if_null
            .as_ref()
            .or(self.config.default_value_if_null_or_undefined.as_ref())
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn undefined_substitute(&self) -> Value {
        self.config
            .default_value_if_undefined
            .as_ref()
            .or(self.config.default_value_if_null_or_undefined.as_ref())
            .cloned()
            .unwrap_or(Value::Undefined)
    }
}

/// Project `source` onto `destination` with a one-off [`Projector`]
pub fn project(source: &Value, destination: Record, config: &ProjectionConfig) -> Result<Value> {
    Projector::new(config).project(source, destination)
}

/// Project a serializable struct into a fresh destination and deserialize the result
pub fn project_typed<S, D>(source: &S, config: &ProjectionConfig) -> Result<D>
where
    S: Serialize + ?Sized,
    D: DeserializeOwned,
{
    let source = Value::from_serialize(source)?;
    project(&source, Record::new(), config)?.deserialize_into()
}
