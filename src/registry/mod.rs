//! Conversion registry: exclusive `(source, destination)` bindings resolved by exact
//! key pair.

pub mod current;
pub mod entry;
pub mod profile;

pub use current::SharedRegistry;
pub use entry::ConversionEntry;
pub use profile::{FnProfile, MappingProfile};

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{MapperError, Result};
use crate::metrics::DispatchMetrics;
use crate::type_key::TypeKey;

/// Holds conversion functions keyed by `source key -> destination key`.
///
/// At most one entry exists per key pair. Instances are independent of each other;
/// see [`current`] for the optional process-wide instance.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<TypeKey, HashMap<TypeKey, ConversionEntry>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty registry and make it the process-wide current instance
    pub fn new_current() -> SharedRegistry {
        current::install(Self::new())
    }

    /// Register entries in order, stopping at the first already-bound key pair.
    ///
    /// Entries registered before the failure stay registered.
    pub fn register<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ConversionEntry>,
    {
        for entry in entries {
            self.register_entry(entry)?;
        }
        Ok(())
    }

    pub fn register_entry(&mut self, entry: ConversionEntry) -> Result<()> {
        if self.contains(entry.source_key(), entry.destination_key()) {
            warn!(
                "Rejecting duplicate mapping {} -> {}",
                entry.source_key(),
                entry.destination_key()
            );
            DispatchMetrics::record_duplicate_rejected();
            return Err(MapperError::DuplicateMapping {
                source_key: entry.source_key().clone(),
                destination_key: entry.destination_key().clone(),
            });
        }

        info!(
            "Registering mapping {} -> {}",
            entry.source_key(),
            entry.destination_key()
        );
        DispatchMetrics::record_registered();
        self.entries
            .entry(entry.source_key().clone())
            .or_default()
            .insert(entry.destination_key().clone(), entry);
        Ok(())
    }

    /// Register every entry of a profile
    pub fn add_profile(&mut self, profile: &dyn MappingProfile) -> Result<()> {
        let entries = profile.entries();
        debug!(
            "Adding profile '{}' with {} mappings",
            profile.name(),
            entries.len()
        );
        self.register(entries)
    }

    /// Register profiles in order, stopping at the first failure
    pub fn add_profiles<'p, I>(&mut self, profiles: I) -> Result<()>
    where
        I: IntoIterator<Item = &'p dyn MappingProfile>,
    {
        for profile in profiles {
            self.add_profile(profile)?;
        }
        Ok(())
    }

    /// Exact key pair lookup
    pub fn resolve(&self, source_key: &TypeKey, destination_key: &TypeKey) -> Option<&ConversionEntry> {
        self.entries
            .get(source_key)
            .and_then(|destinations| destinations.get(destination_key))
    }

    pub fn contains(&self, source_key: &TypeKey, destination_key: &TypeKey) -> bool {
        self.resolve(source_key, destination_key).is_some()
    }

    /// Convert `source` with the entry bound to the key pair
    pub fn convert<S: 'static, D: 'static>(
        &self,
        source_key: &TypeKey,
        destination_key: &TypeKey,
        source: &S,
    ) -> Result<D> {
        match self.resolve(source_key, destination_key) {
            Some(entry) => dispatch(entry, source),
            None => Err(unregistered(source_key, destination_key)),
        }
    }

    /// Convert between the keys derived from the Rust types `S` and `D`
    pub fn convert_between<S: 'static, D: 'static>(&self, source: &S) -> Result<D> {
        self.convert(&TypeKey::of::<S>(), &TypeKey::of::<D>(), source)
    }

    /// Destination keys registered for a source key
    pub fn destinations(&self, source_key: &TypeKey) -> Vec<&TypeKey> {
        self.entries
            .get(source_key)
            .map(|destinations| destinations.keys().collect())
            .unwrap_or_default()
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unregistered(source_key: &TypeKey, destination_key: &TypeKey) -> MapperError {
    DispatchMetrics::record_unregistered_lookup();
    MapperError::UnregisteredMapping {
        source_key: source_key.clone(),
        destination_key: destination_key.clone(),
    }
}

/// Run a resolved entry, recording its duration or the type mismatch
fn dispatch<S: 'static, D: 'static>(entry: &ConversionEntry, source: &S) -> Result<D> {
    debug!(
        "Converting {} -> {}",
        entry.source_key(),
        entry.destination_key()
    );
    let started = Instant::now();
    let converted = entry.apply(source);
    match &converted {
        Ok(_) => DispatchMetrics::record_conversion(started.elapsed().as_secs_f64()),
        Err(_) => DispatchMetrics::record_type_mismatch(),
    }
    converted
}
