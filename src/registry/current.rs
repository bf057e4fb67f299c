//! Optional process-wide registry.
//!
//! Nothing is installed until [`install`] (or [`Registry::new_current`]) runs. The last
//! install wins; handles obtained earlier keep pointing at the registry they were
//! given.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::{ConversionEntry, MappingProfile, Registry};
use crate::error::Result;
use crate::type_key::TypeKey;

pub type SharedRegistry = Arc<RwLock<Registry>>;

static CURRENT: Lazy<RwLock<Option<SharedRegistry>>> = Lazy::new(|| RwLock::new(None));

/// Make `registry` the current instance and return a handle to it
pub fn install(registry: Registry) -> SharedRegistry {
    let shared = Arc::new(RwLock::new(registry));
    let mut slot = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    if slot.replace(shared.clone()).is_some() {
        info!("Replacing the current mapping registry");
    } else {
        debug!("Installing the current mapping registry");
    }
    shared
}

/// Handle to the current instance, if one was installed
pub fn current() -> Option<SharedRegistry> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn current_or_install() -> SharedRegistry {
    current().unwrap_or_else(|| install(Registry::new()))
}

/// Register entries on the current instance, installing an empty one first if needed
pub fn register<I>(entries: I) -> Result<()>
where
    I: IntoIterator<Item = ConversionEntry>,
{
    let registry = current_or_install();
    let mut registry = registry.write().unwrap_or_else(PoisonError::into_inner);
    registry.register(entries)
}

pub fn add_profiles<'p, I>(profiles: I) -> Result<()>
where
    I: IntoIterator<Item = &'p dyn MappingProfile>,
{
    let registry = current_or_install();
    let mut registry = registry.write().unwrap_or_else(PoisonError::into_inner);
    registry.add_profiles(profiles)
}

/// Convert through the current instance.
///
/// Without an installed instance every pair is unregistered. The lock is released
/// before the conversion runs, so conversions may use this module themselves.
pub fn convert<S: 'static, D: 'static>(
    source_key: &TypeKey,
    destination_key: &TypeKey,
    source: &S,
) -> Result<D> {
    let entry = match current() {
        Some(registry) => {
            let registry = registry.read().unwrap_or_else(PoisonError::into_inner);
            registry.resolve(source_key, destination_key).cloned()
        }
        None => None,
    };

    match entry {
        Some(entry) => super::dispatch(&entry, source),
        None => Err(super::unregistered(source_key, destination_key)),
    }
}
