use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::{MapperError, Result};
use crate::type_key::TypeKey;

type ErasedConvert = dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync;

/// A conversion bound to a `(source, destination)` key pair.
///
/// The function is stored type-erased; the entry remembers the Rust types it was
/// built for so [`ConversionEntry::apply`] can refuse mismatched calls.
#[derive(Clone)]
pub struct ConversionEntry {
    source_key: TypeKey,
    destination_key: TypeKey,
    source_type: (TypeId, &'static str),
    destination_type: (TypeId, &'static str),
    convert: Arc<ErasedConvert>,
}

impl ConversionEntry {
    pub fn new<S, D, F>(source_key: TypeKey, destination_key: TypeKey, convert: F) -> Self
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let erased = move |source: &dyn Any| -> Option<Box<dyn Any>> {
            source
                .downcast_ref::<S>()
                .map(|source| Box::new(convert(source)) as Box<dyn Any>)
        };

        Self {
            source_key,
            destination_key,
            source_type: (TypeId::of::<S>(), type_name::<S>()),
            destination_type: (TypeId::of::<D>(), type_name::<D>()),
            convert: Arc::new(erased),
        }
    }

    /// Entry keyed by the Rust types themselves
    pub fn between<S, D, F>(convert: F) -> Self
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        Self::new(TypeKey::of::<S>(), TypeKey::of::<D>(), convert)
    }

    pub fn source_key(&self) -> &TypeKey {
        &self.source_key
    }

    pub fn destination_key(&self) -> &TypeKey {
        &self.destination_key
    }

    pub fn accepts<S: 'static, D: 'static>(&self) -> bool {
        self.source_type.0 == TypeId::of::<S>() && self.destination_type.0 == TypeId::of::<D>()
    }

    /// Run the conversion; its result is returned unchanged
    pub fn apply<S: 'static, D: 'static>(&self, source: &S) -> Result<D> {
        if !self.accepts::<S, D>() {
            return Err(self.mismatch::<S, D>());
        }

        (self.convert)(source)
            .and_then(|output| output.downcast::<D>().ok())
            .map(|output| *output)
            .ok_or_else(|| self.mismatch::<S, D>())
    }

    fn mismatch<S, D>(&self) -> MapperError {
        MapperError::ConversionTypeMismatch {
            source_key: self.source_key.clone(),
            destination_key: self.destination_key.clone(),
            expected: format!("{} -> {}", self.source_type.1, self.destination_type.1),
            found: format!("{} -> {}", type_name::<S>(), type_name::<D>()),
        }
    }
}

impl fmt::Debug for ConversionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionEntry")
            .field("source_key", &self.source_key)
            .field("destination_key", &self.destination_key)
            .field("source_type", &self.source_type.1)
            .field("destination_type", &self.destination_type.1)
            .finish()
    }
}
