use std::any::type_name;

use super::entry::ConversionEntry;

/// A named group of conversion entries registered together.
pub trait MappingProfile {
    /// Entries to register, in registration order
    fn entries(&self) -> Vec<ConversionEntry>;

    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Profile built from a closure, for groups that don't warrant their own type
pub struct FnProfile<F> {
    name: String,
    build: F,
}

impl<F> FnProfile<F>
where
    F: Fn() -> Vec<ConversionEntry>,
{
    pub fn new(name: impl Into<String>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

impl<F> MappingProfile for FnProfile<F>
where
    F: Fn() -> Vec<ConversionEntry>,
{
    fn entries(&self) -> Vec<ConversionEntry> {
        (self.build)()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
