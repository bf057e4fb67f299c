use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a logical type, used to key conversions in a [`Registry`].
///
/// Keys compare by identity only. Two keys minted with [`TypeKey::new`] are never
/// equal, even when they share a name, while [`TypeKey::of`] yields the same key for
/// the same Rust type every time. The name is kept for diagnostics.
///
/// [`Registry`]: crate::registry::Registry
#[derive(Clone)]
pub struct TypeKey {
    identity: Identity,
    name: Arc<str>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Identity {
    Token(u64),
    Type(TypeId),
}

impl TypeKey {
    /// Mint a fresh, unique key
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            identity: Identity::Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
        }
    }

    /// Key derived from a Rust type; stable for the lifetime of the process
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            identity: Identity::Type(TypeId::of::<T>()),
            name: short_type_name(type_name::<T>()).into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// `alloc::string::String` -> `String`, `app::User<app::Id>` -> `User<Id>`
fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (idx, ch) in full.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            short.push_str(last_path_segment(&full[segment_start..idx]));
            short.push(ch);
            segment_start = idx + ch.len_utf8();
        }
    }
    short.push_str(last_path_segment(&full[segment_start..]));
    short
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            Identity::Token(token) => write!(f, "TypeKey({}#{})", self.name, token),
            Identity::Type(_) => write!(f, "TypeKey({})", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Invoice;

    #[test]
    fn minted_keys_are_unique_even_with_same_name() {
        let a = TypeKey::new("User");
        let b = TypeKey::new("User");

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), "User");
    }

    #[test]
    fn type_derived_keys_are_stable() {
        assert_eq!(TypeKey::of::<Invoice>(), TypeKey::of::<Invoice>());
        assert_ne!(TypeKey::of::<Invoice>(), TypeKey::of::<String>());
        assert_ne!(TypeKey::of::<Invoice>(), TypeKey::new("Invoice"));
    }

    #[test]
    fn type_names_are_shortened_for_display() {
        assert_eq!(TypeKey::of::<Invoice>().name(), "Invoice");
        assert_eq!(TypeKey::of::<Vec<String>>().name(), "Vec<String>");
    }
}
