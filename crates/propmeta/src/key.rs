//! Opaque metadata keys

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identifier of a metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(u64);

impl KeyId {
    fn fresh() -> Self {
        Self(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A unique token naming one metadata family and the type of value it stores.
///
/// Two keys are equal only if one is a copy of the other: creating a key
/// with a name another key already uses yields a different key.
///
/// # Example
///
/// ```
/// use propmeta::MetadataKey;
///
/// let a = MetadataKey::<usize>::new("length");
/// let b = MetadataKey::<usize>::new("length");
///
/// assert_eq!(a, a);
/// assert_ne!(a, b);
/// assert_eq!(a.name(), b.name());
/// ```
pub struct MetadataKey<V> {
    id: KeyId,
    name: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> MetadataKey<V> {
    /// Create a new key. The name is for display only.
    pub fn new(name: &'static str) -> Self {
        Self {
            id: KeyId::fresh(),
            name,
            _value: PhantomData,
        }
    }

    /// Unique identifier of this key.
    pub fn id(&self) -> KeyId {
        self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<V> Clone for MetadataKey<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for MetadataKey<V> {}

impl<V> PartialEq for MetadataKey<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for MetadataKey<V> {}

impl<V> Hash for MetadataKey<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<V> fmt::Debug for MetadataKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataKey({}#{})", self.name, self.id.0)
    }
}

impl<V> fmt::Display for MetadataKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_per_construction() {
        let a = MetadataKey::<u8>::new("same");
        let b = MetadataKey::<u8>::new("same");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_copied_key_is_equal() {
        let a = MetadataKey::<String>::new("copy");
        let b = a;
        assert_eq!(a, b);
        assert_eq!(b.to_string(), "copy");
    }
}
