//! Reusable, type-erased annotations

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{global, ErasedValue, Registry};
use crate::class::{Class, KeyOf};
use crate::error::Result;
use crate::key::{KeyId, MetadataKey};

/// A key and value ready to be stored on any number of properties.
///
/// Annotators erase the value type so that annotations from different
/// families can be collected side by side, e.g. in a
/// [`Declaration`](crate::Declaration).
#[derive(Clone)]
pub struct Annotator {
    key: KeyId,
    key_name: &'static str,
    value: ErasedValue,
}

impl Annotator {
    /// Pair `value` with `key`.
    pub fn new<V: Send + Sync + 'static>(key: &MetadataKey<V>, value: V) -> Self {
        Self {
            key: key.id(),
            key_name: key.name(),
            value: Arc::new(value),
        }
    }

    /// Identifier of the key this annotator writes.
    pub fn key_id(&self) -> KeyId {
        self.key
    }

    /// Name of the key this annotator writes.
    pub fn key_name(&self) -> &'static str {
        self.key_name
    }

    /// The carried value, if it is a `V`.
    pub fn value<V: 'static>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    pub(crate) fn erased_value(&self) -> ErasedValue {
        Arc::clone(&self.value)
    }
}

impl fmt::Debug for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotator")
            .field("key", &self.key_name)
            .field("type_id", &(*self.value).type_id())
            .finish()
    }
}

/// Anything that can be applied to a property as an annotation.
///
/// Applying the same annotation twice is harmless; applying a different
/// value under the same key replaces the earlier one.
pub trait Annotation {
    /// Convert into a type-erased annotator.
    fn annotator(&self) -> Annotator;

    /// Apply to `property` of `T` in the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownProperty`](crate::MetadataError::UnknownProperty)
    /// if `T` does not declare `property`.
    fn apply<T: Class>(&self, property: &str) -> Result<()> {
        self.apply_in::<T>(global(), property)
    }

    /// Apply to `property` of `T` in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownProperty`](crate::MetadataError::UnknownProperty)
    /// if `T` does not declare `property`.
    fn apply_in<T: Class>(&self, registry: &Registry, property: &str) -> Result<()> {
        let property = KeyOf::<T>::new(property)?;
        registry.store(property, &self.annotator());
        Ok(())
    }
}

impl Annotation for Annotator {
    fn annotator(&self) -> Annotator {
        self.clone()
    }
}

/// A `(key, value)` pair is the shortest way to write an ad-hoc annotation.
impl<V: Clone + Send + Sync + 'static> Annotation for (&MetadataKey<V>, V) {
    fn annotator(&self) -> Annotator {
        Annotator::new(self.0, self.1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::type_of;
    use crate::error::MetadataError;
    use crate::registry::MetadataSource;

    struct Form;
    crate::class_type!(Form { field });

    #[test]
    fn test_annotator_carries_value() {
        let key = MetadataKey::<i32>::new("offset");
        let annotator = Annotator::new(&key, -4);

        assert_eq!(annotator.key_id(), key.id());
        assert_eq!(annotator.key_name(), "offset");
        assert_eq!(annotator.value::<i32>(), Some(&-4));
        assert_eq!(annotator.value::<u32>(), None);
    }

    #[test]
    fn test_annotator_is_reusable() {
        let first = Registry::new();
        let second = Registry::new();
        let key = MetadataKey::<i32>::new("offset");
        let annotator = Annotator::new(&key, 9);

        annotator.apply_in::<Form>(&first, "field").unwrap();
        annotator.apply_in::<Form>(&first, "field").unwrap();
        annotator.apply_in::<Form>(&second, "field").unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first.lookup(type_of::<Form>(), "field", &key, 0), 9);
        assert_eq!(second.lookup(type_of::<Form>(), "field", &key, 0), 9);
    }

    #[test]
    fn test_apply_unknown_property_stores_nothing() {
        let registry = Registry::new();
        let key = MetadataKey::<i32>::new("offset");

        let err = Annotator::new(&key, 1)
            .apply_in::<Form>(&registry, "missing")
            .unwrap_err();

        assert!(matches!(err, MetadataError::UnknownProperty { class: "Form", .. }));
        assert!(registry.is_empty());
    }
}
