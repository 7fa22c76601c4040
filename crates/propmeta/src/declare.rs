//! Declaring all annotations of a class in one place

use std::fmt;
use std::marker::PhantomData;

use crate::class::{Class, KeyOf};
use crate::error::Result;
use crate::registry::{global, Annotation, Annotator, Registry};

/// Builder collecting the annotations of one class.
///
/// Nothing is stored until [`register`](Self::register) is called, and then
/// only if every named property is declared by `T`. Annotations are applied
/// in the order they were added, so a later one for the same property and
/// key wins.
///
/// # Example
///
/// ```
/// use propmeta::{class_type, declare, type_of, MetadataKey, MetadataSource, Registry};
///
/// struct Customer;
/// class_type!(Customer { name, phone });
///
/// let width = MetadataKey::<u32>::new("width");
/// let label = MetadataKey::<&'static str>::new("label");
/// let registry = Registry::new();
///
/// let applied = declare::<Customer>()
///     .property("name", (&width, 40))
///     .property("name", (&label, "Full name"))
///     .property("phone", (&width, 16))
///     .register_in(&registry)
///     .unwrap();
///
/// assert_eq!(applied, 3);
/// assert_eq!(registry.lookup(type_of::<Customer>(), "phone", &width, 0), 16);
/// ```
pub struct Declaration<T: Class> {
    annotations: Vec<(String, Annotator)>,
    _class: PhantomData<fn() -> T>,
}

/// Start a [`Declaration`] for `T`.
pub fn declare<T: Class>() -> Declaration<T> {
    Declaration::new()
}

impl<T: Class> Default for Declaration<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Class> Declaration<T> {
    /// Create an empty declaration.
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            _class: PhantomData,
        }
    }

    /// Add an annotation for `property`.
    pub fn property(mut self, property: impl Into<String>, annotation: impl Annotation) -> Self {
        self.annotations.push((property.into(), annotation.annotator()));
        self
    }

    /// Number of annotations collected so far.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if no annotations were added.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Apply every annotation to the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownProperty`](crate::MetadataError::UnknownProperty)
    /// for the first property `T` does not declare; nothing is stored then.
    pub fn register(self) -> Result<usize> {
        self.register_in(global())
    }

    /// Apply every annotation to `registry`, returning how many were applied.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownProperty`](crate::MetadataError::UnknownProperty)
    /// for the first property `T` does not declare; nothing is stored then.
    pub fn register_in(self, registry: &Registry) -> Result<usize> {
        let verified = self
            .annotations
            .iter()
            .map(|(property, annotator)| Ok((KeyOf::<T>::new(property)?, annotator)))
            .collect::<Result<Vec<_>>>()?;

        for (property, annotator) in &verified {
            registry.store(*property, annotator);
        }

        tracing::debug!(
            class = T::NAME,
            annotations = verified.len(),
            "registered declaration"
        );
        Ok(verified.len())
    }
}

impl<T: Class> fmt::Debug for Declaration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("class", &T::NAME)
            .field("annotations", &self.annotations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::type_of;
    use crate::error::MetadataError;
    use crate::key::MetadataKey;
    use crate::registry::MetadataSource;

    struct Order;
    crate::class_type!(Order { reference, note });

    #[test]
    fn test_empty_declaration_registers_nothing() {
        let registry = Registry::new();
        let declaration = declare::<Order>();
        assert!(declaration.is_empty());
        assert_eq!(declaration.register_in(&registry).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_later_entry_wins() {
        let registry = Registry::new();
        let key = MetadataKey::<u8>::new("size");

        declare::<Order>()
            .property("reference", (&key, 1))
            .property("reference", (&key, 2))
            .register_in(&registry)
            .unwrap();

        assert_eq!(registry.lookup(type_of::<Order>(), "reference", &key, 0), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_property_rejects_whole_declaration() {
        let registry = Registry::new();
        let key = MetadataKey::<u8>::new("size");

        let declaration = declare::<Order>()
            .property("reference", (&key, 1))
            .property("amount", (&key, 2));
        assert_eq!(declaration.len(), 2);

        let err = declaration.register_in(&registry).unwrap_err();
        assert_eq!(
            err,
            MetadataError::UnknownProperty {
                class: "Order",
                property: "amount".to_string(),
            }
        );
        assert!(registry.is_empty());
    }
}
