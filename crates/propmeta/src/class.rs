//! Type description: class identity, property names and target normalization
//!
//! Metadata is attached to a `(class, property)` pair. A class is any
//! `'static` type implementing [`Class`], which names the type and lists
//! the properties that may carry annotations. Lookups accept either an
//! instance (`&T`) or a descriptor ([`TypeOf<T>`]); both resolve to the
//! same [`ClassId`] through [`ObjectOrType`].

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::{MetadataError, Result};

/// A type whose properties can be annotated.
///
/// Usually implemented with [`class_type!`](crate::class_type):
///
/// ```
/// use propmeta::{class_type, Class};
///
/// struct User {
///     name: String,
///     email: String,
/// }
///
/// class_type!(User { name, email });
///
/// assert_eq!(User::NAME, "User");
/// assert_eq!(User::PROPERTIES, &["name", "email"]);
/// ```
pub trait Class: 'static {
    /// Display name used in logs and errors
    const NAME: &'static str;

    /// Property names that may be annotated
    const PROPERTIES: &'static [&'static str];

    /// Check whether `property` is declared by this class.
    fn has_property(property: &str) -> bool {
        Self::PROPERTIES.contains(&property)
    }
}

/// Implement [`Class`] for a type from its list of property names.
///
/// ```
/// use propmeta::{class_type, Class};
///
/// struct Product;
/// class_type!(Product { sku, title });
///
/// assert!(Product::has_property("sku"));
/// assert!(!Product::has_property("price"));
/// ```
#[macro_export]
macro_rules! class_type {
    ($ty:ident { $($prop:ident),* $(,)? }) => {
        impl $crate::Class for $ty {
            const NAME: &'static str = stringify!($ty);
            const PROPERTIES: &'static [&'static str] = &[$(stringify!($prop)),*];
        }
    };
}

/// Runtime identity of a [`Class`].
///
/// Compared and hashed by `TypeId` only; the name is carried for display.
#[derive(Debug, Clone, Copy)]
pub struct ClassId {
    type_id: TypeId,
    name: &'static str,
}

impl ClassId {
    /// Identity of the class `T`.
    pub fn of<T: Class>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
        }
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The class display name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ClassId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassId {}

impl Hash for ClassId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Zero-sized descriptor standing for the class `T` itself.
pub struct TypeOf<T: Class>(PhantomData<fn() -> T>);

impl<T: Class> TypeOf<T> {
    /// Create a descriptor for `T`.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Class> Default for TypeOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Class> Clone for TypeOf<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Class> Copy for TypeOf<T> {}

impl<T: Class> fmt::Debug for TypeOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeOf<{}>", T::NAME)
    }
}

/// Descriptor for the class `T`.
pub const fn type_of<T: Class>() -> TypeOf<T> {
    TypeOf::new()
}

/// Either an instance of a class or a descriptor of it.
///
/// This is the single normalization point between the two forms a lookup
/// target can take.
pub trait ObjectOrType {
    /// The class both forms resolve to
    type Class: Class;

    /// Identity of the resolved class.
    fn class_id(&self) -> ClassId {
        ClassId::of::<Self::Class>()
    }
}

impl<T: Class> ObjectOrType for &T {
    type Class = T;
}

impl<T: Class> ObjectOrType for TypeOf<T> {
    type Class = T;
}

/// A property name verified to be declared by the class `T`.
pub struct KeyOf<T: Class> {
    name: &'static str,
    _class: PhantomData<fn() -> T>,
}

impl<T: Class> KeyOf<T> {
    /// Verify `property` against `T::PROPERTIES`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownProperty`] if `T` does not declare
    /// the property.
    pub fn new(property: &str) -> Result<Self> {
        T::PROPERTIES
            .iter()
            .copied()
            .find(|declared| *declared == property)
            .map(|name| Self {
                name,
                _class: PhantomData,
            })
            .ok_or_else(|| MetadataError::UnknownProperty {
                class: T::NAME,
                property: property.to_string(),
            })
    }

    /// The property name.
    pub fn as_str(&self) -> &'static str {
        self.name
    }
}

impl<T: Class> Clone for KeyOf<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Class> Copy for KeyOf<T> {}

impl<T: Class> PartialEq for KeyOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: Class> Eq for KeyOf<T> {}

impl<T: Class> fmt::Debug for KeyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", T::NAME, self.name)
    }
}

impl<T: Class> fmt::Display for KeyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<T: Class> TryFrom<&str> for KeyOf<T> {
    type Error = MetadataError;

    fn try_from(property: &str) -> Result<Self> {
        Self::new(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    struct Point {
        x: i32,
        y: i32,
    }

    class_type!(Point { x, y });

    struct Empty;

    class_type!(Empty {});

    #[test]
    fn test_class_type_macro() {
        assert_eq!(Point::NAME, "Point");
        assert_eq!(Point::PROPERTIES, &["x", "y"]);
        assert!(Empty::PROPERTIES.is_empty());
    }

    #[test]
    fn test_instance_and_descriptor_resolve_alike() {
        let point = Point { x: 1, y: 2 };
        assert_eq!((&point).class_id(), type_of::<Point>().class_id());
        assert_ne!(type_of::<Point>().class_id(), type_of::<Empty>().class_id());
    }

    #[test]
    fn test_class_id_display() {
        assert_eq!(ClassId::of::<Point>().to_string(), "Point");
    }

    #[test]
    fn test_key_of_accepts_declared_property() {
        let key = KeyOf::<Point>::new("y").unwrap();
        assert_eq!(key.as_str(), "y");
        assert_eq!(format!("{:?}", key), "Point::y");
    }

    #[test]
    fn test_key_of_rejects_unknown_property() {
        let err = KeyOf::<Point>::new("z").unwrap_err();
        assert_eq!(
            err,
            MetadataError::UnknownProperty {
                class: "Point",
                property: "z".to_string(),
            }
        );
        assert!(KeyOf::<Empty>::try_from("x").is_err());
    }
}
