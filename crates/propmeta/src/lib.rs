//! # Propmeta
//!
//! Attach typed metadata to the properties of Rust types and read it back
//! at runtime.
//!
//! Metadata lives in a registry keyed by `(class, property, key)`:
//!
//! - **Class**: a type implementing [`Class`], which names itself and lists
//!   its annotatable properties (see [`class_type!`]).
//! - **Key**: a [`MetadataKey<V>`], a unique token fixing the value type `V`.
//!   Keys are compared by identity, never by name.
//! - **Value**: whatever was last stored for the triple. Lookups return a
//!   caller-supplied fallback when nothing was stored.
//!
//! Annotations are written at start-up, usually through a [`Declaration`],
//! and read later from the live [`Registry`] or from a frozen [`Snapshot`].
//! Lookups accept either an instance or a [`TypeOf`] descriptor.
//!
//! ```
//! use propmeta::{annotate, class_type, lookup, type_of, Annotation, MetadataKey};
//!
//! struct User {
//!     name: String,
//! }
//! class_type!(User { name });
//!
//! let width = MetadataKey::<u32>::new("width");
//! annotate(&width, 30).apply::<User>("name").unwrap();
//!
//! let user = User { name: "ada".into() };
//! assert_eq!(lookup(&user, "name", &width, 0), 30);
//! assert_eq!(lookup(type_of::<User>(), "name", &width, 0), 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod config;
pub mod declare;
pub mod error;
pub mod key;
pub mod registry;

// Re-export main types
pub use class::{type_of, Class, ClassId, KeyOf, ObjectOrType, TypeOf};
pub use config::RegistryConfig;
pub use declare::{declare, Declaration};
pub use error::{MetadataError, Result};
pub use key::{KeyId, MetadataKey};
pub use registry::{
    annotate, global, lookup, Annotation, Annotator, ErasedValue, MetadataSource, Registry,
    Snapshot,
};

/// Propmeta version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
