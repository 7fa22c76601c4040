//! Maximum length annotation

use once_cell::sync::Lazy;
use propmeta::{global, Annotation, Annotator, MetadataKey, MetadataSource, ObjectOrType};

/// Key under which maximum lengths are stored.
pub static MAX_LENGTH: Lazy<MetadataKey<Option<usize>>> =
    Lazy::new(|| MetadataKey::new("maxLength"));

/// Maximum length of a property.
///
/// `MaxLength::default()` annotates without a value, which reads back as
/// `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxLength(pub Option<usize>);

impl MaxLength {
    /// Annotation with a concrete maximum.
    pub fn new(length: usize) -> Self {
        Self(Some(length))
    }
}

impl Annotation for MaxLength {
    fn annotator(&self) -> Annotator {
        Annotator::new(&*MAX_LENGTH, self.0)
    }
}

/// Maximum length stored for `property` of `target` in the global registry.
pub fn max_length_of<O: ObjectOrType>(target: O, property: &str) -> Option<usize> {
    max_length_of_in(global(), target, property)
}

/// Maximum length stored for `property` of `target` in `source`.
pub fn max_length_of_in<S, O>(source: &S, target: O, property: &str) -> Option<usize>
where
    S: MetadataSource,
    O: ObjectOrType,
{
    source.lookup(target, property, &*MAX_LENGTH, None)
}
