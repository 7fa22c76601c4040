//! Exact length annotation

use once_cell::sync::Lazy;
use propmeta::{global, Annotation, Annotator, MetadataKey, MetadataSource, ObjectOrType};

/// Key under which exact lengths are stored.
pub static LENGTH: Lazy<MetadataKey<Option<usize>>> = Lazy::new(|| MetadataKey::new("length"));

/// Exact length of a property, in characters or elements.
///
/// `Length::default()` annotates without a value, which reads back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Length(pub Option<usize>);

impl Length {
    /// Annotation with a concrete length.
    pub fn new(length: usize) -> Self {
        Self(Some(length))
    }
}

impl Annotation for Length {
    fn annotator(&self) -> Annotator {
        Annotator::new(&*LENGTH, self.0)
    }
}

/// Length stored for `property` of `target` in the global registry.
pub fn length_of<O: ObjectOrType>(target: O, property: &str) -> Option<usize> {
    length_of_in(global(), target, property)
}

/// Length stored for `property` of `target` in `source`.
pub fn length_of_in<S, O>(source: &S, target: O, property: &str) -> Option<usize>
where
    S: MetadataSource,
    O: ObjectOrType,
{
    source.lookup(target, property, &*LENGTH, None)
}
