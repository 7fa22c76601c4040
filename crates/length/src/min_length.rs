//! Minimum length annotation
//!
//! Unlike the other two families, a minimum always has a value: annotating
//! without one stores `0`, and unannotated properties also read as `0`.

use once_cell::sync::Lazy;
use propmeta::{global, Annotation, Annotator, MetadataKey, MetadataSource, ObjectOrType};

/// Key under which minimum lengths are stored.
pub static MIN_LENGTH: Lazy<MetadataKey<usize>> = Lazy::new(|| MetadataKey::new("minLength"));

/// Minimum length of a property. Defaults to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinLength(pub usize);

impl Annotation for MinLength {
    fn annotator(&self) -> Annotator {
        Annotator::new(&*MIN_LENGTH, self.0)
    }
}

/// Minimum length stored for `property` of `target` in the global registry,
/// `0` when none was stored.
pub fn min_length_of<O: ObjectOrType>(target: O, property: &str) -> usize {
    min_length_of_in(global(), target, property)
}

/// Minimum length stored for `property` of `target` in `source`.
pub fn min_length_of_in<S, O>(source: &S, target: O, property: &str) -> usize
where
    S: MetadataSource,
    O: ObjectOrType,
{
    source.lookup(target, property, &*MIN_LENGTH, 0)
}
