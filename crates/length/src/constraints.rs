//! Combined view of the three length annotations of one property

use std::fmt;

use propmeta::{global, MetadataSource, ObjectOrType};

use crate::length::length_of_in;
use crate::max_length::max_length_of_in;
use crate::min_length::min_length_of_in;

/// All length constraints of a property, as stored.
///
/// Values are reported exactly as annotated; a minimum larger than the
/// maximum is not rejected here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthConstraints {
    /// Exact length
    pub length: Option<usize>,
    /// Minimum length
    pub min_length: usize,
    /// Maximum length
    pub max_length: Option<usize>,
}

impl LengthConstraints {
    /// Check whether the property carries no effective constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.length.is_none() && self.max_length.is_none() && self.min_length == 0
    }
}

impl fmt::Display for LengthConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn optional(value: Option<usize>) -> String {
            value.map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "length={} min={} max={}",
            optional(self.length),
            self.min_length,
            optional(self.max_length)
        )
    }
}

/// Length constraints of `property` of `target` in the global registry.
pub fn constraints_of<O: ObjectOrType + Copy>(target: O, property: &str) -> LengthConstraints {
    constraints_of_in(global(), target, property)
}

/// Length constraints of `property` of `target` in `source`.
pub fn constraints_of_in<S, O>(source: &S, target: O, property: &str) -> LengthConstraints
where
    S: MetadataSource,
    O: ObjectOrType + Copy,
{
    LengthConstraints {
        length: length_of_in(source, target, property),
        min_length: min_length_of_in(source, target, property),
        max_length: max_length_of_in(source, target, property),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        let constraints = LengthConstraints::default();
        assert!(constraints.is_unconstrained());
        assert_eq!(constraints.to_string(), "length=- min=0 max=-");
    }

    #[test]
    fn test_display_with_values() {
        let constraints = LengthConstraints {
            length: Some(10),
            min_length: 2,
            max_length: Some(255),
        };
        assert!(!constraints.is_unconstrained());
        assert_eq!(constraints.to_string(), "length=10 min=2 max=255");
    }

    #[test]
    fn test_min_alone_is_a_constraint() {
        let constraints = LengthConstraints {
            min_length: 1,
            ..Default::default()
        };
        assert!(!constraints.is_unconstrained());
    }
}
