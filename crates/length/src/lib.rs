//! # Propmeta Length
//!
//! Length, maximum-length and minimum-length annotations for class
//! properties, stored in the [`propmeta`] registry.
//!
//! Each family is an annotation value plus an accessor:
//!
//! | Annotation | Accessor | Unannotated |
//! |---|---|---|
//! | [`Length`] | [`length_of`] | `None` |
//! | [`MaxLength`] | [`max_length_of`] | `None` |
//! | [`MinLength`] | [`min_length_of`] | `0` |
//!
//! Constraints are only recorded. Nothing here checks values against them.
//!
//! ```
//! use propmeta_length::{
//!     class_type, declare, length_of, max_length_of, min_length_of, type_of, Length, MaxLength,
//!     MinLength,
//! };
//!
//! struct Account {
//!     login: String,
//!     pin: String,
//! }
//! class_type!(Account { login, pin });
//!
//! declare::<Account>()
//!     .property("login", MaxLength::new(32))
//!     .property("login", MinLength(3))
//!     .property("pin", Length::new(4))
//!     .register()
//!     .unwrap();
//!
//! let account = Account { login: "ada".into(), pin: "0000".into() };
//! assert_eq!(max_length_of(&account, "login"), Some(32));
//! assert_eq!(min_length_of(type_of::<Account>(), "login"), 3);
//! assert_eq!(length_of(&account, "pin"), Some(4));
//! assert_eq!(length_of(&account, "login"), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constraints;
pub mod length;
pub mod max_length;
pub mod min_length;

pub use constraints::{constraints_of, constraints_of_in, LengthConstraints};
pub use length::{length_of, length_of_in, Length, LENGTH};
pub use max_length::{max_length_of, max_length_of_in, MaxLength, MAX_LENGTH};
pub use min_length::{min_length_of, min_length_of_in, MinLength, MIN_LENGTH};

// The propmeta surface needed to declare and query classes
pub use propmeta::{class_type, declare, type_of, Annotation, Class, Registry, TypeOf};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_keys_are_distinct() {
        assert_ne!(LENGTH.id(), MAX_LENGTH.id());
        assert_ne!(LENGTH.id(), MIN_LENGTH.id());
        assert_ne!(MAX_LENGTH.id(), MIN_LENGTH.id());
    }

    #[test]
    fn test_family_key_names() {
        assert_eq!(LENGTH.name(), "length");
        assert_eq!(MAX_LENGTH.name(), "maxLength");
        assert_eq!(MIN_LENGTH.name(), "minLength");
    }

    #[test]
    fn test_annotation_defaults() {
        assert_eq!(Length::default(), Length(None));
        assert_eq!(MaxLength::default(), MaxLength(None));
        assert_eq!(MinLength::default(), MinLength(0));
    }
}
