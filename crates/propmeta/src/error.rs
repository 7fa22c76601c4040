//! Error types for metadata registration

use thiserror::Error;

/// Main error type for propmeta operations.
///
/// Lookups never fail; only naming a property that a class does not
/// declare is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// Property name not declared by the class
    #[error("Unknown property: {class} has no property '{property}'")]
    UnknownProperty {
        /// Name of the class that was annotated
        class: &'static str,
        /// The rejected property name
        property: String,
    },
}

/// Result type alias for propmeta operations
pub type Result<T> = std::result::Result<T, MetadataError>;
