//! Registry configuration

/// Configuration for a [`Registry`](crate::Registry).
///
/// ```
/// use propmeta::{Registry, RegistryConfig};
///
/// let registry = Registry::with_config(RegistryConfig::with_capacity(64).traced());
/// assert!(registry.config().trace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of classes to pre-allocate room for
    pub initial_capacity: usize,

    /// Emit a trace event whenever a lookup falls back
    pub trace: bool,
}

impl RegistryConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pre-allocating room for `capacity` classes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_capacity: capacity,
            ..Default::default()
        }
    }

    /// Enable lookup tracing.
    pub fn traced(mut self) -> Self {
        self.trace = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::new();
        assert_eq!(config.initial_capacity, 0);
        assert!(!config.trace);
    }

    #[test]
    fn test_builder_methods() {
        let config = RegistryConfig::with_capacity(16).traced();
        assert_eq!(
            config,
            RegistryConfig {
                initial_capacity: 16,
                trace: true,
            }
        );
    }
}
