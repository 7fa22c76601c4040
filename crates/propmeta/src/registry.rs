//! Property metadata registry mapping `(class, property, key)` to values

mod annotator;
mod snapshot;

pub use annotator::{Annotation, Annotator};
pub use snapshot::Snapshot;

use dashmap::DashMap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::class::{Class, ClassId, KeyOf, ObjectOrType};
use crate::config::RegistryConfig;
use crate::key::{KeyId, MetadataKey};

/// Type-erased stored value, shared between a registry and its snapshots.
pub type ErasedValue = Arc<dyn Any + Send + Sync>;

/// The process-wide registry used by [`annotate`]/[`lookup`] and the
/// annotation families.
static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Build a reusable annotation storing `value` under `key`.
///
/// # Example
///
/// ```
/// use propmeta::{annotate, class_type, lookup, type_of, Annotation, MetadataKey};
///
/// struct Article;
/// class_type!(Article { title });
///
/// let key = MetadataKey::<&'static str>::new("label");
/// annotate(&key, "Title").apply::<Article>("title").unwrap();
///
/// assert_eq!(lookup(type_of::<Article>(), "title", &key, "none"), "Title");
/// ```
pub fn annotate<V: Send + Sync + 'static>(key: &MetadataKey<V>, value: V) -> Annotator {
    Annotator::new(key, value)
}

/// Read `key` for `property` of `target` from the global registry,
/// returning `fallback` when nothing was stored.
pub fn lookup<O, V>(target: O, property: &str, key: &MetadataKey<V>, fallback: V) -> V
where
    O: ObjectOrType,
    V: Clone + 'static,
{
    global().lookup(target, property, key, fallback)
}

/// Read access to stored metadata.
///
/// Implemented by the live [`Registry`] and by frozen [`Snapshot`]s; the
/// provided methods hold the typed lookup with its fallback.
pub trait MetadataSource {
    /// Raw stored value for a triple, if any.
    fn get_raw(&self, class: ClassId, property: &str, key: KeyId) -> Option<ErasedValue>;

    /// Whether fallback lookups should emit trace events.
    fn trace_enabled(&self) -> bool {
        false
    }

    /// Stored value for `key` on `property` of `target`, or `fallback`.
    ///
    /// `target` may be an instance (`&T`) or a descriptor (`TypeOf<T>`).
    /// Properties the class does not declare simply resolve to `fallback`.
    fn lookup<O, V>(&self, target: O, property: &str, key: &MetadataKey<V>, fallback: V) -> V
    where
        O: ObjectOrType,
        V: Clone + 'static,
        Self: Sized,
    {
        let class = target.class_id();
        match self
            .get_raw(class, property, key.id())
            .and_then(|value| value.downcast_ref::<V>().cloned())
        {
            Some(value) => value,
            None => {
                if self.trace_enabled() {
                    tracing::trace!(
                        class = class.name(),
                        property,
                        key = key.name(),
                        "no annotation, using fallback"
                    );
                }
                fallback
            }
        }
    }

    /// Check whether a value is stored for `key` on `property` of `target`.
    fn contains<O, V>(&self, target: O, property: &str, key: &MetadataKey<V>) -> bool
    where
        O: ObjectOrType,
        Self: Sized,
    {
        self.get_raw(target.class_id(), property, key.id()).is_some()
    }
}

/// A value stored for one `(class, property, key)` triple.
#[derive(Clone)]
pub(crate) struct StoredValue {
    pub(crate) key_name: &'static str,
    pub(crate) value: ErasedValue,
}

/// All annotations of one class, properties in first-annotation order.
#[derive(Clone, Default)]
pub(crate) struct ClassEntry {
    properties: IndexMap<&'static str, IndexMap<KeyId, StoredValue>>,
}

impl ClassEntry {
    /// Store a value, returning the one it replaced.
    fn insert(
        &mut self,
        property: &'static str,
        key: KeyId,
        stored: StoredValue,
    ) -> Option<StoredValue> {
        self.properties.entry(property).or_default().insert(key, stored)
    }

    pub(crate) fn get(&self, property: &str, key: KeyId) -> Option<&StoredValue> {
        self.properties.get(property)?.get(&key)
    }

    pub(crate) fn property_names(&self) -> Vec<&'static str> {
        self.properties.keys().copied().collect()
    }

    pub(crate) fn key_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties
            .values()
            .flat_map(|keys| keys.values().map(|stored| stored.key_name))
    }

    pub(crate) fn len(&self) -> usize {
        self.properties.values().map(IndexMap::len).sum()
    }
}

/// Shared store of property annotations.
///
/// Each `(class, property, key)` triple holds at most one value; storing
/// again overwrites it. Entries are never removed. The map is sharded, so
/// annotating and reading from several threads is safe.
///
/// # Example
///
/// ```
/// use propmeta::{annotate, class_type, type_of, Annotation, MetadataKey, MetadataSource, Registry};
///
/// struct User {
///     name: String,
/// }
/// class_type!(User { name });
///
/// let registry = Registry::new();
/// let key = MetadataKey::<u32>::new("weight");
///
/// annotate(&key, 3).apply_in::<User>(&registry, "name").unwrap();
/// annotate(&key, 7).apply_in::<User>(&registry, "name").unwrap();
///
/// let user = User { name: "ada".into() };
/// assert_eq!(registry.lookup(&user, "name", &key, 0), 7);
/// assert_eq!(registry.lookup(type_of::<User>(), "name", &key, 0), 7);
/// ```
pub struct Registry {
    classes: DashMap<ClassId, ClassEntry>,
    config: RegistryConfig,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            classes: DashMap::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Store an annotation for a verified property of `T`.
    ///
    /// Replaces any value previously stored under the same key.
    pub fn store<T: Class>(&self, property: KeyOf<T>, annotator: &Annotator) {
        let class = ClassId::of::<T>();
        let stored = StoredValue {
            key_name: annotator.key_name(),
            value: annotator.erased_value(),
        };
        let previous = self
            .classes
            .entry(class)
            .or_default()
            .insert(property.as_str(), annotator.key_id(), stored);

        tracing::debug!(
            class = class.name(),
            property = property.as_str(),
            key = annotator.key_name(),
            "stored annotation"
        );
        if previous.is_some() {
            tracing::debug!(
                class = class.name(),
                property = property.as_str(),
                key = annotator.key_name(),
                "overwrote previous annotation"
            );
        }
    }

    /// Properties of `target`'s class carrying at least one annotation,
    /// in the order they were first annotated.
    pub fn annotated_properties<O: ObjectOrType>(&self, target: O) -> Vec<&'static str> {
        self.classes
            .get(&target.class_id())
            .map(|entry| entry.property_names())
            .unwrap_or_default()
    }

    /// Number of stored `(class, property, key)` triples.
    pub fn len(&self) -> usize {
        self.classes.iter().map(|entry| entry.len()).sum()
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the current contents into an immutable snapshot.
    ///
    /// Later writes to the registry are not visible in the snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let classes = self
            .classes
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        Snapshot::new(classes, self.config.trace)
    }
}

impl MetadataSource for Registry {
    fn get_raw(&self, class: ClassId, property: &str, key: KeyId) -> Option<ErasedValue> {
        let entry = self.classes.get(&class)?;
        entry
            .get(property, key)
            .map(|stored| Arc::clone(&stored.value))
    }

    fn trace_enabled(&self) -> bool {
        self.config.trace
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.classes.len())
            .field("annotations", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::type_of;

    struct Account;
    crate::class_type!(Account { login, password });

    struct Other;
    crate::class_type!(Other { login });

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.annotated_properties(type_of::<Account>()).is_empty());
    }

    #[test]
    fn test_store_then_lookup() {
        let registry = Registry::new();
        let key = MetadataKey::<u16>::new("width");
        let login = KeyOf::<Account>::new("login").unwrap();

        registry.store(login, &Annotator::new(&key, 12));

        assert_eq!(registry.lookup(type_of::<Account>(), "login", &key, 0), 12);
        assert_eq!(registry.lookup(type_of::<Account>(), "password", &key, 0), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_classes_do_not_share_annotations() {
        let registry = Registry::new();
        let key = MetadataKey::<u16>::new("width");
        registry.store(KeyOf::<Account>::new("login").unwrap(), &Annotator::new(&key, 5));

        assert!(registry.contains(type_of::<Account>(), "login", &key));
        assert!(!registry.contains(type_of::<Other>(), "login", &key));
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let registry = Registry::new();
        let key = MetadataKey::<u16>::new("width");
        let login = KeyOf::<Account>::new("login").unwrap();

        registry.store(login, &Annotator::new(&key, 1));
        registry.store(login, &Annotator::new(&key, 2));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(type_of::<Account>(), "login", &key, 0), 2);
    }

    #[test]
    fn test_debug_reports_counts() {
        let registry = Registry::new();
        let key = MetadataKey::<bool>::new("flag");
        registry.store(KeyOf::<Account>::new("login").unwrap(), &Annotator::new(&key, true));

        let debug = format!("{:?}", registry);
        assert!(debug.contains("classes: 1"));
        assert!(debug.contains("annotations: 1"));
    }
}
