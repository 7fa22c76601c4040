//! Immutable point-in-time view of a registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{ClassEntry, ErasedValue, MetadataSource};
use crate::class::{ClassId, ObjectOrType};
use crate::key::KeyId;

/// Frozen copy of a [`Registry`](super::Registry).
///
/// Suits the "annotate during start-up, read afterwards" lifecycle: take a
/// snapshot once initialization is done and share it freely. Cloning is
/// cheap; writes to the originating registry are never observed.
#[derive(Clone)]
pub struct Snapshot {
    classes: Arc<HashMap<ClassId, ClassEntry>>,
    trace: bool,
}

impl Snapshot {
    pub(super) fn new(classes: HashMap<ClassId, ClassEntry>, trace: bool) -> Self {
        Self {
            classes: Arc::new(classes),
            trace,
        }
    }

    /// Properties of `target`'s class carrying at least one annotation.
    pub fn annotated_properties<O: ObjectOrType>(&self, target: O) -> Vec<&'static str> {
        self.classes
            .get(&target.class_id())
            .map(ClassEntry::property_names)
            .unwrap_or_default()
    }

    /// Number of stored `(class, property, key)` triples.
    pub fn len(&self) -> usize {
        self.classes.values().map(ClassEntry::len).sum()
    }

    /// Check if the snapshot holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataSource for Snapshot {
    fn get_raw(&self, class: ClassId, property: &str, key: KeyId) -> Option<ErasedValue> {
        self.classes
            .get(&class)?
            .get(property, key)
            .map(|stored| Arc::clone(&stored.value))
    }

    fn trace_enabled(&self) -> bool {
        self.trace
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self
            .classes
            .values()
            .flat_map(|entry| entry.key_names())
            .collect();
        f.debug_struct("Snapshot")
            .field("classes", &self.classes.len())
            .field("keys", &keys)
            .finish()
    }
}
