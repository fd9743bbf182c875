//! Field type registry: which field names are sensitive, and how.
//!
//! The scanner only ever reads through [`FieldTypeRegistry::get`]. Mutation
//! happens elsewhere (configuration loading, admin endpoints) and may run
//! concurrently with any number of scans.

use crate::SensitiveType;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

/// Read access to a field name → sensitive type mapping.
///
/// Lookups are exact and case-sensitive.
pub trait FieldTypeRegistry {
    /// Returns the sensitive type registered for `field`, if any.
    fn get(&self, field: &str) -> Option<SensitiveType>;
}

impl<R: FieldTypeRegistry + ?Sized> FieldTypeRegistry for &R {
    fn get(&self, field: &str) -> Option<SensitiveType> {
        (**self).get(field)
    }
}

impl<R: FieldTypeRegistry + ?Sized> FieldTypeRegistry for Arc<R> {
    fn get(&self, field: &str) -> Option<SensitiveType> {
        (**self).get(field)
    }
}

impl FieldTypeRegistry for HashMap<String, SensitiveType> {
    fn get(&self, field: &str) -> Option<SensitiveType> {
        HashMap::get(self, field).copied()
    }
}

impl FieldTypeRegistry for BTreeMap<String, SensitiveType> {
    fn get(&self, field: &str) -> Option<SensitiveType> {
        BTreeMap::get(self, field).copied()
    }
}

/// Thread-safe, mutable registry of sensitive fields.
///
/// Each call takes its own short lock, so a scan running during a mutation
/// may see a mix of old and new entries across different keys, but never a
/// torn entry.
#[derive(Debug, Default)]
pub struct SensitiveInfoRegistry {
    fields: RwLock<HashMap<String, SensitiveType>>,
}

static GLOBAL: Lazy<SensitiveInfoRegistry> = Lazy::new(SensitiveInfoRegistry::new);

/// Process-wide registry shared by callers that do not manage their own.
///
/// Scans still receive it explicitly: `mask(text, dm_mask::global())`.
pub fn global() -> &'static SensitiveInfoRegistry {
    &GLOBAL
}

impl SensitiveInfoRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `fields`.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SensitiveType)>,
        K: Into<String>,
    {
        let registry = Self::new();
        registry.put_all(fields);
        registry
    }

    /// Register (or re-register) a single field.
    pub fn put(&self, field: impl Into<String>, sensitive_type: SensitiveType) {
        let field = field.into();
        trace!(field = %field, sensitive_type = %sensitive_type, "Registered sensitive field");
        self.write().insert(field, sensitive_type);
    }

    /// Merge `fields` into the registry, overwriting existing entries.
    pub fn put_all<I, K>(&self, fields: I)
    where
        I: IntoIterator<Item = (K, SensitiveType)>,
        K: Into<String>,
    {
        let mut guard = self.write();
        let before = guard.len();
        guard.extend(fields.into_iter().map(|(k, t)| (k.into(), t)));
        debug!(before, after = guard.len(), "Merged sensitive fields");
    }

    /// Replace the whole mapping with `fields`.
    ///
    /// Clear and merge happen under one write lock, so readers never observe
    /// the empty intermediate state.
    pub fn replace_all<I, K>(&self, fields: I)
    where
        I: IntoIterator<Item = (K, SensitiveType)>,
        K: Into<String>,
    {
        let mut guard = self.write();
        guard.clear();
        guard.extend(fields.into_iter().map(|(k, t)| (k.into(), t)));
        debug!(fields = guard.len(), "Replaced sensitive field registry");
    }

    /// Remove a single field, returning its previous type.
    pub fn remove(&self, field: &str) -> Option<SensitiveType> {
        self.write().remove(field)
    }

    /// Remove every field.
    pub fn clear(&self) {
        self.write().clear();
        debug!("Cleared sensitive field registry");
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no field is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Owned copy of the current mapping.
    pub fn snapshot(&self) -> HashMap<String, SensitiveType> {
        self.read().clone()
    }

    // A panicking writer cannot leave a half-inserted entry behind, so a
    // poisoned lock still holds a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SensitiveType>> {
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SensitiveType>> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FieldTypeRegistry for SensitiveInfoRegistry {
    fn get(&self, field: &str) -> Option<SensitiveType> {
        self.read().get(field).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, SensitiveType)> for SensitiveInfoRegistry {
    fn from_iter<I: IntoIterator<Item = (K, SensitiveType)>>(iter: I) -> Self {
        Self::from_fields(iter)
    }
}
