// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory host store.
//!
//! Entries live in a vector (insertion order) with a key index beside it.
//! Re-setting a key replaces its entry in place.

use crate::key::NamespacedKey;
use crate::registry::TypeHandle;
use crate::store::{check_shape, AdapterContext, DataContainer, StoreError};
use crate::value::Variant;
use std::collections::HashMap;

/// One stored entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: NamespacedKey,
    pub ty: TypeHandle,
    pub value: Variant<MemoryContainer>,
}

/// Ordered in-memory container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryContainer {
    entries: Vec<Entry>,
    index: HashMap<NamespacedKey, usize>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry stored under `key`, whatever its type.
    pub fn entry(&self, key: &NamespacedKey) -> Option<&Entry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Borrow the value at `key` if it was written as `ty`.
    pub fn value(&self, key: &NamespacedKey, ty: TypeHandle) -> Option<&Variant<Self>> {
        self.entry(key)
            .filter(|entry| entry.ty == ty)
            .map(|entry| &entry.value)
    }

    /// Builder-style [`DataContainer::set`].
    pub fn with(
        mut self,
        key: NamespacedKey,
        ty: TypeHandle,
        value: impl Into<Variant<Self>>,
    ) -> Result<Self, StoreError> {
        self.set(key, ty, value.into())?;
        Ok(self)
    }

    /// Remove `key`, returning its entry.
    pub fn remove(&mut self, key: &NamespacedKey) -> Option<Entry> {
        let position = self.index.remove(key)?;
        let entry = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(entry)
    }
}

impl From<MemoryContainer> for Variant<MemoryContainer> {
    fn from(v: MemoryContainer) -> Self {
        Self::Container(v)
    }
}

impl From<Vec<MemoryContainer>> for Variant<MemoryContainer> {
    fn from(v: Vec<MemoryContainer>) -> Self {
        Self::ContainerArray(v)
    }
}

impl DataContainer for MemoryContainer {
    fn keys(&self) -> Vec<NamespacedKey> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    fn has(&self, key: &NamespacedKey, ty: TypeHandle) -> bool {
        self.value(key, ty).is_some()
    }

    fn get(&self, key: &NamespacedKey, ty: TypeHandle) -> Option<Variant<Self>> {
        self.value(key, ty).cloned()
    }

    fn set(
        &mut self,
        key: NamespacedKey,
        ty: TypeHandle,
        value: Variant<Self>,
    ) -> Result<(), StoreError> {
        check_shape(ty, &value)?;

        match self.index.get(&key) {
            Some(&position) => {
                let entry = &mut self.entries[position];
                entry.ty = ty;
                entry.value = value;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(Entry { key, ty, value });
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Context producing empty [`MemoryContainer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryContext;

impl AdapterContext for MemoryContext {
    type Container = MemoryContainer;

    fn new_container(&self) -> MemoryContainer {
        MemoryContainer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BOOLEAN, BYTE, DOUBLE, INTEGER, STRING};

    fn key(path: &str) -> NamespacedKey {
        NamespacedKey::new("test", path).unwrap()
    }

    #[test]
    fn test_insertion_order() {
        let mut pdc = MemoryContainer::new();
        pdc.set(key("zeta"), STRING, "z".into()).unwrap();
        pdc.set(key("alpha"), INTEGER, 1i32.into()).unwrap();
        pdc.set(key("mid"), DOUBLE, 0.5f64.into()).unwrap();

        assert_eq!(pdc.keys(), vec![key("zeta"), key("alpha"), key("mid")]);
        assert_eq!(pdc.len(), 3);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut pdc = MemoryContainer::new();
        pdc.set(key("a"), STRING, "first".into()).unwrap();
        pdc.set(key("b"), STRING, "second".into()).unwrap();
        pdc.set(key("a"), INTEGER, 7i32.into()).unwrap();

        assert_eq!(pdc.keys(), vec![key("a"), key("b")]);
        assert!(!pdc.has(&key("a"), STRING));
        assert_eq!(pdc.get(&key("a"), INTEGER), Some(Variant::Int(7)));
    }

    #[test]
    fn test_has_matches_declared_type() {
        let mut pdc = MemoryContainer::new();
        pdc.set(key("flag"), BOOLEAN, true.into()).unwrap();

        assert!(pdc.has(&key("flag"), BOOLEAN));
        assert!(!pdc.has(&key("flag"), BYTE));
        assert!(pdc.get(&key("flag"), BYTE).is_none());
    }

    #[test]
    fn test_shape_mismatch() {
        let mut pdc = MemoryContainer::new();
        let err = pdc.set(key("age"), INTEGER, "28".into()).unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
        assert!(pdc.is_empty());
    }

    #[test]
    fn test_boolean_byte_out_of_range() {
        let mut pdc = MemoryContainer::new();
        let err = pdc.set(key("flag"), BOOLEAN, Variant::Byte(2)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidBoolean { value: 2, .. }));
        assert!(pdc.is_empty());

        pdc.set(key("raw"), BYTE, Variant::Byte(2)).unwrap();
        assert_eq!(pdc.get(&key("raw"), BYTE), Some(Variant::Byte(2)));
    }

    #[test]
    fn test_remove_reindexes() {
        let mut pdc = MemoryContainer::new()
            .with(key("a"), INTEGER, 1i32)
            .and_then(|c| c.with(key("b"), INTEGER, 2i32))
            .and_then(|c| c.with(key("c"), INTEGER, 3i32))
            .unwrap();

        let removed = pdc.remove(&key("a")).expect("present");
        assert_eq!(removed.value, Variant::Int(1));
        assert_eq!(pdc.keys(), vec![key("b"), key("c")]);
        assert_eq!(pdc.value(&key("c"), INTEGER), Some(&Variant::Int(3)));
    }

    #[test]
    fn test_context_builds_empty() {
        let pdc = MemoryContext.new_container();
        assert!(pdc.is_empty());
    }
}
