// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host store abstraction
//!
//! The codec never owns a store; it reads through [`DataContainer`] and
//! builds fresh containers through [`AdapterContext`].
//!
//! # Implementations
//!
//! - `MemoryContainer` -- ordered in-memory reference store

use crate::key::NamespacedKey;
use crate::registry::{TypeHandle, ValueKind};
use crate::value::Variant;
use thiserror::Error;

/// Errors a host store may raise on write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("type {type_name} stores {expected} but the value is {found}")]
    ShapeMismatch {
        type_name: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Boolean types store exactly 0 or 1.
    #[error("type {type_name} stores 0 or 1 but the value is {value}")]
    InvalidBoolean { type_name: &'static str, value: i8 },
}

/// A typed, ordered key-value container.
///
/// Keys enumerate in insertion order. A key holds exactly one value and is
/// tagged with the type it was written with.
pub trait DataContainer: Sized {
    /// Keys in insertion order.
    fn keys(&self) -> Vec<NamespacedKey>;

    /// Whether `key` holds a value written as `ty`.
    fn has(&self, key: &NamespacedKey, ty: TypeHandle) -> bool;

    /// Copy of the value at `key`, if it was written as `ty`.
    fn get(&self, key: &NamespacedKey, ty: TypeHandle) -> Option<Variant<Self>>;

    /// Write `value` under `key`. Fails if the value's kind does not match
    /// `ty`.
    fn set(
        &mut self,
        key: NamespacedKey,
        ty: TypeHandle,
        value: Variant<Self>,
    ) -> Result<(), StoreError>;

    /// Number of entries.
    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Factory for empty containers bound to one store context.
pub trait AdapterContext {
    type Container: DataContainer;

    fn new_container(&self) -> Self::Container;
}

/// Check a value against the kind its type stores.
pub fn check_shape<C>(ty: TypeHandle, value: &Variant<C>) -> Result<(), StoreError> {
    if value.kind() != ty.kind() {
        return Err(StoreError::ShapeMismatch {
            type_name: ty.name(),
            expected: ty.kind(),
            found: value.kind(),
        });
    }

    match value {
        Variant::Byte(v) if ty.is_boolean() && !matches!(*v, 0 | 1) => {
            Err(StoreError::InvalidBoolean {
                type_name: ty.name(),
                value: *v,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BOOLEAN, BYTE, INTEGER, STRING};

    #[test]
    fn test_check_shape() {
        assert!(check_shape(INTEGER, &Variant::<()>::Int(1)).is_ok());
        assert!(check_shape(BOOLEAN, &Variant::<()>::Byte(1)).is_ok());
        assert!(check_shape(BOOLEAN, &Variant::<()>::Byte(0)).is_ok());
        assert!(check_shape(BYTE, &Variant::<()>::Byte(2)).is_ok());

        let err = check_shape(STRING, &Variant::<()>::Int(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type STRING stores string but the value is int32"
        );
    }

    #[test]
    fn test_boolean_accepts_only_zero_or_one() {
        for raw in [2i8, -1, i8::MAX] {
            match check_shape(BOOLEAN, &Variant::<()>::Byte(raw)) {
                Err(StoreError::InvalidBoolean { type_name, value }) => {
                    assert_eq!(type_name, "BOOLEAN");
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
