// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory values held by a container.

use crate::registry::ValueKind;

/// A raw stored value, one case per [`ValueKind`].
///
/// `C` is the host store's container type, so nested containers are owned
/// directly by the value that holds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant<C> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    Container(C),
    ContainerArray(Vec<C>),
}

impl<C> Variant<C> {
    /// Value kind of this variant.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Byte(_) => ValueKind::Int8,
            Self::Short(_) => ValueKind::Int16,
            Self::Int(_) => ValueKind::Int32,
            Self::Long(_) => ValueKind::Int64,
            Self::Float(_) => ValueKind::Float32,
            Self::Double(_) => ValueKind::Float64,
            Self::String(_) => ValueKind::String,
            Self::ByteArray(_) => ValueKind::ByteArray,
            Self::IntArray(_) => ValueKind::Int32Array,
            Self::LongArray(_) => ValueKind::Int64Array,
            Self::Container(_) => ValueKind::Container,
            Self::ContainerArray(_) => ValueKind::ContainerArray,
        }
    }

    /// Try to get as i8.
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i16.
    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Self::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Self::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Self::LongArray(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get the nested container.
    pub fn as_container(&self) -> Option<&C> {
        match self {
            Self::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Try to get the nested container array.
    pub fn as_container_array(&self) -> Option<&[C]> {
        match self {
            Self::ContainerArray(v) => Some(v),
            _ => None,
        }
    }
}

// Conversion traits
impl<C> From<i8> for Variant<C> {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl<C> From<i16> for Variant<C> {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl<C> From<i32> for Variant<C> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl<C> From<i64> for Variant<C> {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl<C> From<f32> for Variant<C> {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl<C> From<f64> for Variant<C> {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

/// `true` is stored as 1, `false` as 0.
impl<C> From<bool> for Variant<C> {
    fn from(v: bool) -> Self {
        Self::Byte(i8::from(v))
    }
}

impl<C> From<String> for Variant<C> {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<C> From<&str> for Variant<C> {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<C> From<Vec<i8>> for Variant<C> {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl<C> From<Vec<i32>> for Variant<C> {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl<C> From<Vec<i64>> for Variant<C> {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Variant<()>;

    #[test]
    fn test_primitive_values() {
        let v = V::from(42i32);
        assert_eq!(v.as_int(), Some(42));
        assert_eq!(v.as_long(), None);
        assert_eq!(v.kind(), ValueKind::Int32);

        let v = V::from(60.5f32);
        assert_eq!(v.as_float(), Some(60.5));
        assert_eq!(v.as_double(), None);

        let v = V::from("mfnalex");
        assert_eq!(v.as_str(), Some("mfnalex"));
    }

    #[test]
    fn test_bool_stored_as_byte() {
        assert_eq!(V::from(true), V::Byte(1));
        assert_eq!(V::from(false), V::Byte(0));
    }

    #[test]
    fn test_array_values() {
        let v = V::from(vec![100_000i64, 200_000]);
        assert_eq!(v.kind(), ValueKind::Int64Array);
        assert_eq!(v.as_long_array(), Some(&[100_000i64, 200_000][..]));
        assert!(v.as_int_array().is_none());
    }

    #[test]
    fn test_container_values() {
        let v: Variant<u8> = Variant::ContainerArray(vec![1, 2]);
        assert_eq!(v.kind(), ValueKind::ContainerArray);
        assert_eq!(v.as_container_array().map(<[u8]>::len), Some(2));
        assert!(v.as_container().is_none());
    }
}
