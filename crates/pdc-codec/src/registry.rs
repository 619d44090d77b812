// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive type catalog and the registry built from it.
//!
//! The catalog is a fixed table: every persisted value is one of these
//! types, and every serialized record names one of them. The registry is
//! built once, never mutated, and passed by reference to the codec.

use crate::error::{CodecError, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Raw in-memory value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    ByteArray,
    Int32Array,
    Int64Array,
    Container,
    ContainerArray,
}

impl ValueKind {
    /// Lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::ByteArray => "byte-array",
            Self::Int32Array => "int32-array",
            Self::Int64Array => "int64-array",
            Self::Container => "container",
            Self::ContainerArray => "container-array",
        }
    }

    /// Numeric array kinds (the only kinds that accept a number sequence).
    pub fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::Int32Array | Self::Int64Array)
    }

    /// Kinds whose values hold nested containers.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Container | Self::ContainerArray)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape a type exposes to callers, when it differs from the raw kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexShape {
    /// Same as the raw kind.
    Raw,
    /// Stored as int8 1/0, exposed as a boolean.
    Boolean,
}

/// Static description of one persisted type.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Canonical catalog name, e.g. `INTEGER_ARRAY`.
    pub name: &'static str,
    pub kind: ValueKind,
    pub complex: ComplexShape,
    /// Human-readable name used in error messages.
    pub description: &'static str,
}

/// Lightweight, copyable reference to a [`TypeDescriptor`].
///
/// Two handles are equal when their descriptors are equal, so handles built
/// from the catalog constants compare equal wherever they were created.
#[derive(Clone, Copy)]
pub struct TypeHandle(&'static TypeDescriptor);

impl TypeHandle {
    /// Wrap a descriptor. Handles outside the catalog can be built this way
    /// by host stores, but the codec refuses to name them.
    pub const fn new(descriptor: &'static TypeDescriptor) -> Self {
        Self(descriptor)
    }

    pub fn name(self) -> &'static str {
        self.0.name
    }

    pub fn kind(self) -> ValueKind {
        self.0.kind
    }

    pub fn complex(self) -> ComplexShape {
        self.0.complex
    }

    pub fn description(self) -> &'static str {
        self.0.description
    }

    /// True for int8 types exposed as booleans.
    pub fn is_boolean(self) -> bool {
        self.0.complex == ComplexShape::Boolean
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

const fn raw(name: &'static str, kind: ValueKind, description: &'static str) -> TypeDescriptor {
    TypeDescriptor {
        name,
        kind,
        complex: ComplexShape::Raw,
        description,
    }
}

const BYTE_DESC: TypeDescriptor = raw("BYTE", ValueKind::Int8, "int8");
const SHORT_DESC: TypeDescriptor = raw("SHORT", ValueKind::Int16, "int16");
const INTEGER_DESC: TypeDescriptor = raw("INTEGER", ValueKind::Int32, "int32");
const LONG_DESC: TypeDescriptor = raw("LONG", ValueKind::Int64, "int64");
const FLOAT_DESC: TypeDescriptor = raw("FLOAT", ValueKind::Float32, "float32");
const DOUBLE_DESC: TypeDescriptor = raw("DOUBLE", ValueKind::Float64, "float64");
const BOOLEAN_DESC: TypeDescriptor = TypeDescriptor {
    name: "BOOLEAN",
    kind: ValueKind::Int8,
    complex: ComplexShape::Boolean,
    description: "boolean (int8)",
};
const STRING_DESC: TypeDescriptor = raw("STRING", ValueKind::String, "string");
const BYTE_ARRAY_DESC: TypeDescriptor = raw("BYTE_ARRAY", ValueKind::ByteArray, "int8[]");
const INTEGER_ARRAY_DESC: TypeDescriptor =
    raw("INTEGER_ARRAY", ValueKind::Int32Array, "int32[]");
const LONG_ARRAY_DESC: TypeDescriptor = raw("LONG_ARRAY", ValueKind::Int64Array, "int64[]");
const TAG_CONTAINER_DESC: TypeDescriptor =
    raw("TAG_CONTAINER", ValueKind::Container, "container");
const TAG_CONTAINER_ARRAY_DESC: TypeDescriptor = raw(
    "TAG_CONTAINER_ARRAY",
    ValueKind::ContainerArray,
    "container[]",
);

pub const BYTE: TypeHandle = TypeHandle(&BYTE_DESC);
pub const SHORT: TypeHandle = TypeHandle(&SHORT_DESC);
pub const INTEGER: TypeHandle = TypeHandle(&INTEGER_DESC);
pub const LONG: TypeHandle = TypeHandle(&LONG_DESC);
pub const FLOAT: TypeHandle = TypeHandle(&FLOAT_DESC);
pub const DOUBLE: TypeHandle = TypeHandle(&DOUBLE_DESC);
/// int8 exposed as a boolean.
pub const BOOLEAN: TypeHandle = TypeHandle(&BOOLEAN_DESC);
pub const STRING: TypeHandle = TypeHandle(&STRING_DESC);
pub const BYTE_ARRAY: TypeHandle = TypeHandle(&BYTE_ARRAY_DESC);
pub const INTEGER_ARRAY: TypeHandle = TypeHandle(&INTEGER_ARRAY_DESC);
pub const LONG_ARRAY: TypeHandle = TypeHandle(&LONG_ARRAY_DESC);
pub const TAG_CONTAINER: TypeHandle = TypeHandle(&TAG_CONTAINER_DESC);
pub const TAG_CONTAINER_ARRAY: TypeHandle = TypeHandle(&TAG_CONTAINER_ARRAY_DESC);

/// The full primitive type catalog, in declaration order.
pub const CATALOG: [TypeHandle; 13] = [
    BYTE,
    SHORT,
    INTEGER,
    LONG,
    FLOAT,
    DOUBLE,
    BOOLEAN,
    STRING,
    BYTE_ARRAY,
    INTEGER_ARRAY,
    LONG_ARRAY,
    TAG_CONTAINER,
    TAG_CONTAINER_ARRAY,
];

/// Immutable two-way index over a type catalog.
///
/// `Send + Sync`; share it by reference once built.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_name: HashMap<&'static str, TypeHandle>,
    by_type: HashMap<TypeHandle, &'static str>,
    order: Vec<TypeHandle>,
}

impl TypeRegistry {
    /// Build the registry over the standard [`CATALOG`].
    pub fn new() -> Result<Self> {
        Self::from_catalog(&CATALOG)
    }

    /// Build a registry over an arbitrary set of descriptors.
    ///
    /// Fails if two entries share a name or a descriptor.
    pub fn from_catalog(types: &[TypeHandle]) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(types.len());
        let mut by_type = HashMap::with_capacity(types.len());
        let mut order = Vec::with_capacity(types.len());

        for &handle in types {
            if by_name.insert(handle.name(), handle).is_some() {
                return Err(CodecError::Registry(format!(
                    "duplicate type name {}",
                    handle.name()
                )));
            }
            if by_type.insert(handle, handle.name()).is_some() {
                return Err(CodecError::Registry(format!(
                    "duplicate descriptor for {}",
                    handle.name()
                )));
            }
            order.push(handle);
        }

        tracing::debug!(types = order.len(), "type registry built");
        Ok(Self {
            by_name,
            by_type,
            order,
        })
    }

    /// Look up a type by its canonical (case-sensitive) name.
    pub fn type_by_name(&self, name: &str) -> Result<TypeHandle> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::NotFound(format!("type name {name:?}")))
    }

    /// Canonical name of a registered type.
    pub fn name_by_type(&self, handle: TypeHandle) -> Result<&'static str> {
        self.by_type.get(&handle).copied().ok_or_else(|| {
            CodecError::NotFound(format!(
                "handle {} ({}, {:?})",
                handle.name(),
                handle.kind(),
                handle.complex()
            ))
        })
    }

    /// Registered types, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = TypeHandle> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
