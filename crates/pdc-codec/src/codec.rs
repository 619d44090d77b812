// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Container ↔ record flattening.
//!
//! Encode walks a container in key order and emits one [`Record`] per
//! entry, recursing into nested containers and container arrays. Decode
//! does the reverse, casting every scalar through [`cast`] so values read
//! back from text regain their stored width.

use crate::caster::cast;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::key::NamespacedKey;
use crate::record::{Record, Value};
use crate::registry::{ComplexShape, TypeHandle, TypeRegistry, ValueKind};
use crate::store::{AdapterContext, DataContainer};
use crate::value::Variant;
use std::collections::HashSet;

/// Bidirectional codec over a borrowed [`TypeRegistry`].
#[derive(Debug, Clone)]
pub struct ContainerCodec<'r> {
    registry: &'r TypeRegistry,
    config: CodecConfig,
}

impl<'r> ContainerCodec<'r> {
    /// Codec with the default configuration.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, CodecConfig::default())
    }

    pub fn with_config(registry: &'r TypeRegistry, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The single catalog type stored under `key`.
    ///
    /// Fails with [`CodecError::NoMatchingType`] when no type, or more than
    /// one, matches.
    pub fn primitive_type_of<C: DataContainer>(
        &self,
        container: &C,
        key: &NamespacedKey,
    ) -> Result<TypeHandle> {
        let mut matches = self.registry.iter().filter(|&ty| container.has(key, ty));

        match (matches.next(), matches.next()) {
            (Some(ty), None) => Ok(ty),
            (first, second) => Err(CodecError::NoMatchingType {
                key: key.to_string(),
                matches: usize::from(first.is_some())
                    + usize::from(second.is_some())
                    + matches.count(),
            }),
        }
    }

    /// Flatten `container` into records, in key order.
    pub fn encode<C: DataContainer>(&self, container: &C) -> Result<Vec<Record>> {
        let records = self.encode_at(container, 0)?;
        tracing::debug!(records = records.len(), "encoded container");
        Ok(records)
    }

    fn encode_at<C: DataContainer>(&self, container: &C, depth: usize) -> Result<Vec<Record>> {
        self.check_depth(depth)?;

        let keys = container.keys();
        let mut records = Vec::with_capacity(keys.len());

        for key in keys {
            let ty = self.primitive_type_of(container, &key)?;
            let name = self.registry.name_by_type(ty)?;
            let stored = container
                .get(&key, ty)
                .ok_or_else(|| CodecError::NoMatchingType {
                    key: key.to_string(),
                    matches: 0,
                })?;

            let value = match stored {
                Variant::Container(inner) => Value::Records(self.encode_at(&inner, depth + 1)?),
                Variant::ContainerArray(items) => Value::Sequence(
                    items
                        .iter()
                        .map(|inner| self.encode_at(inner, depth + 1).map(Value::Records))
                        .collect::<Result<_>>()?,
                ),
                Variant::Byte(v) => match ty.complex() {
                    ComplexShape::Boolean => Value::Bool(v == 1),
                    ComplexShape::Raw => Value::Byte(v),
                },
                Variant::Short(v) => Value::Short(v),
                Variant::Int(v) => Value::Int(v),
                Variant::Long(v) => Value::Long(v),
                Variant::Float(v) => Value::Float(v),
                Variant::Double(v) => Value::Double(v),
                Variant::String(v) => Value::String(v),
                Variant::ByteArray(v) => Value::Sequence(v.into_iter().map(Value::Byte).collect()),
                Variant::IntArray(v) => Value::Sequence(v.into_iter().map(Value::Int).collect()),
                Variant::LongArray(v) => Value::Sequence(v.into_iter().map(Value::Long).collect()),
            };

            tracing::trace!(%key, type_name = name, depth, "encoded entry");
            records.push(Record::new(key.to_string(), name, value));
        }

        Ok(records)
    }

    /// Rebuild a container from records, using `context` for every new
    /// container. Any failure discards everything built so far.
    pub fn decode<X: AdapterContext>(
        &self,
        context: &X,
        records: Vec<Record>,
    ) -> Result<X::Container> {
        let count = records.len();
        let container = self.decode_at(context, records, 0)?;
        tracing::debug!(records = count, "decoded container");
        Ok(container)
    }

    fn decode_at<X: AdapterContext>(
        &self,
        context: &X,
        records: Vec<Record>,
        depth: usize,
    ) -> Result<X::Container> {
        self.check_depth(depth)?;

        let mut container = context.new_container();
        let mut seen = HashSet::with_capacity(records.len());

        for record in records {
            let Record {
                key: raw_key,
                type_name,
                value,
            } = record;

            let raw_key = raw_key.ok_or(CodecError::NullKey)?;
            let type_name = type_name.ok_or_else(|| CodecError::NullType {
                key: raw_key.clone(),
            })?;
            let ty = self.registry.type_by_name(&type_name)?;
            let key: NamespacedKey = raw_key.parse()?;

            let variant = match ty.kind() {
                ValueKind::Container => {
                    let nested = nested_records(value, ty, &raw_key)?;
                    Variant::Container(self.decode_at(context, nested, depth + 1)?)
                }
                ValueKind::ContainerArray => {
                    let items = match value {
                        Value::Sequence(items) => items,
                        Value::Null => return Err(CodecError::NullValue { key: raw_key }),
                        other => {
                            return Err(CodecError::cast(ty.description(), other.shape()));
                        }
                    };
                    let containers = items
                        .into_iter()
                        .map(|item| {
                            nested_records(item, ty, &raw_key)
                                .and_then(|nested| self.decode_at(context, nested, depth + 1))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Variant::ContainerArray(containers)
                }
                _ => cast(value, ty)?.ok_or_else(|| CodecError::NullValue {
                    key: raw_key.clone(),
                })?,
            };

            if !seen.insert(key.clone()) {
                tracing::warn!(%key, "duplicate key in records, later entry wins");
            }
            tracing::trace!(%key, type_name = %ty, depth, "decoded entry");

            container
                .set(key, ty, variant)
                .map_err(|source| CodecError::Store {
                    key: raw_key,
                    source,
                })?;
        }

        Ok(container)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(CodecError::DepthExceeded {
                max: self.config.max_depth,
            });
        }
        Ok(())
    }
}

/// Records of one nested container: encoded records, or parsed maps. An
/// empty plain sequence is an empty container, since text formats cannot
/// tell the two apart.
fn nested_records(value: Value, ty: TypeHandle, key: &str) -> Result<Vec<Record>> {
    if value.is_null() {
        return Err(CodecError::NullValue {
            key: key.to_string(),
        });
    }

    let shape = value.shape();
    value
        .into_records()?
        .ok_or_else(|| CodecError::cast(format!("records of {}", ty.description()), shape))
}
