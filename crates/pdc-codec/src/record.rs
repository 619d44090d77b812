// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Intermediate form: ordered `{key, type, value}` records.
//!
//! Encode produces records whose numbers keep their exact width. Text parses
//! into a generic [`Value`] tree that only carries `Long` and `Double`, keeps
//! maps as [`Value::Map`] and leaves record extraction to decode, so text of
//! the wrong shape fails there rather than in the parser.

use crate::error::{CodecError, Result};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format-neutral value carried by a [`Record`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Numbers (arrays), parsed maps, or nested record sequences (container
    /// arrays).
    Sequence(Vec<Value>),
    /// Nested container.
    Records(Vec<Record>),
    /// A parsed map, in document order.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Short shape name used in cast errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Byte(_) => "int8",
            Self::Short(_) => "int16",
            Self::Int(_) => "int32",
            Self::Long(_) => "int64",
            Self::Float(_) => "float32",
            Self::Double(_) => "float64",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Records(_) => "record sequence",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Nested records, if this value holds a record sequence.
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Self::Records(records) => Some(records),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Records held by this value: a record sequence, or a sequence whose
    /// items are all maps (an empty sequence included).
    ///
    /// `Ok(None)` means the value is not record-shaped. A map that is not a
    /// valid record fails with the error [`Record::from_entries`] reports.
    pub fn into_records(self) -> Result<Option<Vec<Record>>> {
        match self {
            Self::Records(records) => Ok(Some(records)),
            Self::Sequence(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Self::Map(entries) => records.push(Record::from_entries(entries)?),
                        _ => return Ok(None),
                    }
                }
                Ok(Some(records))
            }
            _ => Ok(None),
        }
    }
}

/// One serialized entry.
///
/// `key` and `type_name` are optional so that records read from text with a
/// missing field reach the decoder, which reports them precisely.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub value: Value,
}

impl Record {
    pub fn new(key: impl Into<String>, type_name: impl Into<String>, value: Value) -> Self {
        Self {
            key: Some(key.into()),
            type_name: Some(type_name.into()),
            value,
        }
    }

    /// Build a record from the entries of a parsed map.
    ///
    /// Unknown fields are ignored; missing ones stay `None`/`Null`. A key that
    /// is not a string is an [`CodecError::InvalidKey`], a type that is not a
    /// string a [`CodecError::Cast`].
    pub fn from_entries(entries: Vec<(Value, Value)>) -> Result<Self> {
        let mut record = Self::default();

        for (field, value) in entries {
            let Value::String(field) = field else {
                continue;
            };
            match field.as_str() {
                "key" => {
                    record.key = match value {
                        Value::String(key) => Some(key),
                        Value::Null => None,
                        other => {
                            return Err(CodecError::InvalidKey {
                                key: other.shape().to_string(),
                                reason: "key is not a string",
                            });
                        }
                    }
                }
                "type" => {
                    record.type_name = match value {
                        Value::String(name) => Some(name),
                        Value::Null => None,
                        other => return Err(CodecError::cast("type name", other.shape())),
                    }
                }
                "value" => record.value = value,
                _ => {}
            }
        }

        Ok(record)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Map(entries) => Record::from_entries(entries).map_err(de::Error::custom),
            other => Err(de::Error::invalid_type(
                Unexpected::Other(other.shape()),
                &"a record map",
            )),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Byte(v) => serializer.serialize_i8(*v),
            Self::Short(v) => serializer.serialize_i16(*v),
            Self::Int(v) => serializer.serialize_i32(*v),
            Self::Long(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f32(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Sequence(items) => items.serialize(serializer),
            Self::Records(records) => records.serialize(serializer),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, boolean, null, sequence or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Long(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        // Above i64::MAX no catalog integer can hold it; keep it as a float
        // and let the caster reject it.
        Ok(match i64::try_from(v) {
            Ok(v) => Value::Long(v),
            Err(_) => Value::Double(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<Value, Value>()? {
            entries.push(entry);
        }
        Ok(Value::Map(entries))
    }
}
