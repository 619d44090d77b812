// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Exact-width casting of decoded values.
//!
//! Text formats usually have a single number type, so a value read back
//! from text has lost the width it was stored with. [`cast`] restores it
//! from the target type.
//!
//! Narrowing never wraps or saturates: an integer target rejects anything
//! outside its range, and any float that is not integral. A float32 target
//! rounds to nearest, but rejects finite inputs that would overflow to
//! infinity.

use crate::error::{CodecError, Result};
use crate::record::Value;
use crate::registry::{ComplexShape, TypeHandle, ValueKind};
use crate::value::Variant;

/// 2^63, the smallest float that no longer fits in an i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Cast `value` to the raw shape `target` stores.
///
/// Returns `Ok(None)` for a null input. Container kinds are not castable;
/// the codec recurses into them instead.
pub fn cast<C>(value: Value, target: TypeHandle) -> Result<Option<Variant<C>>> {
    if value.is_null() {
        return Ok(None);
    }

    if matches!(value, Value::Sequence(_) | Value::Records(_))
        && !target.kind().is_array()
        && !target.kind().is_container()
    {
        return Err(CodecError::UnknownArrayType(target.description()));
    }

    let variant = match target.kind() {
        ValueKind::Float32 => Variant::Float(to_f32(&value, target)?),
        ValueKind::Float64 => Variant::Double(to_f64(&value, target)?),
        ValueKind::Int64 => Variant::Long(to_int(&value, target)?),
        ValueKind::Int32 => Variant::Int(to_int(&value, target)?),
        ValueKind::Int16 => Variant::Short(to_int(&value, target)?),
        ValueKind::Int8 => Variant::Byte(to_byte(&value, target)?),
        ValueKind::String => match value {
            Value::String(s) => Variant::String(s),
            other => return Err(CodecError::cast(target.description(), other.shape())),
        },
        ValueKind::ByteArray => Variant::ByteArray(elements(value, target, to_int)?),
        ValueKind::Int32Array => Variant::IntArray(elements(value, target, to_int)?),
        ValueKind::Int64Array => Variant::LongArray(elements(value, target, to_int)?),
        ValueKind::Container | ValueKind::ContainerArray => {
            return Err(CodecError::cast(
                target.description(),
                format!("{} (containers are decoded, not cast)", value.shape()),
            ));
        }
    };

    Ok(Some(variant))
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match *value {
        Value::Byte(v) => Some(Number::Integer(v.into())),
        Value::Short(v) => Some(Number::Integer(v.into())),
        Value::Int(v) => Some(Number::Integer(v.into())),
        Value::Long(v) => Some(Number::Integer(v)),
        Value::Float(v) => Some(Number::Float(v.into())),
        Value::Double(v) => Some(Number::Float(v)),
        _ => None,
    }
}

fn require_number(value: &Value, target: TypeHandle) -> Result<Number> {
    number(value).ok_or_else(|| CodecError::cast(target.description(), value.shape()))
}

fn to_int<T: TryFrom<i64>>(value: &Value, target: TypeHandle) -> Result<T> {
    let wide = match require_number(value, target)? {
        Number::Integer(v) => v,
        Number::Float(v) => {
            if !v.is_finite() || v.fract() != 0.0 || v < -I64_UPPER || v >= I64_UPPER {
                return Err(CodecError::cast(
                    target.description(),
                    format!("non-integral float {v}"),
                ));
            }
            v as i64
        }
    };

    T::try_from(wide).map_err(|_| {
        CodecError::cast(target.description(), format!("out-of-range integer {wide}"))
    })
}

fn to_f32(value: &Value, target: TypeHandle) -> Result<f32> {
    match require_number(value, target)? {
        Number::Integer(v) => Ok(v as f32),
        Number::Float(v) => {
            let narrowed = v as f32;
            if v.is_finite() && narrowed.is_infinite() {
                return Err(CodecError::cast(
                    target.description(),
                    format!("out-of-range float {v}"),
                ));
            }
            Ok(narrowed)
        }
    }
}

fn to_f64(value: &Value, target: TypeHandle) -> Result<f64> {
    match require_number(value, target)? {
        Number::Integer(v) => Ok(v as f64),
        Number::Float(v) => Ok(v),
    }
}

fn to_byte(value: &Value, target: TypeHandle) -> Result<i8> {
    if let Value::Bool(flag) = *value {
        return Ok(i8::from(flag));
    }

    match target.complex() {
        ComplexShape::Raw => to_int(value, target),
        // Only 1 reads as true; any other number is false.
        ComplexShape::Boolean => match require_number(value, target)? {
            Number::Integer(v) => Ok(i8::from(v == 1)),
            Number::Float(v) => Ok(i8::from(v == 1.0)),
        },
    }
}

fn elements<T>(
    value: Value,
    target: TypeHandle,
    narrow: fn(&Value, TypeHandle) -> Result<T>,
) -> Result<Vec<T>> {
    match value {
        Value::Sequence(items) => items.iter().map(|item| narrow(item, target)).collect(),
        Value::Records(_) => Err(CodecError::cast(target.description(), value.shape())),
        _ => Err(CodecError::UnknownArrayType(target.description())),
    }
}
