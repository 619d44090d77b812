// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec error taxonomy.
//!
//! Every failure aborts the whole encode or decode call; nothing partial is
//! ever handed back to the caller.

use crate::store::StoreError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised by the registry, the caster, the codec and the text adapters.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Type name (or handle) is not part of the registered catalog.
    #[error("no catalog type for {0}")]
    NotFound(String),

    /// Encode could not pin a stored value to exactly one catalog type.
    #[error("key {key} matches {matches} catalog types, expected exactly one")]
    NoMatchingType { key: String, matches: usize },

    /// Decoded value has the wrong shape for its target type.
    #[error("cannot cast {found} to {expected}")]
    Cast { expected: String, found: String },

    /// Sequence input against a type that is not a recognized array type,
    /// or a non-sequence input against an array type.
    #[error("unknown array type: {0}")]
    UnknownArrayType(&'static str),

    /// Input text is not valid in the chosen format.
    #[error("{format} syntax error: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    /// Records could not be written out in the chosen format.
    #[error("{format} emit error: {message}")]
    Emit {
        format: &'static str,
        message: String,
    },

    #[error("record has no key")]
    NullKey,

    #[error("record {key} has no type")]
    NullType { key: String },

    #[error("record {key} has a null value")]
    NullValue { key: String },

    /// Key string is not a valid `namespace:path` key.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("container nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },

    /// Host store refused a write.
    #[error("store rejected {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Type catalog is malformed (fatal at initialization).
    #[error("invalid type catalog: {0}")]
    Registry(String),
}

impl CodecError {
    pub(crate) fn cast(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Cast {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ValueKind;

    #[test]
    fn test_error_messages() {
        let err = CodecError::cast("int32", "string");
        assert_eq!(err.to_string(), "cannot cast string to int32");

        let err = CodecError::NoMatchingType {
            key: "test:age".into(),
            matches: 0,
        };
        assert!(err.to_string().contains("test:age"));

        let err = CodecError::Syntax {
            format: "JSON",
            message: "EOF while parsing".into(),
        };
        assert_eq!(err.to_string(), "JSON syntax error: EOF while parsing");
    }

    #[test]
    fn test_store_error_source() {
        use std::error::Error as _;

        let err = CodecError::Store {
            key: "test:name".into(),
            source: StoreError::ShapeMismatch {
                type_name: "STRING",
                expected: ValueKind::String,
                found: ValueKind::Int32,
            },
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("store rejected test:name"));
    }
}
