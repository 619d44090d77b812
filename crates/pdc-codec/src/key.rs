// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespaced keys (`namespace:path`).

use crate::error::{CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Namespace assumed when a key string carries no `namespace:` prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A key of the form `namespace:path`, unique within one container.
///
/// Namespaces use `[a-z0-9._-]`, paths additionally allow `/`. When parsed,
/// `path` and `:path` both land in [`DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
    namespace: String,
    path: String,
}

impl NamespacedKey {
    /// Create a key from its two halves, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let path = path.into();

        if namespace.is_empty() {
            return Err(invalid(&namespace, &path, "empty namespace"));
        }
        if !namespace.bytes().all(is_namespace_byte) {
            return Err(invalid(&namespace, &path, "illegal character in namespace"));
        }
        if path.is_empty() {
            return Err(invalid(&namespace, &path, "empty path"));
        }
        if !path.bytes().all(|b| is_namespace_byte(b) || b == b'/') {
            return Err(invalid(&namespace, &path, "illegal character in path"));
        }

        Ok(Self { namespace, path })
    }

    /// Key in the default namespace.
    pub fn minecraft(path: impl Into<String>) -> Result<Self> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-')
}

fn invalid(namespace: &str, path: &str, reason: &'static str) -> CodecError {
    CodecError::InvalidKey {
        key: format!("{namespace}:{path}"),
        reason,
    }
}

impl FromStr for NamespacedKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let (namespace, path) = match s.split_once(':') {
            Some(("", path)) => (DEFAULT_NAMESPACE, path),
            Some(parts) => parts,
            None => (DEFAULT_NAMESPACE, s),
        };

        Self::new(namespace, path).map_err(|e| match e {
            CodecError::InvalidKey { reason, .. } => CodecError::InvalidKey {
                key: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let key: NamespacedKey = "test:pdc23".parse().unwrap();
        assert_eq!(key.namespace(), "test");
        assert_eq!(key.path(), "pdc23");
        assert_eq!(key.to_string(), "test:pdc23");
    }

    #[test]
    fn test_parse_default_namespace() {
        let key: NamespacedKey = "weight".parse().unwrap();
        assert_eq!(key.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(key.to_string(), "minecraft:weight");
    }

    #[test]
    fn test_parse_empty_namespace() {
        let key: NamespacedKey = ":score".parse().unwrap();
        assert_eq!(key, NamespacedKey::minecraft("score").unwrap());
        assert_eq!(key.to_string(), "minecraft:score");

        assert!(NamespacedKey::new("", "score").is_err());
    }

    #[test]
    fn test_path_allows_slash() {
        let key: NamespacedKey = "plugin:stats/kills.total".parse().unwrap();
        assert_eq!(key.path(), "stats/kills.total");
    }

    #[test]
    fn test_rejects_invalid() {
        for bad in ["Test:x", "test:", ":", "Weight", ":a b", "test:a b", "te/st:x", "a:b:c"] {
            match bad.parse::<NamespacedKey>() {
                Err(CodecError::InvalidKey { key, .. }) => assert_eq!(key, bad),
                other => panic!("{bad:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ordering_and_equality() {
        let a = NamespacedKey::new("test", "a").unwrap();
        let b = NamespacedKey::new("test", "b").unwrap();
        assert!(a < b);
        assert_eq!(a, "test:a".parse().unwrap());
    }
}
