// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON and YAML bindings for the record form.
//!
//! A document is a top-level sequence of `{key, type, value}` maps. Only text
//! that does not parse surfaces as [`CodecError::Syntax`]; well-formed text
//! of the wrong shape fails with the decode errors (`Cast`, `InvalidKey`,
//! ...), so callers can tell the two apart.
//!
//! JSON has no spelling for NaN or infinity, so writing one as JSON is a
//! [`CodecError::Emit`]. YAML writes them as `.nan` / `.inf`.

use crate::codec::ContainerCodec;
use crate::error::{CodecError, Result};
use crate::record::{Record, Value};
use crate::store::{AdapterContext, DataContainer};
use std::fmt;
use std::path::Path;

/// Supported text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    Json,
    Yaml,
}

impl TextFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Format for a file extension, case-insensitive, without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ContainerCodec<'_> {
    /// Serialize already-encoded records.
    pub fn records_to_text(&self, records: &[Record], format: TextFormat) -> Result<String> {
        if format == TextFormat::Json {
            if let Some(key) = non_finite_key(records) {
                return Err(CodecError::Emit {
                    format: format.name(),
                    message: format!("{key} holds a non-finite float"),
                });
            }
        }

        let emitted = match format {
            TextFormat::Json if self.config().pretty => {
                serde_json::to_string_pretty(records).map_err(|e| e.to_string())
            }
            TextFormat::Json => serde_json::to_string(records).map_err(|e| e.to_string()),
            TextFormat::Yaml => serde_yaml::to_string(records).map_err(|e| e.to_string()),
        };

        emitted.map_err(|message| CodecError::Emit {
            format: format.name(),
            message,
        })
    }

    /// Parse text into records without decoding their values.
    ///
    /// A YAML document with no content reads as an empty record list. A
    /// document that is not a sequence of maps is a [`CodecError::Cast`].
    pub fn records_from_text(&self, text: &str, format: TextFormat) -> Result<Vec<Record>> {
        let parsed: std::result::Result<Value, String> = match format {
            TextFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            TextFormat::Yaml if text.trim().is_empty() => return Ok(Vec::new()),
            TextFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };

        let document = parsed.map_err(|message| CodecError::Syntax {
            format: format.name(),
            message,
        })?;

        let shape = document.shape();
        document
            .into_records()?
            .ok_or_else(|| CodecError::cast("record sequence", shape))
    }

    /// Encode `container` and serialize it as `format`.
    pub fn to_text<C: DataContainer>(&self, container: &C, format: TextFormat) -> Result<String> {
        let records = self.encode(container)?;
        self.records_to_text(&records, format)
    }

    /// Parse `text` as `format` and decode it into a new container.
    pub fn from_text<X: AdapterContext>(
        &self,
        context: &X,
        text: &str,
        format: TextFormat,
    ) -> Result<X::Container> {
        let records = self.records_from_text(text, format)?;
        tracing::debug!(%format, records = records.len(), "parsed text");
        self.decode(context, records)
    }

    pub fn to_json<C: DataContainer>(&self, container: &C) -> Result<String> {
        self.to_text(container, TextFormat::Json)
    }

    pub fn from_json<X: AdapterContext>(&self, context: &X, text: &str) -> Result<X::Container> {
        self.from_text(context, text, TextFormat::Json)
    }

    pub fn to_yaml<C: DataContainer>(&self, container: &C) -> Result<String> {
        self.to_text(container, TextFormat::Yaml)
    }

    pub fn from_yaml<X: AdapterContext>(&self, context: &X, text: &str) -> Result<X::Container> {
        self.from_text(context, text, TextFormat::Yaml)
    }
}

/// Key of the first record holding a NaN or infinite float, at any depth.
fn non_finite_key(records: &[Record]) -> Option<&str> {
    records
        .iter()
        .find_map(|record| non_finite_in(&record.value, record.key().unwrap_or_default()))
}

fn non_finite_in<'a>(value: &'a Value, key: &'a str) -> Option<&'a str> {
    match value {
        Value::Float(v) if !v.is_finite() => Some(key),
        Value::Double(v) if !v.is_finite() => Some(key),
        Value::Records(records) => non_finite_key(records),
        Value::Sequence(items) => items.iter().find_map(|item| non_finite_in(item, key)),
        Value::Map(entries) => entries.iter().find_map(|(_, v)| non_finite_in(v, key)),
        _ => None,
    }
}
