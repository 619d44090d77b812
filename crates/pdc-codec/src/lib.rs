// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Persistent Data Container Codec
//!
//! Converts a typed, hierarchical key-value store into an ordered list of
//! self-describing `{key, type, value}` records and back, keeping every key,
//! declared type and numeric width across the round trip.
//!
//! # Features
//!
//! - **TypeRegistry** -- Fixed catalog of persisted types, looked up by name or handle
//! - **ContainerCodec** -- Recursive encode/decode of nested containers and container arrays
//! - **Caster** -- Restores exact widths on values read back from text
//! - **Text Adapters** -- JSON (`serde_json`) and YAML (`serde_yaml`) documents
//!
//! # Architecture
//!
//! ```text
//! DataContainer --encode--> Vec<Record> --serde--> JSON / YAML
//!      ^                        |
//!      +--------decode----------+  (values pass through cast())
//! ```
//!
//! # Example
//!
//! ```rust
//! use pdc_codec::{
//!     ContainerCodec, DataContainer, MemoryContainer, MemoryContext, NamespacedKey,
//!     TypeRegistry, Variant, FLOAT, STRING,
//! };
//!
//! let registry = TypeRegistry::new().unwrap();
//! let codec = ContainerCodec::new(&registry);
//!
//! let mut pdc = MemoryContainer::new();
//! pdc.set(NamespacedKey::new("demo", "name").unwrap(), STRING, "mfnalex".into())
//!     .unwrap();
//! pdc.set(NamespacedKey::new("demo", "weight").unwrap(), FLOAT, 60.5f32.into())
//!     .unwrap();
//!
//! let json = codec.to_json(&pdc).unwrap();
//! let back = codec.from_json(&MemoryContext, &json).unwrap();
//!
//! let weight = NamespacedKey::new("demo", "weight").unwrap();
//! assert_eq!(back.get(&weight, FLOAT), Some(Variant::Float(60.5)));
//! assert_eq!(back, pdc);
//! ```

pub mod caster;
pub mod codec;
pub mod config;
pub mod error;
pub mod key;
pub mod memory;
pub mod record;
pub mod registry;
pub mod store;
pub mod text;
pub mod value;


pub use caster::cast;
pub use codec::ContainerCodec;
pub use config::{CodecConfig, CodecConfigBuilder, DEFAULT_MAX_DEPTH};
pub use error::{CodecError, Result};
pub use key::{NamespacedKey, DEFAULT_NAMESPACE};
pub use memory::{Entry, MemoryContainer, MemoryContext};
pub use record::{Record, Value};
pub use registry::{
    ComplexShape, TypeDescriptor, TypeHandle, TypeRegistry, ValueKind, BOOLEAN, BYTE, BYTE_ARRAY,
    CATALOG, DOUBLE, FLOAT, INTEGER, INTEGER_ARRAY, LONG, LONG_ARRAY, SHORT, STRING,
    TAG_CONTAINER, TAG_CONTAINER_ARRAY,
};
pub use store::{AdapterContext, DataContainer, StoreError};
pub use text::TextFormat;
pub use value::Variant;
