// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration

use serde::{Deserialize, Serialize};

/// Default bound on container nesting.
///
/// serde_json refuses documents nested deeper than 128 levels, and every
/// container level costs two to three of those, so a deeper bound would
/// only be reachable from YAML or in memory.
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum container nesting accepted by encode and decode
    /// (0 = flat containers only)
    pub max_depth: usize,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    max_depth: Option<usize>,
    pretty: Option<bool>,
}

impl CodecConfigBuilder {
    /// Set maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Pretty-print JSON output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    /// Build the configuration
    pub fn build(self) -> CodecConfig {
        let defaults = CodecConfig::default();

        CodecConfig {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            pretty: self.pretty.unwrap_or(defaults.pretty),
        }
    }
}
