// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subcommand implementations.
//!
//! Every command decodes into a [`MemoryContainer`] first, so anything that
//! reaches the output has passed a full decode.

use anyhow::{bail, Context, Result};
use pdc_codec::{
    CodecConfig, ContainerCodec, MemoryContainer, MemoryContext, TextFormat, TypeRegistry,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Load a codec config file (JSON or YAML by extension, YAML otherwise).
pub fn load_config(path: &Path) -> Result<CodecConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let config: CodecConfig = match TextFormat::from_path(path) {
        Some(TextFormat::Json) => serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON config {}", path.display()))?,
        _ => serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML config {}", path.display()))?,
    };

    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// Explicit format, else the one implied by the file extension.
pub fn resolve_format(path: &Path, explicit: Option<TextFormat>) -> Result<TextFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    match TextFormat::from_path(path) {
        Some(format) => Ok(format),
        None => bail!(
            "Cannot infer format of {} (expected .json, .yaml or .yml). Use --from/--to to specify it.",
            path.display()
        ),
    }
}

/// The format a conversion writes when none is requested.
pub fn default_target(source: TextFormat, output: Option<&Path>) -> TextFormat {
    output.and_then(TextFormat::from_path).unwrap_or(match source {
        TextFormat::Json => TextFormat::Yaml,
        TextFormat::Yaml => TextFormat::Json,
    })
}

/// Decode `text` and re-encode it as `to`.
pub fn convert_text(
    codec: &ContainerCodec<'_>,
    text: &str,
    from: TextFormat,
    to: TextFormat,
) -> Result<String> {
    let container = codec
        .from_text(&MemoryContext, text, from)
        .with_context(|| format!("Failed to decode {from} input"))?;

    codec
        .to_text(&container, to)
        .with_context(|| format!("Failed to encode {to} output"))
}

/// Entry statistics of a decoded container tree.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Top-level entries.
    pub entries: usize,
    /// Entries per type name, nested containers included.
    pub per_type: BTreeMap<&'static str, usize>,
    /// Deepest container nesting (0 = flat).
    pub depth: usize,
}

impl Summary {
    pub fn of(container: &MemoryContainer) -> Self {
        let mut summary = Self {
            entries: container.entries().len(),
            ..Self::default()
        };
        summary.visit(container, 0);
        summary
    }

    fn visit(&mut self, container: &MemoryContainer, depth: usize) {
        self.depth = self.depth.max(depth);

        for entry in container.entries() {
            *self.per_type.entry(entry.ty.name()).or_default() += 1;

            if let Some(inner) = entry.value.as_container() {
                self.visit(inner, depth + 1);
            }
            for inner in entry.value.as_container_array().unwrap_or_default() {
                self.visit(inner, depth + 1);
            }
        }
    }

    /// Entries across the whole tree.
    pub fn total(&self) -> usize {
        self.per_type.values().sum()
    }
}

/// Decode `text` and summarize it.
pub fn validate_text(codec: &ContainerCodec<'_>, text: &str, from: TextFormat) -> Result<Summary> {
    let container = codec
        .from_text(&MemoryContext, text, from)
        .with_context(|| format!("Failed to decode {from} input"))?;
    Ok(Summary::of(&container))
}

fn read_input(input: &Path) -> Result<String> {
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("[OK] Written: {}", path.display());
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

pub fn cmd_convert(
    config: CodecConfig,
    input: &Path,
    output: Option<PathBuf>,
    from: Option<TextFormat>,
    to: Option<TextFormat>,
) -> Result<()> {
    let registry = TypeRegistry::new()?;
    let codec = ContainerCodec::with_config(&registry, config);

    let from = resolve_format(input, from)?;
    let to = to.unwrap_or_else(|| default_target(from, output.as_deref()));

    tracing::info!(input = %input.display(), %from, %to, "converting");
    let text = convert_text(&codec, &read_input(input)?, from, to)?;
    write_output(output.as_deref(), &text)
}

pub fn cmd_validate(
    config: CodecConfig,
    input: &Path,
    from: Option<TextFormat>,
    verbose: bool,
) -> Result<()> {
    let registry = TypeRegistry::new()?;
    let codec = ContainerCodec::with_config(&registry, config);

    let from = resolve_format(input, from)?;
    let summary = validate_text(&codec, &read_input(input)?, from)?;

    println!(
        "[OK] {from} validation passed: {} ({} entries, {} in total)",
        input.display(),
        summary.entries,
        summary.total()
    );

    if verbose {
        println!("\nTypes:");
        for (name, count) in &summary.per_type {
            println!("  {name}: {count} entries");
        }
        println!("\nMax nesting depth: {}", summary.depth);
    }
    Ok(())
}

pub fn cmd_normalize(config: CodecConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let registry = TypeRegistry::new()?;
    let codec = ContainerCodec::with_config(&registry, config);

    let format = resolve_format(input, None)?;
    let text = convert_text(&codec, &read_input(input)?, format, format)?;
    write_output(output.as_deref(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_JSON: &str = r#"[
        {"key":"test:name","type":"STRING","value":"mfnalex"},
        {"key":"test:pdc1","type":"TAG_CONTAINER","value":[
            {"key":"test:age","type":"INTEGER","value":28}
        ]},
        {"key":"test:pdc23","type":"TAG_CONTAINER_ARRAY","value":[
            [{"key":"test:height","type":"DOUBLE","value":1.85}],
            [{"key":"test:weight","type":"FLOAT","value":60.5}]
        ]}
    ]"#;

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(
            resolve_format(Path::new("a.yml"), None).unwrap(),
            TextFormat::Yaml
        );
        assert_eq!(
            resolve_format(Path::new("a.txt"), Some(TextFormat::Json)).unwrap(),
            TextFormat::Json
        );
        assert!(resolve_format(Path::new("a.txt"), None).is_err());
    }

    #[test]
    fn test_default_target() {
        assert_eq!(default_target(TextFormat::Json, None), TextFormat::Yaml);
        assert_eq!(
            default_target(TextFormat::Json, Some(Path::new("out.json"))),
            TextFormat::Json
        );
        assert_eq!(
            default_target(TextFormat::Yaml, Some(Path::new("out"))),
            TextFormat::Json
        );
    }

    #[test]
    fn test_convert_json_to_yaml_and_back() {
        let registry = TypeRegistry::new().unwrap();
        let codec = ContainerCodec::new(&registry);

        let yaml = convert_text(&codec, SAMPLE_JSON, TextFormat::Json, TextFormat::Yaml).unwrap();
        let json = convert_text(&codec, &yaml, TextFormat::Yaml, TextFormat::Json).unwrap();
        let normalized =
            convert_text(&codec, SAMPLE_JSON, TextFormat::Json, TextFormat::Json).unwrap();

        assert_eq!(json, normalized);
        assert!(json.contains(r#""value":60.5"#));
    }

    #[test]
    fn test_convert_reports_decode_errors() {
        let registry = TypeRegistry::new().unwrap();
        let codec = ContainerCodec::new(&registry);

        let err = convert_text(
            &codec,
            r#"[{"key":"test:a","type":"SHORT","value":70000}]"#,
            TextFormat::Json,
            TextFormat::Yaml,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to decode JSON input"));
    }

    #[test]
    fn test_validate_summary() {
        let registry = TypeRegistry::new().unwrap();
        let codec = ContainerCodec::new(&registry);

        let summary = validate_text(&codec, SAMPLE_JSON, TextFormat::Json).unwrap();
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.total(), 6);
        assert_eq!(summary.depth, 1);
        assert_eq!(summary.per_type.get("DOUBLE"), Some(&1));
        assert_eq!(summary.per_type.get("TAG_CONTAINER_ARRAY"), Some(&1));
    }

    #[test]
    fn test_load_config() {
        let file = temp_with(".yaml", "max_depth: 3\npretty: true\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, CodecConfig::builder().max_depth(3).pretty(true).build());

        let file = temp_with(".json", r#"{"pretty": true}"#);
        let config = load_config(file.path()).unwrap();
        assert!(config.pretty);

        let file = temp_with(".json", "{not json");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_cmd_convert_writes_file() {
        let input = temp_with(".json", SAMPLE_JSON);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pdc.yaml");

        cmd_convert(
            CodecConfig::default(),
            input.path(),
            Some(output.clone()),
            None,
            None,
        )
        .unwrap();

        let yaml = std::fs::read_to_string(&output).unwrap();
        assert!(yaml.contains("TAG_CONTAINER_ARRAY"));

        let back = dir.path().join("pdc.json");
        cmd_convert(CodecConfig::default(), &output, Some(back.clone()), None, None).unwrap();
        let registry = TypeRegistry::new().unwrap();
        let codec = ContainerCodec::new(&registry);
        assert_eq!(
            std::fs::read_to_string(&back).unwrap(),
            convert_text(&codec, SAMPLE_JSON, TextFormat::Json, TextFormat::Json).unwrap()
        );
    }

    #[test]
    fn test_cmd_normalize_is_stable() {
        let input = temp_with(".json", SAMPLE_JSON);
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");

        cmd_normalize(CodecConfig::default(), input.path(), Some(first.clone())).unwrap();
        cmd_normalize(CodecConfig::default(), &first, Some(second.clone())).unwrap();

        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_cmd_validate_rejects_bad_input() {
        let input = temp_with(".yaml", "- key: test:a\n  type: NOPE\n  value: 1\n");
        assert!(cmd_validate(CodecConfig::default(), input.path(), None, true).is_err());

        let input = temp_with(".json", SAMPLE_JSON);
        assert!(cmd_validate(CodecConfig::default(), input.path(), None, true).is_ok());
    }
}
