// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Persistent data container converter
//!
//! # Usage
//!
//! ```bash
//! # JSON dump to YAML (format taken from the extensions)
//! pdc-convert convert pdc.json -o pdc.yaml
//!
//! # Check a dump and list entry counts per type
//! pdc-convert validate pdc.yaml -v
//!
//! # Rewrite a dump in canonical form
//! RUST_LOG=debug pdc-convert normalize pdc.json -o pdc.norm.json
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pdc_codec::{CodecConfig, TextFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdc-convert")]
#[command(about = "Convert persistent data container dumps between JSON and YAML")]
#[command(version)]
struct Cli {
    /// Codec config file (YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum container nesting depth (overrides the config file)
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a dump and write it in another format
    Convert {
        /// Input dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Input format (from the extension if not specified)
        #[arg(long, value_enum)]
        from: Option<Format>,

        /// Output format (from the output extension, else the other format)
        #[arg(long, value_enum)]
        to: Option<Format>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Decode a dump and report what it holds
    Validate {
        /// Input dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input format (from the extension if not specified)
        #[arg(long, value_enum)]
        from: Option<Format>,

        /// Show entry counts per type
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode a dump and re-encode it in the same format
    Normalize {
        /// Input dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for TextFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => TextFormat::Json,
            Format::Yaml => TextFormat::Yaml,
        }
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for converted output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => commands::load_config(path)?,
        None => CodecConfig::default(),
    };
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }

    match cli.command {
        Commands::Convert {
            input,
            output,
            from,
            to,
            pretty,
        } => {
            config.pretty |= pretty;
            commands::cmd_convert(config, &input, output, from.map(Into::into), to.map(Into::into))?;
        }
        Commands::Validate {
            input,
            from,
            verbose,
        } => {
            commands::cmd_validate(config, &input, from.map(Into::into), verbose)?;
        }
        Commands::Normalize { input, output } => {
            commands::cmd_normalize(config, &input, output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only test touching RUST_LOG
    #[test]
    fn test_env_filter() {
        std::env::set_var(EnvFilter::DEFAULT_ENV, "debug");
        assert_eq!(env_filter().to_string().to_lowercase(), "debug");

        std::env::set_var(EnvFilter::DEFAULT_ENV, "pdc_codec=trace");
        assert_eq!(env_filter().to_string().to_lowercase(), "pdc_codec=trace");

        std::env::set_var(EnvFilter::DEFAULT_ENV, "pdc_codec=loud");
        assert_eq!(env_filter().to_string().to_lowercase(), "info");

        std::env::remove_var(EnvFilter::DEFAULT_ENV);
        assert_eq!(env_filter().to_string().to_lowercase(), "info");
    }
}
