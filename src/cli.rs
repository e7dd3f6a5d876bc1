//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tempo Especial - special-period evaluator for exposure claims
///
/// Reads a request with one or more exposure periods, judges each
/// sub-period against the regulation in force at the time and prints
/// the draft of the legal reasoning.
///
/// Examples:
///   tempo-especial --input periodos.json
///   tempo-especial --input periodos.json --format json --output resultado.json
///   cat periodos.json | tempo-especial --input - --format text
///   tempo-especial --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Request file with the periods to evaluate
    ///
    /// JSON object with a "periodos" array. Use "-" to read from stdin.
    #[arg(short, long, value_name = "FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// If not specified, the report is written to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json, text)
    ///
    /// "text" prints only the draft. Can also be set via
    /// TEMPO_ESPECIAL_FORMAT or .tempo-especial.toml.
    #[arg(short, long, value_name = "FORMAT", env = "TEMPO_ESPECIAL_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tempo-especial.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Leave the per-sub-period results out of the Markdown report
    #[arg(long)]
    pub no_results: bool,

    /// Emit JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Exit with code 2 when no sub-period is recognized as special
    #[arg(long)]
    pub fail_if_none_special: bool,

    /// Generate a default .tempo-especial.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report ending with the draft (default)
    #[default]
    Markdown,
    /// JSON with results, summary and draft
    Json,
    /// The draft alone, as plain text
    Text,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the request is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref() == Some(Path::new("-"))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match self.input {
            None => return Err("An input file is required (--input)".to_string()),
            Some(_) if self.reads_stdin() => {}
            Some(ref path) => {
                if !path.exists() {
                    return Err(format!("Input file does not exist: {}", path.display()));
                }
                if !path.is_file() {
                    return Err(format!("Input path is not a file: {}", path.display()));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
