//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tempo-especial.toml` files. Only presentation settings live here;
//! the regulation table is fixed and cannot be configured.

use crate::cli::{Args, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".tempo-especial.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path. The report goes to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the per-sub-period results in the Markdown report.
    #[serde(default = "default_true")]
    pub include_results: bool,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_results: true,
            pretty_json: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load the configuration file from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }

        if args.no_results {
            self.report.include_results = false;
        }
        if args.compact {
            self.report.pretty_json = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        let content = toml::to_string_pretty(&Config::default())
            .context("Failed to serialize default config")?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, None);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert!(config.report.include_results);
        assert!(config.report.pretty_json);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "minuta.txt"

[report]
format = "text"
pretty_json = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("minuta.txt"));
        assert_eq!(config.report.format, OutputFormat::Text);
        assert!(config.report.include_results);
        assert!(!config.report.pretty_json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Config, _> = toml::from_str("[report]\nformat = \"html\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_args_override_file() {
        let mut config: Config = toml::from_str("[report]\nformat = \"text\"\n").unwrap();
        let args = Args::try_parse_from([
            "tempo-especial",
            "--input",
            "-",
            "--format",
            "json",
            "--compact",
            "--output",
            "saida.json",
        ])
        .unwrap();

        config.merge_with_args(&args);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(!config.report.pretty_json);
        assert_eq!(config.general.output.as_deref(), Some("saida.json"));
    }

    #[test]
    fn test_absent_args_keep_file_values() {
        let mut config: Config =
            toml::from_str("[general]\noutput = \"a.md\"\n[report]\nformat = \"text\"\n").unwrap();
        let args = Args::try_parse_from(["tempo-especial", "--input", "-"]).unwrap();

        config.merge_with_args(&args);
        assert_eq!(config.report.format, OutputFormat::Text);
        assert_eq!(config.general.output.as_deref(), Some("a.md"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[report]\ninclude_results = false\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(!config.report.include_results);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("format = \"markdown\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.format, OutputFormat::Markdown);
    }
}
