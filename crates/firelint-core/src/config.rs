//! Configuration types for firelint.
//!
//! The rule itself only consumes [`RuleConfig`]; the surrounding
//! `[analyzer]` section drives file discovery in the CLI. Configuration
//! is validated before any analysis runs, so the engine can assume a
//! well-formed config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Severity;

/// Top-level configuration, loaded from `firelint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Options for the require-converter rule.
    #[serde(default)]
    pub rule: RuleConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or contains unknown keys
    /// in the `[rule]` section.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validates config consistency.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rule.validate()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string(), "**/dist/**".to_string()],
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Options for the require-converter rule.
///
/// Unknown keys are rejected at parse time, mirroring the strict schema
/// of the upstream ESLint rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Collection names exempt from the converter requirement. Matched
    /// exactly and case-sensitively against literal name arguments.
    pub allowed_collections: Vec<String>,

    /// Severity for violations (default: error).
    pub severity: Severity,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            allowed_collections: Vec::new(),
            severity: Severity::Error,
        }
    }
}

impl RuleConfig {
    /// Validates the rule options.
    ///
    /// # Errors
    ///
    /// Returns an error if an allowlist entry is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, name) in self.allowed_collections.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rule.allowed_collections[{i}]: empty collection name"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}
