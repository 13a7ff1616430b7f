//! Check command: discover, lower, and lint JavaScript files.

use anyhow::{Context, Result};
use firelint_core::{Config, LintResult, RequireConverter};
use firelint_js::{JsExtractor, LanguageExtractor};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(path, config_path)?;
    config.validate().context("config validation failed")?;

    let rule = RequireConverter::from_config(&config.rule);
    let extractor = JsExtractor::new();

    let root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };

    let mut exclude_patterns = exclude;
    exclude_patterns.extend(config.analyzer.exclude.clone());

    let files = discover_files(&root, &exclude_patterns, &extractor);
    info!("Analyzing {} files", files.len());

    let mut result = LintResult::new();
    // Source text of offending files, kept for rich text output.
    let mut sources: HashMap<PathBuf, String> = HashMap::new();

    for file_path in &files {
        let source = match std::fs::read_to_string(file_path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to read {}: {e}", file_path.display());
                continue;
            }
        };

        let tree = match extractor.lower(&source) {
            Ok(t) => t,
            Err(e) => {
                warn!("Failed to parse {}: {e}", file_path.display());
                continue;
            }
        };

        let rel = file_path.strip_prefix(&root).unwrap_or(file_path);
        let violations = rule.check(&tree, rel);
        if !violations.is_empty() {
            sources.insert(rel.to_path_buf(), source);
        }
        result.violations.extend(violations);
        result.files_checked += 1;
    }

    result.sort();
    super::output::print(&result, format, &sources)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: &Path, config_path: Option<&Path>) -> Result<Config> {
    if let Some(explicit) = config_path {
        return Config::from_file(explicit)
            .with_context(|| format!("failed to load {}", explicit.display()));
    }

    let local = path.join("firelint.toml");
    if local.exists() {
        info!("Using config: {}", local.display());
        return Config::from_file(&local)
            .with_context(|| format!("failed to load {}", local.display()));
    }

    info!("No firelint.toml found, using defaults");
    Ok(Config::default())
}

fn discover_files(
    root: &Path,
    exclude: &[String],
    extractor: &dyn LanguageExtractor,
) -> Vec<PathBuf> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Walk error: {e}");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        if !extractor.extensions().contains(&ext.as_str()) {
            continue;
        }

        if should_exclude(path, exclude) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Glob-ish matching: strip wildcards, compare on the remaining
        // path fragment. Enough for patterns like "**/node_modules/**".
        let fragment = pattern.replace("**", "").replace('*', "");
        if !fragment.is_empty() && path_str.contains(&fragment) {
            return true;
        }
    }

    false
}
