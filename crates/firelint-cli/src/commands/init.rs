//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# firelint configuration

[analyzer]
root = "."
exclude = ["**/node_modules/**", "**/dist/**"]

# Options for the require-converter rule (FS001).

[rule]
# Collection names that may be opened without a converter.
# Matched exactly and case-sensitively against literal arguments;
# dynamic names are never exempt.
allowed_collections = []

# Severity of violations: "error", "warning", or "info".
severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("firelint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)?;

    println!("Created firelint.toml");
    println!();
    println!("Next steps:");
    println!("  1. Add exempt collections to allowed_collections if needed");
    println!("  2. Run: firelint check");

    Ok(())
}
