//! List rules command implementation.

use firelint_core::{CODE, DESCRIPTION, NAME};

/// Runs the list-rules command.
pub fn run() {
    println!("{}", rules_table());
}

fn rules_table() -> String {
    use std::fmt::Write;

    let mut table = String::from("Available rules:\n\n");
    let _ = writeln!(table, "{:<8} {:<20} Description", "Code", "Name");
    let _ = writeln!(table, "{}", "-".repeat(72));
    let _ = writeln!(table, "{CODE:<8} {NAME:<20} {DESCRIPTION}");
    table.push('\n');
    table.push_str("Configure via the [rule] section of firelint.toml:\n");
    table.push_str("  allowed_collections - names exempt from the converter requirement\n");
    table.push_str("  severity            - error, warning, or info\n");
    table
}
