//! Shared output formatting for lint results.
//!
//! Text output renders each violation through the miette adapter when
//! the offending source text is available, pointing an underline at the
//! flagged call. Violations without a usable span (or whose source was
//! not retained) fall back to a one-line form.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use firelint_core::{LintResult, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(
    result: &LintResult,
    format: OutputFormat,
    sources: &HashMap<PathBuf, String>,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, sources),
        OutputFormat::Json => print_json(result)?,
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, sources: &HashMap<PathBuf, String>) {
    for violation in &result.violations {
        match rich_report(violation, sources) {
            Some(report) => println!("{report:?}"),
            None => println!("{violation}"),
        }
    }
    println!("{}", summary_line(result));
}

/// Builds a miette report with the violation underlined in its source.
fn rich_report(violation: &Violation, sources: &HashMap<PathBuf, String>) -> Option<Report> {
    if violation.location.length == 0 {
        return None;
    }
    let source = sources.get(&violation.location.file)?;
    let named = NamedSource::new(violation.location.file.display().to_string(), source.clone());
    Some(Report::new(ViolationDiagnostic::from(violation)).with_source_code(named))
}

fn summary_line(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let total = errors + warnings + infos;
    if total == 0 {
        format!(
            "firelint: no converter problems in {} file(s)",
            result.files_checked
        )
    } else {
        format!(
            "firelint: {total} problem(s) ({errors} error(s), {warnings} warning(s), \
             {infos} info(s)) in {} file(s)",
            result.files_checked
        )
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firelint_core::{Location, Severity, CODE, MESSAGE, NAME};

    fn flagged(file: &str, offset: usize, length: usize) -> Violation {
        let mut location = Location::new(PathBuf::from(file), 1, 1);
        location.offset = offset;
        location.length = length;
        Violation::new(CODE, NAME, Severity::Error, location, MESSAGE)
    }

    #[test]
    fn rich_report_needs_retained_source() {
        let violation = flagged("app.js", 0, 21);
        let sources = HashMap::new();
        assert!(rich_report(&violation, &sources).is_none());
    }

    #[test]
    fn rich_report_needs_a_span() {
        let violation = flagged("app.js", 0, 0);
        let sources = HashMap::from([(
            PathBuf::from("app.js"),
            "db.collection(\"users\");\n".to_string(),
        )]);
        assert!(rich_report(&violation, &sources).is_none());
    }

    #[test]
    fn rich_report_built_when_source_and_span_present() {
        let violation = flagged("app.js", 0, 21);
        let sources = HashMap::from([(
            PathBuf::from("app.js"),
            "db.collection(\"users\");\n".to_string(),
        )]);
        let report = rich_report(&violation, &sources).expect("report");
        assert!(format!("{report}").contains(MESSAGE));
    }

    #[test]
    fn summary_counts_problems() {
        let mut result = LintResult::new();
        result.files_checked = 3;
        result.violations.push(flagged("a.js", 0, 5));
        let line = summary_line(&result);
        assert!(line.contains("1 problem(s)"));
        assert!(line.contains("1 error(s)"));
        assert!(line.contains("3 file(s)"));
    }

    #[test]
    fn summary_reports_clean_run() {
        let mut result = LintResult::new();
        result.files_checked = 2;
        assert!(summary_line(&result).contains("no converter problems in 2 file(s)"));
    }
}
