//! Plain text rendering, one line per finding

use colored::Colorize;
use domsentry_core::session::UnitFailure;
use domsentry_core::{Finding, Report, ScanOutcome, SourceLayout};

pub const NO_ISSUES: &str = "No issues found based on the provided rules.";
pub const NOTHING_SCANNED: &str = "No script content found; nothing was scanned.";

pub fn render_finding(finding: &Finding, layout: SourceLayout) -> String {
    let script = match layout {
        SourceLayout::Standalone => String::new(),
        SourceLayout::Markup => format!("script {}, ", finding.unit_index + 1),
    };

    format!(
        "Rule match \"{}\" at {}line {}, column {}: {}",
        finding.rule_text, script, finding.line, finding.column, finding.matched_expression
    )
}

pub fn render_failure(failure: &UnitFailure) -> String {
    format!(
        "Failed to parse script {}: {}",
        failure.unit_index + 1,
        failure.error
    )
}

/// The closing line printed when nothing matched.
pub fn render_outcome(report: &Report) -> Option<&'static str> {
    match report.outcome() {
        ScanOutcome::Matched => None,
        ScanOutcome::Clean => Some(NO_ISSUES),
        ScanOutcome::NotScanned => Some(NOTHING_SCANNED),
    }
}

pub fn print_report(report: &Report) {
    for failure in report.failures() {
        eprintln!("{}", render_failure(failure).red());
    }

    for finding in report.findings() {
        println!("{}", render_finding(finding, report.layout()));
    }

    if let Some(line) = render_outcome(report) {
        println!("{}", line.green());
    }
}
