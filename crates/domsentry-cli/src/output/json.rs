//! JSON output formatter
//!
//! Serializes the whole report with a summary block for programmatic use.

use domsentry_core::session::UnitFailure;
use domsentry_core::{Finding, Report, ScanOutcome, SourceLayout};
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub metadata: JsonMetadata,
    pub summary: JsonSummary,
    pub findings: &'a [Finding],
    pub failures: &'a [UnitFailure],
}

#[derive(Serialize)]
pub struct JsonMetadata {
    pub domsentry_version: &'static str,
    pub source: String,
    pub rules: usize,
}

#[derive(Serialize)]
pub struct JsonSummary {
    pub layout: SourceLayout,
    pub outcome: ScanOutcome,
    pub units_scanned: usize,
    pub total_findings: usize,
    pub failed_units: usize,
}

pub struct JsonFormatter {
    source: String,
    rules: usize,
}

impl JsonFormatter {
    pub fn new(source: impl Into<String>, rules: usize) -> Self {
        Self {
            source: source.into(),
            rules,
        }
    }

    pub fn format(&self, report: &Report) -> String {
        let output = self.build_output(report);
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn build_output<'a>(&self, report: &'a Report) -> JsonOutput<'a> {
        JsonOutput {
            version: "1.0",
            metadata: JsonMetadata {
                domsentry_version: env!("CARGO_PKG_VERSION"),
                source: self.source.clone(),
                rules: self.rules,
            },
            summary: JsonSummary {
                layout: report.layout(),
                outcome: report.outcome(),
                units_scanned: report.units_scanned(),
                total_findings: report.findings().len(),
                failed_units: report.failures().len(),
            },
            findings: report.findings(),
            failures: report.failures(),
        }
    }
}
