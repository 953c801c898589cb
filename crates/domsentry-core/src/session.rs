//! Scan session
//!
//! Drives parsing and traversal over every source unit, collecting findings
//! into a [`Report`]. A unit that fails to parse is recorded and skipped; the
//! remaining units are still scanned.

use std::ops::ControlFlow;

use rayon::prelude::*;
use serde::Serialize;
use swc_ecma_ast::{AssignExpr, CallExpr, MemberExpr};
use tracing::{debug, warn};

use crate::finding::Finding;
use crate::markup::{extract_scripts, looks_like_markup};
use crate::matcher::match_node;
use crate::parser::{ParseError, Parser};
use crate::rules::Rule;
use crate::syntax::{MemberShape, SyntaxNode};
use crate::visitor::{AstVisitor, VisitorContext, walk_program};

/// How the scanned text was split into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLayout {
    /// A standalone JavaScript file: one implicit unit.
    #[default]
    Standalone,
    /// An HTML document: one unit per `<script>` element.
    Markup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub index: usize,
    pub text: String,
}

impl SourceUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Source text split into scannable units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub layout: SourceLayout,
    pub units: Vec<SourceUnit>,
}

impl SourceSet {
    pub fn standalone(text: impl Into<String>) -> Self {
        Self {
            layout: SourceLayout::Standalone,
            units: vec![SourceUnit::new(0, text)],
        }
    }

    pub fn scripts<I, S>(scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            layout: SourceLayout::Markup,
            units: scripts
                .into_iter()
                .enumerate()
                .map(|(index, text)| SourceUnit::new(index, text))
                .collect(),
        }
    }

    /// Splits raw content, extracting `<script>` bodies when it is markup.
    pub fn from_content(content: &str, is_markup: bool) -> Self {
        if is_markup {
            Self::scripts(extract_scripts(content))
        } else {
            Self::standalone(content)
        }
    }

    /// Like [`SourceSet::from_content`], detecting markup from the content.
    pub fn detect(content: &str) -> Self {
        Self::from_content(content, looks_like_markup(content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub unit_index: usize,
    pub error: ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanOutcome {
    /// No units were available to scan.
    NotScanned,
    /// Units were scanned and no rule matched.
    Clean,
    Matched,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    layout: SourceLayout,
    units_scanned: usize,
    findings: Vec<Finding>,
    failures: Vec<UnitFailure>,
}

impl Report {
    pub fn layout(&self) -> SourceLayout {
        self.layout
    }

    pub fn units_scanned(&self) -> usize {
        self.units_scanned
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn failures(&self) -> &[UnitFailure] {
        &self.failures
    }

    pub fn any_match(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn outcome(&self) -> ScanOutcome {
        if self.any_match() {
            ScanOutcome::Matched
        } else if self.units_scanned == 0 {
            ScanOutcome::NotScanned
        } else {
            ScanOutcome::Clean
        }
    }

    fn push_unit(&mut self, unit_index: usize, result: Result<Vec<Finding>, ParseError>) {
        self.units_scanned += 1;
        match result {
            Ok(findings) => self.findings.extend(findings),
            Err(error) => self.failures.push(UnitFailure { unit_index, error }),
        }
    }
}

pub struct ScanSession {
    rules: Vec<Rule>,
    parser: Parser,
}

impl ScanSession {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            parser: Parser::new(),
        }
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Parses and walks one unit. Findings are tagged with the unit's index.
    pub fn scan_unit(&self, unit: &SourceUnit) -> Result<Vec<Finding>, ParseError> {
        let parsed = self.parser.parse(&unit.text).inspect_err(|e| {
            warn!(unit = unit.index, error = %e, "failed to parse script unit");
        })?;

        let ctx = VisitorContext::new(&parsed, unit.index);
        let mut collector = FindingCollector {
            rules: &self.rules,
            findings: Vec::new(),
        };
        walk_program(parsed.program(), &mut collector, &ctx);

        debug!(
            unit = unit.index,
            findings = collector.findings.len(),
            "scanned unit"
        );
        Ok(collector.findings)
    }

    pub fn scan(&self, source: &SourceSet) -> Report {
        let mut report = Report {
            layout: source.layout,
            ..Default::default()
        };

        for unit in &source.units {
            report.push_unit(unit.index, self.scan_unit(unit));
        }

        report
    }

    /// Scans units on the rayon pool. Per-unit results are collected in unit
    /// order and merged afterwards, so the report equals [`ScanSession::scan`].
    pub fn scan_parallel(&self, source: &SourceSet) -> Report {
        let results: Vec<(usize, Result<Vec<Finding>, ParseError>)> = source
            .units
            .par_iter()
            .map(|unit| (unit.index, self.scan_unit(unit)))
            .collect();

        let mut report = Report {
            layout: source.layout,
            ..Default::default()
        };
        for (unit_index, result) in results {
            report.push_unit(unit_index, result);
        }

        report
    }
}

struct FindingCollector<'r> {
    rules: &'r [Rule],
    findings: Vec<Finding>,
}

impl FindingCollector<'_> {
    fn record(&mut self, node: SyntaxNode, ctx: &VisitorContext) {
        let unit_index = ctx.unit_index();
        self.findings.extend(
            match_node(&node, self.rules)
                .into_iter()
                .map(|finding| finding.in_unit(unit_index)),
        );
    }
}

impl AstVisitor for FindingCollector<'_> {
    fn visit_member_expr(&mut self, node: &MemberExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        let shape = MemberShape::from_member(node, ctx.span_to_location(node.span));
        self.record(SyntaxNode::PropertyAccess(shape), ctx);
        ControlFlow::Continue(())
    }

    fn visit_member_assign(
        &mut self,
        target: &MemberExpr,
        _assign: &AssignExpr,
        ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        let shape = MemberShape::from_member(target, ctx.span_to_location(target.span));
        self.record(SyntaxNode::PropertyAssignment(shape), ctx);
        ControlFlow::Continue(())
    }

    fn visit_call_expr(&mut self, node: &CallExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        if let Some(call) = SyntaxNode::from_call(node, ctx.span_to_location(node.span)) {
            self.record(call, ctx);
        }
        ControlFlow::Continue(())
    }
}
