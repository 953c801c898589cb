//! Findings produced by the matcher.

use serde::Serialize;

use crate::syntax::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    Access,
    Assignment,
    Call,
    MethodCall,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Access => "access",
            FindingKind::Assignment => "assignment",
            FindingKind::Call => "call",
            FindingKind::MethodCall => "method-call",
        }
    }
}

/// One rule matched against one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_text: String,
    pub unit_index: usize,
    pub line: usize,
    pub column: usize,
    pub matched_expression: String,
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(
        rule_text: impl Into<String>,
        kind: FindingKind,
        location: Location,
        matched_expression: impl Into<String>,
    ) -> Self {
        Self {
            rule_text: rule_text.into(),
            unit_index: 0,
            line: location.line,
            column: location.column,
            matched_expression: matched_expression.into(),
            kind,
        }
    }

    pub fn in_unit(mut self, unit_index: usize) -> Self {
        self.unit_index = unit_index;
        self
    }
}
