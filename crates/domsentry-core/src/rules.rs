//! Rule model
//!
//! A rules file holds one pattern per line. Each trimmed, non-empty line is
//! classified into one of four matching strategies.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

const ELEMENT_PREFIX: &str = "element.";
const WILDCARD_PROPERTY: &str = "onevent";

#[derive(Debug, thiserror::Error)]
pub enum RuleFileError {
    #[error("Failed to read rules file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Matching strategy derived from the text of a rule line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum RuleKind {
    /// `element.onevent`: any `on*` property read or written on an `element*` object.
    ElementWildcard,
    /// `element.<property>`: that exact property on an `element*` object.
    ElementExact { property: String },
    /// Any other dotted line, compared against `object.property` verbatim.
    DottedExact,
    /// A plain name: property, called function or called method.
    BareName,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::ElementWildcard => "element-wildcard",
            RuleKind::ElementExact { .. } => "element-exact",
            RuleKind::DottedExact => "dotted-exact",
            RuleKind::BareName => "bare-name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    text: String,
    #[serde(flatten)]
    kind: RuleKind,
}

impl Rule {
    /// Classifies a single rule line. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        let kind = match text.strip_prefix(ELEMENT_PREFIX) {
            Some(rest) => {
                let property = rest.split('.').next().unwrap_or_default();
                if property == WILDCARD_PROPERTY {
                    RuleKind::ElementWildcard
                } else {
                    RuleKind::ElementExact {
                        property: property.to_string(),
                    }
                }
            }
            None if text.contains('.') => RuleKind::DottedExact,
            None => RuleKind::BareName,
        };

        Some(Self {
            text: text.to_string(),
            kind,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Human-readable summary of what the rule fires on.
    pub fn describe(&self) -> String {
        match &self.kind {
            RuleKind::ElementWildcard => {
                "any property starting with `on` read or assigned on an object whose name starts with `element`".to_string()
            }
            RuleKind::ElementExact { property } => format!(
                "property `{}` read or assigned on an object whose name starts with `element`",
                property
            ),
            RuleKind::DottedExact => format!(
                "member access written exactly as `{}`, or a property named `{}`",
                self.text, self.text
            ),
            RuleKind::BareName => format!(
                "property `{0}`, calls to `{0}(...)` and method calls `.{0}(...)`",
                self.text
            ),
        }
    }
}

/// Classifies every non-blank line, keeping file order.
pub fn parse_rules<I, S>(lines: I) -> Vec<Rule>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| Rule::parse(line.as_ref()))
        .collect()
}

pub fn load_rules_file(path: &Path) -> Result<Vec<Rule>, RuleFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| RuleFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rules = parse_rules(content.lines());
    debug!(path = %path.display(), count = rules.len(), "loaded rules");
    Ok(rules)
}
