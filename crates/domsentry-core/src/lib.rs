//! Rule-driven scanner for risky DOM and JavaScript API usage.
//!
//! Source text is split into units (a standalone file, or the `<script>`
//! bodies of an HTML document), each unit is parsed, and every member access,
//! member assignment and call is checked against a list of textual rules.

pub mod config;
pub mod finding;
pub mod markup;
pub mod matcher;
pub mod parser;
pub mod rules;
pub mod session;
pub mod syntax;
pub mod visitor;

pub use finding::{Finding, FindingKind};
pub use rules::{Rule, RuleKind};
pub use session::{Report, ScanOutcome, ScanSession, SourceLayout, SourceSet};
