//! Parser module for JavaScript source units
//!
//! Wraps SWC with the scanner's fixed language configuration: JSX enabled and
//! an unambiguous source type (module when the text uses import/export, script
//! otherwise).

use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, Span, Spanned};
use swc_ecma_parser::{EsSyntax, StringInput, Syntax, lexer::Lexer};

use crate::syntax::Location;

pub use swc_ecma_ast::{EsVersion, Program};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// A successfully parsed unit. Keeps the source map so spans can be turned
/// into line/column locations.
pub struct ParsedUnit {
    program: Program,
    source_map: Lrc<SourceMap>,
}

impl std::fmt::Debug for ParsedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedUnit")
            .field("is_module", &self.is_module())
            .finish()
    }
}

impl ParsedUnit {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_module(&self) -> bool {
        matches!(self.program, Program::Module(_))
    }

    pub fn location(&self, span: Span) -> Location {
        if span.is_dummy() {
            return Location::new(1, 0);
        }
        let loc = self.source_map.lookup_char_pos(span.lo);
        Location::new(loc.line, loc.col.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParserBuilder {
    jsx: bool,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self { jsx: true }
    }
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsx(mut self, enabled: bool) -> Self {
        self.jsx = enabled;
        self
    }

    pub fn build(self) -> Parser {
        Parser {
            syntax: Syntax::Es(EsSyntax {
                jsx: self.jsx,
                ..Default::default()
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parser {
    syntax: Syntax,
}

impl Parser {
    pub fn new() -> Self {
        ParserBuilder::new().build()
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    /// Parses one script body. Recoverable syntax errors also fail the unit.
    pub fn parse(&self, code: &str) -> Result<ParsedUnit, ParseError> {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.js".into()).into(), code.to_string());

        let lexer = Lexer::new(
            self.syntax,
            EsVersion::latest(),
            StringInput::from(&*fm),
            None,
        );

        let mut parser = swc_ecma_parser::Parser::new_from(lexer);

        let to_parse_error = |e: swc_ecma_parser::error::Error| {
            let span = e.span();
            let loc = source_map.lookup_char_pos(span.lo);
            ParseError {
                line: loc.line,
                column: loc.col.0,
                message: e.kind().msg().to_string(),
            }
        };

        let program = parser.parse_program().map_err(&to_parse_error)?;

        if let Some(error) = parser.take_errors().into_iter().next() {
            return Err(to_parse_error(error));
        }

        Ok(ParsedUnit {
            program,
            source_map: source_map.clone(),
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
