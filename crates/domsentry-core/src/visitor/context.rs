//! Visitor context providing unit information during AST traversal.

use swc_common::Span;

use crate::parser::ParsedUnit;
use crate::syntax::Location;

pub struct VisitorContext<'a> {
    unit: &'a ParsedUnit,
    unit_index: usize,
}

impl<'a> VisitorContext<'a> {
    pub fn new(unit: &'a ParsedUnit, unit_index: usize) -> Self {
        Self { unit, unit_index }
    }

    pub fn unit_index(&self) -> usize {
        self.unit_index
    }

    pub fn span_to_location(&self, span: Span) -> Location {
        self.unit.location(span)
    }
}
