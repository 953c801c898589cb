//! AstVisitor trait for the node kinds the scanner inspects.

use std::ops::ControlFlow;

use swc_ecma_ast::{AssignExpr, CallExpr, MemberExpr};

use super::context::VisitorContext;

pub trait AstVisitor {
    /// A member expression in read position.
    fn visit_member_expr(&mut self, _node: &MemberExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The member expression on the left of an assignment. The walker does not
    /// pass the same member to `visit_member_expr` again.
    fn visit_member_assign(
        &mut self,
        _target: &MemberExpr,
        _assign: &AssignExpr,
        _ctx: &VisitorContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_call_expr(&mut self, _node: &CallExpr, _ctx: &VisitorContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
