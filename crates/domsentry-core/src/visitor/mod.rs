//! Visitor pattern for AST traversal.
//!
//! Provides a uniform way to traverse a parsed unit with context information.
//! Nodes are reported in pre-order: a node is handed to the visitor before any
//! of its children.

mod context;
mod traits;

pub use context::VisitorContext;
pub use traits::AstVisitor;

use std::ops::ControlFlow;

use swc_ecma_ast::{AssignTarget, Expr, MemberExpr, Program, SimpleAssignTarget};
use swc_ecma_visit::{Visit, VisitWith};

use crate::syntax::unwrap_parens;

struct Walker<'a, V: AstVisitor> {
    visitor: &'a mut V,
    ctx: &'a VisitorContext<'a>,
    stopped: bool,
}

impl<V: AstVisitor> Visit for Walker<'_, V> {
    fn visit_member_expr(&mut self, node: &swc_ecma_ast::MemberExpr) {
        if self.stopped {
            return;
        }
        if let ControlFlow::Break(()) = self.visitor.visit_member_expr(node, self.ctx) {
            self.stopped = true;
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &swc_ecma_ast::AssignExpr) {
        if self.stopped {
            return;
        }
        let Some(target) = member_target(&node.left) else {
            node.visit_children_with(self);
            return;
        };
        if let ControlFlow::Break(()) = self.visitor.visit_member_assign(target, node, self.ctx) {
            self.stopped = true;
            return;
        }
        // The target itself was reported as an assignment; only its parts are
        // walked as reads.
        target.obj.visit_with(self);
        target.prop.visit_with(self);
        node.right.visit_with(self);
    }

    fn visit_call_expr(&mut self, node: &swc_ecma_ast::CallExpr) {
        if self.stopped {
            return;
        }
        if let ControlFlow::Break(()) = self.visitor.visit_call_expr(node, self.ctx) {
            self.stopped = true;
            return;
        }
        node.visit_children_with(self);
    }
}

/// The member written by an assignment, looking through `(a.b) = c`.
fn member_target(target: &AssignTarget) -> Option<&MemberExpr> {
    match target {
        AssignTarget::Simple(SimpleAssignTarget::Member(member)) => Some(member),
        AssignTarget::Simple(SimpleAssignTarget::Paren(paren)) => match unwrap_parens(&paren.expr) {
            Expr::Member(member) => Some(member),
            _ => None,
        },
        _ => None,
    }
}

pub fn walk_program<V: AstVisitor>(program: &Program, visitor: &mut V, ctx: &VisitorContext) {
    let mut walker = Walker {
        visitor,
        ctx,
        stopped: false,
    };
    program.visit_with(&mut walker);
}
