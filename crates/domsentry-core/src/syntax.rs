//! Matchable node shapes
//!
//! The matcher never looks at the swc tree directly. Member reads, member
//! writes and calls are adapted into [`SyntaxNode`] values first, which keeps
//! rule evaluation independent of the concrete parser.

use serde::Serialize;
use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, MemberExpr, MemberProp};

/// Start position of a node: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Names extracted from `object.property` or `object[key]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberShape {
    /// Set only when the object is a plain identifier.
    pub object_name: Option<String>,
    /// Identifier name, or the text of a literal computed key.
    pub property_name: Option<String>,
    pub is_computed: bool,
    pub location: Location,
}

impl MemberShape {
    pub fn new(object_name: Option<&str>, property_name: Option<&str>, location: Location) -> Self {
        Self {
            object_name: object_name.map(str::to_string),
            property_name: property_name.map(str::to_string),
            is_computed: false,
            location,
        }
    }

    pub fn from_member(member: &MemberExpr, location: Location) -> Self {
        Self {
            object_name: extract_object_name(&member.obj),
            property_name: extract_property_name(&member.prop),
            is_computed: matches!(member.prop, MemberProp::Computed(_)),
            location,
        }
    }

    /// `object.property`, available only when both names resolved.
    pub fn qualified_name(&self) -> Option<String> {
        let object = self.object_name.as_deref()?;
        let property = self.property_name.as_deref()?;
        Some(format!("{}.{}", object, property))
    }

    /// Text used in reports; an unnamed object is shown as `<expr>`.
    pub fn display(&self) -> String {
        let object = self.object_name.as_deref().unwrap_or("<expr>");
        let property = self.property_name.as_deref().unwrap_or_default();
        format!("{}.{}", object, property)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalleeKind {
    /// `name(...)`
    PlainIdentifier,
    /// `<expr>.name(...)`
    MethodOnExpression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    PropertyAccess(MemberShape),
    PropertyAssignment(MemberShape),
    Call {
        callee_kind: CalleeKind,
        callee_name: Option<String>,
        location: Location,
    },
}

impl SyntaxNode {
    /// Adapts a call. Calls whose callee is neither an identifier nor a
    /// member expression (`super()`, `import()`, `(f || g)()`) are ignored.
    pub fn from_call(call: &CallExpr, location: Location) -> Option<Self> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };

        match unwrap_parens(callee) {
            Expr::Ident(ident) => Some(SyntaxNode::Call {
                callee_kind: CalleeKind::PlainIdentifier,
                callee_name: Some(ident.sym.to_string()),
                location,
            }),
            Expr::Member(member) => Some(SyntaxNode::Call {
                callee_kind: CalleeKind::MethodOnExpression,
                callee_name: extract_property_name(&member.prop),
                location,
            }),
            _ => None,
        }
    }
}

/// Name of the object of a member expression. Only bare identifiers have one;
/// `this`, nested members and call results do not.
pub fn extract_object_name(obj: &Expr) -> Option<String> {
    match unwrap_parens(obj) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

/// Name of the accessed member. Non-literal computed keys and private names
/// have none.
pub fn extract_property_name(prop: &MemberProp) -> Option<String> {
    match prop {
        MemberProp::Ident(ident) => Some(ident.sym.to_string()),
        MemberProp::Computed(computed) => match computed.expr.as_ref() {
            Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
            Expr::Lit(Lit::Num(n)) => Some(number_to_js_string(n.value)),
            _ => None,
        },
        MemberProp::PrivateName(_) => None,
    }
}

/// Strips any number of grouping parentheses: `((a.b))` is `a.b`.
pub fn unwrap_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// Formats a number the way JavaScript converts it to a property key, so
/// `a[1e21]` is `1e+21` and `a[0x10]` is `16`.
fn number_to_js_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // Shortest round-trip digits, e.g. `1.2345e2`.
    let exp_form = format!("{:e}", value.abs());
    let (mantissa, exponent) = exp_form.split_once('e').unwrap_or((exp_form.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if n - 1 >= 0 { "+" } else { "-" };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, (n - 1).abs())
        }
    };

    format!("{}{}", sign, body)
}
