//! Rule evaluation for a single node
//!
//! [`match_node`] is a pure function of one node and the rule list. Findings
//! come out in rule-list order; two rules firing on the same node produce two
//! findings.

use crate::finding::{Finding, FindingKind};
use crate::rules::{Rule, RuleKind};
use crate::syntax::{CalleeKind, MemberShape, SyntaxNode};

const ELEMENT_OBJECT_PREFIX: &str = "element";
const EVENT_HANDLER_PREFIX: &str = "on";

pub fn match_node(node: &SyntaxNode, rules: &[Rule]) -> Vec<Finding> {
    match node {
        SyntaxNode::PropertyAccess(shape) => match_member(shape, FindingKind::Access, rules),
        SyntaxNode::PropertyAssignment(shape) => {
            match_member(shape, FindingKind::Assignment, rules)
        }
        SyntaxNode::Call {
            callee_kind,
            callee_name,
            location,
        } => {
            let Some(name) = callee_name.as_deref() else {
                return Vec::new();
            };

            match callee_kind {
                CalleeKind::PlainIdentifier => rules
                    .iter()
                    .filter(|rule| {
                        matches!(rule.kind(), RuleKind::BareName | RuleKind::DottedExact)
                            && rule.text() == name
                    })
                    .map(|rule| {
                        Finding::new(
                            rule.text(),
                            FindingKind::Call,
                            *location,
                            format!("{}()", name),
                        )
                    })
                    .collect(),
                CalleeKind::MethodOnExpression => rules
                    .iter()
                    .filter(|rule| rule.text() == name)
                    .map(|rule| {
                        Finding::new(
                            rule.text(),
                            FindingKind::MethodCall,
                            *location,
                            format!(".{}()", name),
                        )
                    })
                    .collect(),
            }
        }
    }
}

fn match_member(shape: &MemberShape, kind: FindingKind, rules: &[Rule]) -> Vec<Finding> {
    let Some(property) = shape.property_name.as_deref() else {
        return Vec::new();
    };

    let qualified = shape.qualified_name();
    let on_element = qualified
        .as_deref()
        .is_some_and(|name| name.starts_with(ELEMENT_OBJECT_PREFIX));

    rules
        .iter()
        .filter(|rule| match rule.kind() {
            RuleKind::ElementWildcard => on_element && property.starts_with(EVENT_HANDLER_PREFIX),
            RuleKind::ElementExact { property: expected } => on_element && property == expected,
            RuleKind::DottedExact | RuleKind::BareName => {
                property == rule.text() || qualified.as_deref() == Some(rule.text())
            }
        })
        .map(|rule| Finding::new(rule.text(), kind, shape.location, shape.display()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_rules;
    use crate::syntax::Location;

    fn access(object: Option<&str>, property: Option<&str>) -> SyntaxNode {
        SyntaxNode::PropertyAccess(MemberShape::new(object, property, Location::new(1, 0)))
    }

    fn assignment(object: Option<&str>, property: Option<&str>) -> SyntaxNode {
        SyntaxNode::PropertyAssignment(MemberShape::new(object, property, Location::new(1, 0)))
    }

    fn call(kind: CalleeKind, name: &str) -> SyntaxNode {
        SyntaxNode::Call {
            callee_kind: kind,
            callee_name: Some(name.to_string()),
            location: Location::new(1, 0),
        }
    }

    fn matched_rules(node: &SyntaxNode, rules: &[&str]) -> Vec<String> {
        match_node(node, &parse_rules(rules.iter().copied()))
            .into_iter()
            .map(|f| f.rule_text)
            .collect()
    }

    #[test]
    fn element_exact_matches_property_on_element() {
        let node = access(Some("element"), Some("innerHTML"));

        let findings = match_node(&node, &parse_rules(["element.innerHTML"]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Access);
        assert_eq!(findings[0].matched_expression, "element.innerHTML");
    }

    #[test]
    fn element_exact_ignores_other_properties() {
        let node = access(Some("element"), Some("outerHTML"));

        assert!(matched_rules(&node, &["element.innerHTML"]).is_empty());
    }

    #[test]
    fn element_exact_accepts_any_element_prefixed_object() {
        let node = access(Some("elementRef"), Some("innerHTML"));

        assert_eq!(
            matched_rules(&node, &["element.innerHTML"]),
            vec!["element.innerHTML"]
        );
    }

    #[test]
    fn element_rules_need_element_object() {
        let node = access(Some("div"), Some("innerHTML"));

        assert!(matched_rules(&node, &["element.innerHTML", "element.onevent"]).is_empty());
    }

    #[test]
    fn wildcard_matches_event_handler_properties() {
        let rules = ["element.onevent"];

        assert_eq!(
            matched_rules(&access(Some("element"), Some("onclick")), &rules),
            vec!["element.onevent"]
        );
        assert_eq!(
            matched_rules(&access(Some("element"), Some("onload")), &rules),
            vec!["element.onevent"]
        );
    }

    #[test]
    fn wildcard_checks_property_prefix_not_object() {
        let rules = ["element.onevent"];

        assert!(matched_rules(&access(Some("onclickHandler"), Some("value")), &rules).is_empty());
        assert!(matched_rules(&access(Some("window"), Some("onclick")), &rules).is_empty());
    }

    #[test]
    fn wildcard_needs_resolved_object() {
        let node = access(None, Some("onclick"));

        assert!(matched_rules(&node, &["element.onevent"]).is_empty());
    }

    #[test]
    fn dotted_rule_matches_qualified_access() {
        let node = access(Some("document"), Some("cookie"));

        assert_eq!(
            matched_rules(&node, &["document.cookie"]),
            vec!["document.cookie"]
        );
    }

    #[test]
    fn dotted_rule_needs_named_object() {
        let node = access(None, Some("cookie"));

        assert!(matched_rules(&node, &["document.cookie"]).is_empty());
    }

    #[test]
    fn bare_name_matches_property_on_any_object() {
        let rules = ["innerHTML"];

        assert_eq!(
            matched_rules(&access(Some("div"), Some("innerHTML")), &rules),
            vec!["innerHTML"]
        );
        assert_eq!(
            matched_rules(&access(None, Some("innerHTML")), &rules),
            vec!["innerHTML"]
        );
    }

    #[test]
    fn unresolved_property_never_matches() {
        let node = access(Some("element"), None);

        assert!(
            matched_rules(&node, &["element.onevent", "element", "innerHTML"]).is_empty()
        );
    }

    #[test]
    fn assignment_uses_assignment_kind() {
        let node = assignment(Some("element"), Some("onclick"));

        let findings = match_node(&node, &parse_rules(["element.onevent"]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Assignment);
    }

    #[test]
    fn one_node_can_match_several_rules_in_rule_order() {
        let node = access(Some("element"), Some("innerHTML"));

        let matched = matched_rules(
            &node,
            &["innerHTML", "element.onevent", "element.innerHTML"],
        );

        assert_eq!(matched, vec!["innerHTML", "element.innerHTML"]);
    }

    #[test]
    fn bare_name_matches_plain_call() {
        let node = call(CalleeKind::PlainIdentifier, "eval");

        let findings = match_node(&node, &parse_rules(["eval"]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Call);
        assert_eq!(findings[0].matched_expression, "eval()");
    }

    #[test]
    fn plain_call_ignores_element_rules() {
        let node = call(CalleeKind::PlainIdentifier, "element");

        assert!(matched_rules(&node, &["element.onevent", "element.click"]).is_empty());
    }

    #[test]
    fn bare_name_matches_method_call() {
        let node = call(CalleeKind::MethodOnExpression, "eval");

        let findings = match_node(&node, &parse_rules(["eval"]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::MethodCall);
        assert_eq!(findings[0].matched_expression, ".eval()");
    }

    #[test]
    fn dotted_rule_does_not_match_method_name() {
        let node = call(CalleeKind::MethodOnExpression, "log");

        assert!(matched_rules(&node, &["console.log"]).is_empty());
    }

    #[test]
    fn unresolved_method_name_never_matches() {
        let node = SyntaxNode::Call {
            callee_kind: CalleeKind::MethodOnExpression,
            callee_name: None,
            location: Location::new(1, 0),
        };

        assert!(matched_rules(&node, &["html"]).is_empty());
    }

    #[test]
    fn empty_rule_list_matches_nothing() {
        let node = access(Some("document"), Some("cookie"));

        assert!(match_node(&node, &[]).is_empty());
    }

    #[test]
    fn finding_carries_node_location() {
        let node = SyntaxNode::PropertyAccess(MemberShape::new(
            Some("document"),
            Some("cookie"),
            Location::new(7, 12),
        ));

        let findings = match_node(&node, &parse_rules(["document.cookie"]));

        assert_eq!((findings[0].line, findings[0].column), (7, 12));
    }
}
