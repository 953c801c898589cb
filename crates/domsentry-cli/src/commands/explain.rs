//! Explain command - shows how a rule line is classified

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use domsentry_core::{Rule, RuleKind};

#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[arg(
        value_name = "PATTERN",
        help = "Rule pattern to explain (e.g., \"element.onevent\", \"eval\")"
    )]
    pub pattern: String,
}

impl ExplainArgs {
    pub fn run(&self) -> Result<()> {
        let Some(rule) = Rule::parse(&self.pattern) else {
            anyhow::bail!("Rule pattern is empty");
        };

        println!();
        println!("{}", format!("Rule {}", rule.text()).bold());
        println!();
        for (label, value) in explain(&rule) {
            println!("  {}: {}", label.cyan(), value);
        }
        println!();

        Ok(())
    }
}

fn explain(rule: &Rule) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Strategy", rule.kind().name().to_string()),
        ("Matches", rule.describe()),
    ];

    let example = match rule.kind() {
        RuleKind::ElementWildcard => "element.onclick = handler;".to_string(),
        RuleKind::ElementExact { property } => format!("element.{} = value;", property),
        RuleKind::DottedExact => format!("{};", rule.text()),
        RuleKind::BareName => format!("{0}(input); obj.{0}(input);", rule.text()),
    };
    lines.push(("Example", example));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain_pattern(pattern: &str) -> Vec<(&'static str, String)> {
        explain(&Rule::parse(pattern).unwrap())
    }

    #[test]
    fn explains_wildcard_rule() {
        let lines = explain_pattern("element.onevent");

        assert_eq!(lines[0], ("Strategy", "element-wildcard".to_string()));
        assert!(lines[1].1.contains("`on`"));
    }

    #[test]
    fn explains_element_exact_rule() {
        let lines = explain_pattern("element.innerHTML");

        assert_eq!(lines[0].1, "element-exact");
        assert_eq!(lines[2], ("Example", "element.innerHTML = value;".to_string()));
    }

    #[test]
    fn explains_dotted_rule() {
        let lines = explain_pattern("document.cookie");

        assert_eq!(lines[0].1, "dotted-exact");
    }

    #[test]
    fn explains_bare_name_rule() {
        let lines = explain_pattern("  eval ");

        assert_eq!(lines[0].1, "bare-name");
        assert_eq!(lines[2].1, "eval(input); obj.eval(input);");
    }

    #[test]
    fn blank_pattern_is_an_error() {
        let args = ExplainArgs {
            pattern: "   ".to_string(),
        };

        assert!(args.run().is_err());
    }
}
