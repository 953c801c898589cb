//! Scan command - checks one file or page against a rules file

use crate::output::OutputFormat;
use crate::output::json::JsonFormatter;
use crate::output::text;
use crate::source::{self, FetchOptions, SourceLocation};
use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use colored::Colorize;
use domsentry_core::config::{CONFIG_FILENAME, ConfigResult, load_config_or_default_with_warnings};
use domsentry_core::parser::Parser;
use domsentry_core::rules::{load_rules_file, parse_rules};
use domsentry_core::{Rule, ScanSession};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "url"])))]
pub struct ScanArgs {
    /// JavaScript or HTML file to scan
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// URL of a page or script to fetch and scan
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Rules file with one pattern per line
    #[arg(short, long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with code 1 when any rule matches
    #[arg(long)]
    pub fail_on_match: bool,

    /// Scan script units one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Parse scripts without JSX support
    #[arg(long)]
    pub no_jsx: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl ScanArgs {
    pub fn run(&self) -> Result<ExitCode> {
        self.configure_colors();

        let cwd = env::current_dir()?;
        let config_result = load_config_or_default_with_warnings(&cwd)?;
        for warning in &config_result.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }

        let rules = self.load_rules(&config_result)?;
        let location = self.location()?;
        let options = FetchOptions::from(&config_result.config.fetch);

        let source = source::load(&location, &options)
            .with_context(|| format!("Failed to load {}", location))?;
        let units = source.source_set();
        info!(
            source = %location,
            markup = source.is_markup,
            units = units.units.len(),
            rules = rules.len(),
            "starting scan"
        );

        let parser = Parser::builder().jsx(!self.no_jsx).build();
        let session = ScanSession::new(rules).with_parser(parser);
        let report = if self.sequential {
            session.scan(&units)
        } else {
            session.scan_parallel(&units)
        };

        match self.format {
            OutputFormat::Text => text::print_report(&report),
            OutputFormat::Json => {
                let formatter = JsonFormatter::new(&source.origin, session.rules().len());
                println!("{}", formatter.format(&report))
            }
        }

        if self.fail_on_match && report.any_match() {
            return Ok(ExitCode::FAILURE);
        }

        Ok(ExitCode::SUCCESS)
    }

    /// Rules from `--rules` (or the configured file) followed by configured
    /// inline patterns.
    fn load_rules(&self, config: &ConfigResult) -> Result<Vec<Rule>> {
        let file = self.rules.clone().or_else(|| config.rules_file());
        let patterns = &config.config.rules.patterns;

        if file.is_none() && patterns.is_empty() {
            anyhow::bail!(
                "No rules given. Pass --rules <PATH> or set [rules] file in {}",
                CONFIG_FILENAME
            );
        }

        let mut rules = match file {
            Some(path) => load_rules_file(&path)?,
            None => Vec::new(),
        };
        rules.extend(parse_rules(patterns));

        Ok(rules)
    }

    fn location(&self) -> Result<SourceLocation> {
        match (&self.file, &self.url) {
            (Some(path), _) => Ok(SourceLocation::File(path.clone())),
            (None, Some(url)) => Ok(SourceLocation::Url(url.clone())),
            (None, None) => anyhow::bail!("Please provide a file path or URL to scan"),
        }
    }

    fn configure_colors(&self) {
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        if self.no_color || no_color_env {
            colored::control::set_override(false);
        }
    }
}
