//! domsentry CLI - scans JavaScript and HTML for risky DOM API usage
//!
//! Matches every member access, member assignment and call against a list of
//! textual rules and reports where they occur.

mod commands;
mod logging;
mod output;
mod source;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use commands::Commands;
use logging::{LogLevel, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "domsentry",
    author,
    version,
    about = "Rule-driven scanner for risky DOM and JavaScript API usage",
    long_about = "domsentry parses a JavaScript file, or every <script> element of an HTML page,\n\
                  and reports each property access, assignment and call matching a rule from\n\
                  a plain-text rules file."
)]
pub struct Cli {
    #[arg(
        long,
        value_enum,
        default_value = "warn",
        global = true,
        help = "Set the log level"
    )]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_json);

    match cli.command.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
