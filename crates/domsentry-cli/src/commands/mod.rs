//! CLI command implementations

pub mod explain;
pub mod init;
pub mod scan;

pub use explain::ExplainArgs;
pub use init::InitArgs;
pub use scan::ScanArgs;

use std::process::ExitCode;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a JavaScript file or HTML page for risky API usage
    Scan(ScanArgs),

    /// Write a starter configuration and rules file in the current directory
    Init(InitArgs),

    /// Show how a rule pattern is classified and what it matches
    Explain(ExplainArgs),
}

impl Commands {
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Scan(args) => args.run(),
            Commands::Init(args) => args.run().map(|()| ExitCode::SUCCESS),
            Commands::Explain(args) => args.run().map(|()| ExitCode::SUCCESS),
        }
    }
}
