//! Init command - writes a starter configuration and rules file

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use domsentry_core::config::{CONFIG_FILENAME, STARTER_CONFIG, STARTER_RULES, STARTER_RULES_FILENAME};
use std::fs;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(&self) -> Result<()> {
        let files = [
            (CONFIG_FILENAME, STARTER_CONFIG),
            (STARTER_RULES_FILENAME, STARTER_RULES),
        ];

        if !self.force {
            for (name, _) in &files {
                if Path::new(name).exists() {
                    anyhow::bail!("'{}' already exists. Use --force to overwrite.", name);
                }
            }
        }

        for (name, content) in &files {
            fs::write(name, content).with_context(|| format!("Failed to write '{}'", name))?;
            println!("{} Created {}", "✓".green().bold(), name.cyan());
        }

        Ok(())
    }
}
