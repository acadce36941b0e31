//! Config command

use crate::Config;
use anyhow::Result;
use clap::Subcommand;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write the default configuration file
    Generate,
    /// Show the resolved configuration
    Show,
}

impl ConfigCommand {
    /// Run the config command
    pub fn run(&self) -> Result<()> {
        match self {
            ConfigCommand::Generate => {
                let path = Config::path();
                if path.exists() {
                    anyhow::bail!("config already exists at {}", path.display());
                }
                Config::default().save()?;
                println!("config written to {}", path.display());
            }
            ConfigCommand::Show => {
                let config = Config::load()?;
                print!("{}", toml::to_string(&config)?);
            }
        }
        Ok(())
    }
}
