//! Primer CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

pub use config::Config;

pub mod cmd;
mod config;

/// Primer LLM teaching lab.
#[derive(Debug, Parser)]
#[command(name = "primer", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with an LLM, optionally through a prompt pattern
    Chat(cmd::chat::ChatCmd),

    /// Run an agent loop against a goal
    Run(cmd::run::RunCmd),

    /// Evaluate prompt patterns and write a report
    Eval(cmd::eval::EvalCmd),

    /// Compare estimated costs across the price table
    Compare(cmd::compare::CompareCmd),

    /// Inspect or clear a memory snapshot
    Memory(cmd::memory::MemoryCmd),

    /// Manage the configuration file
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: cmd::config::ConfigCommand,
    },
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "primer=debug",
                2 => "primer=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .init();
    }

    /// Execute the selected command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Chat(cmd) => cmd.run().await,
            Command::Run(cmd) => cmd.run().await,
            Command::Eval(cmd) => cmd.run().await,
            Command::Compare(cmd) => cmd.run(),
            Command::Memory(cmd) => cmd.run(),
            Command::Config { action } => action.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        App::command().debug_assert();
    }

    #[test]
    fn parses_run_command() {
        let app = App::parse_from([
            "primer", "run", "find populations", "--arch", "react", "--max-iter", "3",
        ]);
        let Command::Run(cmd) = app.command else {
            panic!("expected run command");
        };
        assert_eq!(cmd.goal, "find populations");
        assert_eq!(cmd.max_iter, Some(3));
    }

    #[test]
    fn verbose_flag_counts() {
        let app = App::parse_from(["primer", "-vv", "compare"]);
        assert_eq!(app.verbose, 2);
    }
}
