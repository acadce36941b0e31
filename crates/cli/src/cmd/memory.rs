//! Memory snapshot command

use anyhow::Result;
use clap::{Args, Subcommand};
use memory::{Memory, Snapshot};
use std::path::PathBuf;

/// Memory command arguments
#[derive(Debug, Args)]
pub struct MemoryCmd {
    /// Snapshot file
    #[arg(short, long, default_value = "memory.json")]
    pub file: PathBuf,

    /// Memory subcommand
    #[command(subcommand)]
    pub action: MemoryAction,
}

/// Memory subcommands
#[derive(Debug, Subcommand)]
pub enum MemoryAction {
    /// Show stored facts and journal statistics
    Show,
    /// Search journal turns by keyword
    Search {
        /// Keyword to match against questions and answers
        keyword: String,
    },
    /// Delete all facts and turns
    Clear,
}

impl MemoryCmd {
    /// Run the memory command
    pub fn run(&self) -> Result<()> {
        let mut snapshot = Snapshot::load(&self.file)?;

        match &self.action {
            MemoryAction::Show => {
                if snapshot.facts.is_empty() {
                    println!("no facts stored");
                } else {
                    println!("facts:");
                    for (key, value) in snapshot.facts.entries() {
                        println!("  {key}: {value}");
                    }
                }

                let stats = snapshot.journal.stats();
                println!("turns: {}", stats.total_turns);
                for (tool, count) in &stats.most_used_tools {
                    println!("  {tool}: {count} uses");
                }
            }
            MemoryAction::Search { keyword } => {
                let hits = snapshot.journal.search(keyword);
                if hits.is_empty() {
                    println!("no turns match '{keyword}'");
                }
                for turn in hits {
                    println!("[{}] Q: {}", turn.timestamp.format("%Y-%m-%d %H:%M"), turn.question);
                    println!("    A: {}", turn.answer);
                }
            }
            MemoryAction::Clear => {
                snapshot.clear();
                snapshot.save()?;
                println!("memory cleared: {}", self.file.display());
            }
        }
        Ok(())
    }
}
