//! Agent run command

use crate::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use memory::Snapshot;
use runtime::{Auto, Planner, ReAct};
use std::path::PathBuf;

/// Loop architectures.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Arch {
    /// Thought/Action/Observation cycles
    React,
    /// Plan, execute, reflect, re-plan
    Plan,
    /// Budget-bounded autonomous loop
    Auto,
}

/// Run command arguments
#[derive(Debug, Args)]
pub struct RunCmd {
    /// The goal to pursue
    pub goal: String,

    /// Loop architecture
    #[arg(short, long, value_enum, default_value = "react")]
    pub arch: Arch,

    /// Model name override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Dollar spend cap (auto architecture)
    #[arg(short, long, default_value_t = 0.10)]
    pub budget: f64,

    /// Iteration cap override
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Memory snapshot file to load and persist
    #[arg(long)]
    pub memory: Option<PathBuf>,
}

impl RunCmd {
    /// Run the selected agent loop
    pub async fn run(&self) -> Result<()> {
        let config = Config::load()?;
        let mut rt = super::build_runtime(&config, self.model.as_deref())?;
        for (tool, handler) in tools::agent_tools() {
            rt.register(tool, handler);
        }
        if let Some(path) = &self.memory {
            rt.attach_memory(Snapshot::load(path)?);
        }

        let (answer, tools_used): (String, Vec<String>) = match self.arch {
            Arch::React => {
                let driver = ReAct::new(self.max_iter.unwrap_or(10));
                let trace = driver.run(&mut rt, &self.goal).await?;
                println!("{}", serde_json::to_string_pretty(&trace)?);
                let tools = trace.steps.iter().map(|s| s.action.clone()).collect();
                (trace.answer.unwrap_or_else(|| "(no answer)".into()), tools)
            }
            Arch::Plan => {
                let driver = Planner::new(self.max_iter.unwrap_or(2));
                let report = driver.run(&mut rt, &self.goal).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
                let tools = report.results.iter().map(|r| r.tool.clone()).collect();
                (report.reflection.assessment, tools)
            }
            Arch::Auto => {
                let driver = Auto::new(self.budget, self.max_iter.unwrap_or(5));
                let report = driver.run(&mut rt, &self.goal).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
                let tools = report.steps.iter().map(|s| s.tool.clone()).collect();
                (report.assessment.assessment, tools)
            }
        };

        println!(
            "\ntotal cost: ${:.6} over {} calls",
            rt.meter().total(),
            rt.meter().history().len()
        );

        if let Some(snapshot) = rt.memory_mut() {
            snapshot.journal.record(&self.goal, &answer, tools_used);
            snapshot.save()?;
        }
        Ok(())
    }
}
