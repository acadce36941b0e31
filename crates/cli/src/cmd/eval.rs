//! Pattern evaluation command

use crate::Config;
use anyhow::Result;
use clap::Args;
use eval::Evaluator;
use std::path::PathBuf;

/// Eval command arguments
#[derive(Debug, Args)]
pub struct EvalCmd {
    /// Model name override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Where to write the JSON report
    #[arg(short, long, default_value = "report.json")]
    pub out: PathBuf,
}

impl EvalCmd {
    /// Run the evaluation and write the report
    pub async fn run(&self) -> Result<()> {
        let config = Config::load()?;
        let rt = super::build_runtime(&config, self.model.as_deref())?;

        // the evaluator drives the provider directly, one call per pattern
        let report = Evaluator::default().run(rt.provider(), rt.params()).await;

        println!("{:<10} {:>6} {:>10} {:>8}", "pattern", "score", "cost", "time");
        for result in &report.results {
            match &result.error {
                Some(err) => println!("{:<10} failed: {err}", result.pattern.name()),
                None => println!(
                    "{:<10} {:>6.2} {:>9.6}$ {:>6}ms",
                    result.pattern.name(),
                    result.score,
                    result.cost.total_cost,
                    result.elapsed_ms
                ),
            }
        }
        if let Some(best) = report.summary.best_pattern {
            println!("\nbest pattern: {}", best.name());
        }
        println!("total cost: ${:.6}", report.summary.total_cost);

        report.save(&self.out)?;
        println!("report written to {}", self.out.display());
        Ok(())
    }
}
