//! Cost comparison command

use anyhow::Result;
use clap::Args;
use pcore::cost;

/// Compare command arguments
#[derive(Debug, Args)]
pub struct CompareCmd {
    /// Input text to estimate with (defaults to the sample article)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Assumed output length in characters
    #[arg(short, long, default_value_t = 600)]
    pub output_chars: usize,
}

impl CompareCmd {
    /// Print the price table ranked by estimated cost
    pub fn run(&self) -> Result<()> {
        let input = self.input.as_deref().unwrap_or(eval::SAMPLE_ARTICLE);
        let output = "x".repeat(self.output_chars);

        println!("{:<42} {:>12}", "provider/model", "est. cost");
        for (name, total) in cost::compare(input, &output) {
            println!("{name:<42} ${total:>11.6}");
        }
        Ok(())
    }
}
