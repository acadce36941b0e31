//! Chat command

use crate::Config;
use anyhow::Result;
use clap::Args;
use llm::Message;
use pcore::{Agent, Pattern, Router};
use runtime::{Chat, Provider, Runtime};
use std::io::{BufRead, Write};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// Model name override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Wrap the message in a prompt pattern (zero, fewshot, schema, cot)
    #[arg(short, long, value_parser = parse_pattern)]
    pub pattern: Option<Pattern>,

    /// Route each message to a fast or powerful model by complexity
    #[arg(short, long, conflicts_with = "model")]
    pub route: bool,

    /// The message to send (if empty, starts interactive mode)
    pub message: Option<String>,
}

fn parse_pattern(name: &str) -> Result<Pattern, String> {
    Pattern::ALL
        .into_iter()
        .find(|p| p.name() == name)
        .ok_or_else(|| format!("unknown pattern '{name}', expected zero|fewshot|schema|cot"))
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self) -> Result<()> {
        let config = Config::load()?;
        // routing swaps between two models on the same provider, so the
        // runtime is built against the router's fast tier
        let fast = Router::default().fast;
        let model = if self.route {
            Some(fast.as_str())
        } else {
            self.model.as_deref()
        };
        let mut rt = super::build_runtime(&config, model)?;
        rt.add_agent(Agent::new("assistant").system_prompt("You are a helpful assistant."));
        let mut chat = rt.chat("assistant")?;

        if let Some(message) = &self.message {
            self.send(&mut rt, &mut chat, message).await?;
            return Ok(());
        }

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("> ");
            stdout.flush()?;

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                break;
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if input == "/quit" || input == "/exit" {
                break;
            }

            self.send(&mut rt, &mut chat, input).await?;
        }

        Ok(())
    }

    async fn send(&self, rt: &mut Runtime<Provider>, chat: &mut Chat, input: &str) -> Result<()> {
        if self.route {
            let router = Router::default();
            let model = router.route(input).to_owned();
            tracing::debug!("routed to {model}");
            rt.set_model(model);
        }

        let reply = match self.pattern {
            // pattern prompts stand alone, outside the session history
            Some(pattern) => {
                let messages = pattern.messages(input, &eval::sample_examples());
                rt.complete(&messages).await?
            }
            None => rt.send(chat, Message::user(input)).await?,
        };

        println!("{}", reply.content);
        if let Some(cost) = rt.meter().history().last() {
            println!(
                "[{} in, {} out, ${:.6}, {}ms]",
                cost.input_tokens,
                cost.output_tokens,
                cost.total_cost,
                reply.elapsed.as_millis()
            );
        }
        Ok(())
    }
}
