//! Subcommand implementations.

pub mod chat;
pub mod compare;
pub mod config;
pub mod eval;
pub mod memory;
pub mod run;

use crate::Config;
use anyhow::Result;
use llm::{Client, Params};
use runtime::{Provider, Runtime, provider_name};

/// Build a runtime for a model, resolving the API key from the config.
pub(crate) fn build_runtime(config: &Config, model: Option<&str>) -> Result<Runtime<Provider>> {
    let mut params = config.params.clone();
    if let Some(model) = model {
        params.model = model.to_owned();
    }

    let provider_key = provider_name(&params.model)
        .ok_or_else(|| anyhow::anyhow!("unknown provider for model: {}", params.model))?;
    let key = config.key_for(provider_key)?;
    let provider = Provider::new(&params.model, Client::new(), &key)?;
    Ok(Runtime::new(params, provider))
}
