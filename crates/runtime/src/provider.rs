//! Provider enum for static dispatch over LLM implementations.

use anthropic::Anthropic;
use anyhow::Result;
use google::Google;
use llm::{Client, LLM, Message, Params, Reply};
use openai::OpenAi;

/// Unified LLM provider (static dispatch, no dyn).
#[derive(Clone)]
pub enum Provider {
    /// OpenAI chat completions.
    OpenAi(OpenAi),
    /// Anthropic messages API.
    Anthropic(Anthropic),
    /// Google Gemini generateContent.
    Google(Google),
}

impl Provider {
    /// Create a provider from a model name.
    pub fn new(model: &str, client: Client, key: &str) -> Result<Self> {
        match provider_name(model) {
            Some("openai") => Ok(Self::OpenAi(OpenAi::api(client, key)?)),
            Some("anthropic") => Ok(Self::Anthropic(Anthropic::api(client, key)?)),
            Some("google") => Ok(Self::Google(Google::api(client, key)?)),
            _ => anyhow::bail!("unknown provider for model: {model}"),
        }
    }

    /// The provider name used in the price table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::Anthropic(_) => "anthropic",
            Self::Google(_) => "google",
        }
    }

    /// Context window limit for the current provider.
    pub fn context_limit(&self) -> usize {
        match self {
            Self::OpenAi(_) => 128_000,
            Self::Anthropic(_) => 200_000,
            Self::Google(_) => 1_000_000,
        }
    }
}

/// Map a model name to its provider name by prefix.
pub fn provider_name(model: &str) -> Option<&'static str> {
    pcore::billing_provider(model)
}

impl LLM for Provider {
    fn new(client: Client, key: &str) -> Result<Self> {
        Ok(Self::OpenAi(OpenAi::api(client, key)?))
    }

    async fn send(&self, params: &Params, messages: &[Message]) -> Result<Reply> {
        match self {
            Self::OpenAi(p) => p.send(params, messages).await,
            Self::Anthropic(p) => p.send(params, messages).await,
            Self::Google(p) => p.send(params, messages).await,
        }
    }
}
