//! The LLM implementation.

use crate::{Anthropic, ENDPOINT, Request, Response};
use anyhow::{Context, Result};
use llm::{Client, LLM, Message, Params, Reply};
use std::time::Instant;

impl LLM for Anthropic {
    fn new(client: Client, key: &str) -> Result<Self> {
        Self::api(client, key)
    }

    async fn send(&self, params: &Params, messages: &[Message]) -> Result<Reply> {
        let body = Request::new(params, messages);
        tracing::debug!("request: {}", serde_json::to_string(&body)?);

        let start = Instant::now();
        let response = self
            .client
            .post(ENDPOINT)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .context("anthropic request failed")?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("response: {text}");
        if !status.is_success() {
            anyhow::bail!("anthropic api error ({status}): {text}");
        }

        let parsed: Response = serde_json::from_str(&text)
            .with_context(|| format!("unexpected anthropic response: {text}"))?;
        let content = parsed
            .text()
            .context("anthropic response contained no content")?
            .to_owned();

        Ok(Reply {
            content,
            model: parsed.model.clone(),
            usage: parsed.usage(),
            elapsed: start.elapsed(),
        })
    }
}
