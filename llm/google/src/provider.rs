//! The LLM implementation.

use crate::{Google, Request, Response};
use anyhow::{Context, Result};
use llm::{Client, LLM, Message, Params, Reply};
use std::time::Instant;

impl LLM for Google {
    fn new(client: Client, key: &str) -> Result<Self> {
        Self::api(client, key)
    }

    async fn send(&self, params: &Params, messages: &[Message]) -> Result<Reply> {
        let body = Request::new(params, messages);
        tracing::debug!("request: {}", serde_json::to_string(&body)?);

        let start = Instant::now();
        let response = self
            .client
            .post(self.url(&params.model))
            .json(&body)
            .send()
            .await
            .context("google request failed")?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("response: {text}");
        if !status.is_success() {
            anyhow::bail!("google api error ({status}): {text}");
        }

        let parsed: Response = serde_json::from_str(&text)
            .with_context(|| format!("unexpected google response: {text}"))?;
        let content = parsed
            .text()
            .context("google response contained no candidates")?;

        Ok(Reply {
            content,
            model: params.model.clone(),
            usage: parsed.usage(),
            elapsed: start.elapsed(),
        })
    }
}
