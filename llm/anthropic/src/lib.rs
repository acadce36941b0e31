//! Anthropic LLM provider.
//!
//! Speaks the messages API directly. Unlike the OpenAI-compatible wire
//! format, the system prompt travels as a top-level field, so a leading
//! system message is lifted out of the message list before sending.

use llm::reqwest::{Client, header::HeaderMap};
pub use request::{Request, Response};

mod provider;
mod request;

/// The messages API endpoint.
pub const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// The API version header value.
pub const VERSION: &str = "2023-06-01";

/// The Anthropic LLM provider.
#[derive(Clone)]
pub struct Anthropic {
    /// The HTTP client.
    pub client: Client,
    /// Request headers (api key, version, content-type).
    headers: HeaderMap,
}

impl Anthropic {
    /// Create a provider with the given API key.
    pub fn api(client: Client, key: &str) -> anyhow::Result<Self> {
        use llm::reqwest::header;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
        headers.insert("x-api-key", key.parse()?);
        headers.insert("anthropic-version", VERSION.parse()?);
        Ok(Self { client, headers })
    }
}
