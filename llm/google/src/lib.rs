//! Google Gemini LLM provider.
//!
//! Speaks the `generateContent` API directly. The model name is part of
//! the URL and the API key travels as a query parameter, so the provider
//! keeps the key instead of a prepared header map.

use llm::reqwest::Client;
pub use request::{Request, Response};

mod provider;
mod request;

/// Base URL for the generative language API.
pub const BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The Google Gemini LLM provider.
#[derive(Clone)]
pub struct Google {
    /// The HTTP client.
    pub client: Client,
    /// The API key, appended to request URLs.
    key: String,
}

impl Google {
    /// Create a provider with the given API key.
    pub fn api(client: Client, key: &str) -> anyhow::Result<Self> {
        anyhow::ensure!(!key.is_empty(), "google api key must not be empty");
        Ok(Self {
            client,
            key: key.to_owned(),
        })
    }

    /// The generateContent URL for a model.
    pub fn url(&self, model: &str) -> String {
        format!("{BASE}/{model}:generateContent?key={}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_embeds_model_and_key() {
        let google = Google::api(Client::new(), "k123").unwrap();
        assert_eq!(
            google.url("gemini-2.0-flash-exp"),
            format!("{BASE}/gemini-2.0-flash-exp:generateContent?key=k123")
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(Google::api(Client::new(), "").is_err());
    }
}
