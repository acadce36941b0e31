//! Per-request parameters.

use serde::{Deserialize, Serialize};

/// Request parameters shared by every provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Params {
    /// The model to use.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Completion token limit.
    pub max_tokens: u32,
}

impl Params {
    /// Create parameters for the given model with default knobs.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let params = Params::new("claude-3-haiku-20240307")
            .temperature(0.0)
            .max_tokens(256);
        assert_eq!(params.model, "claude-3-haiku-20240307");
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, 256);
    }

    #[test]
    fn defaults_match_lab_settings() {
        let params = Params::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_tokens, 1000);
    }
}
