//! Normalized completion replies.

use crate::estimate_tokens;
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    pub completion_tokens: u32,
}

impl Usage {
    /// Total tokens across prompt and completion.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A normalized completion from any provider.
#[derive(Debug, Clone)]
pub struct Reply {
    /// The completion text.
    pub content: String,

    /// The model that produced the completion.
    pub model: String,

    /// Token usage, when the provider reports it.
    pub usage: Option<Usage>,

    /// Wall-clock time of the request.
    pub elapsed: Duration,
}

impl Reply {
    /// Usage as reported by the provider, or estimated from text lengths
    /// with the chars/4 heuristic when the provider omits it.
    pub fn usage_or_estimate(&self, prompt: &[Message]) -> Usage {
        self.usage.unwrap_or(Usage {
            prompt_tokens: estimate_tokens(prompt) as u32,
            completion_tokens: (self.content.len() / 4).max(1) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_total() {
        let usage = Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
        };
        assert_eq!(usage.total(), 15);
    }

    #[test]
    fn estimate_kicks_in_without_usage() {
        let reply = Reply {
            content: "x".repeat(40),
            model: "m".into(),
            usage: None,
            elapsed: Duration::ZERO,
        };
        let prompt = vec![Message::user("y".repeat(80))];
        let usage = reply.usage_or_estimate(&prompt);
        assert_eq!(usage.prompt_tokens, 20);
        assert_eq!(usage.completion_tokens, 10);
    }

    #[test]
    fn reported_usage_wins() {
        let reply = Reply {
            content: "hi".into(),
            model: "m".into(),
            usage: Some(Usage {
                prompt_tokens: 3,
                completion_tokens: 7,
            }),
            elapsed: Duration::ZERO,
        };
        assert_eq!(reply.usage_or_estimate(&[]).completion_tokens, 7);
    }
}
