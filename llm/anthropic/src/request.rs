//! Wire format for the Anthropic messages API.

use llm::{Message, Params, Role, Usage};
use serde::{Deserialize, Serialize};

/// The request body for the messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model we are using.
    pub model: String,

    /// The maximum number of tokens to generate.
    pub max_tokens: u32,

    /// The temperature to use for the response.
    pub temperature: f32,

    /// The system prompt, lifted out of the message list.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub system: String,

    /// The user/assistant turns.
    pub messages: Vec<Message>,
}

impl Request {
    /// Build a request from parameters and a message list.
    ///
    /// A leading system message becomes the top-level `system` field;
    /// the API rejects `system` roles inside `messages`.
    pub fn new(params: &Params, messages: &[Message]) -> Self {
        let (system, turns) = match messages.first() {
            Some(first) if first.role == Role::System => {
                (first.content.clone(), messages[1..].to_vec())
            }
            _ => (String::new(), messages.to_vec()),
        };

        Self {
            model: params.model.clone(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system,
            messages: turns,
        }
    }
}

/// The response body of the messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// The model used for the completion.
    pub model: String,

    /// The content blocks of the completion.
    pub content: Vec<ContentBlock>,

    /// Token usage statistics.
    pub usage: Option<ApiUsage>,
}

impl Response {
    /// The text of the first content block.
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|block| block.text.as_str())
    }

    /// Normalized token usage.
    pub fn usage(&self) -> Option<Usage> {
        self.usage.as_ref().map(|u| Usage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
        })
    }
}

/// A content block in a completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// The text of the block.
    #[serde(default)]
    pub text: String,
}

/// Token usage statistics as the API reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUsage {
    /// Number of tokens in the prompt.
    pub input_tokens: u32,

    /// Number of tokens in the completion.
    pub output_tokens: u32,
}
