//! Wire format for the OpenAI chat completions API.

use llm::{Message, Params, Usage};
use serde::{Deserialize, Serialize};

/// The request body for the chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model we are using.
    pub model: String,

    /// The messages to send to the API.
    pub messages: Vec<Message>,

    /// The temperature to use for the response.
    pub temperature: f32,

    /// The maximum number of tokens to generate.
    pub max_tokens: u32,
}

impl Request {
    /// Build a request from parameters and a message list.
    pub fn new(params: &Params, messages: &[Message]) -> Self {
        Self {
            model: params.model.clone(),
            messages: messages.to_vec(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// The response body of the chat completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// The model used for the completion.
    pub model: String,

    /// The list of completion choices.
    pub choices: Vec<Choice>,

    /// Token usage statistics.
    pub usage: Option<ApiUsage>,
}

impl Response {
    /// The content of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// Normalized token usage.
    pub fn usage(&self) -> Option<Usage> {
        self.usage.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        })
    }
}

/// A completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,

    /// The reason the model stopped generating.
    pub finish_reason: Option<String>,
}

/// The message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// The content of the message.
    pub content: Option<String>,
}

/// Token usage statistics as the API reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUsage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_fields() {
        let params = Params::new("gpt-4o-mini").temperature(0.3).max_tokens(64);
        let request = Request::new(&params, &[Message::user("hello")]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["temperature"], 0.3);
        assert_eq!(value["max_tokens"], 64);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn response_exposes_first_choice() {
        let text = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"content": "hi"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }"#;
        let response: Response = serde_json::from_str(text).unwrap();
        assert_eq!(response.content(), Some("hi"));
        assert_eq!(response.usage().unwrap().completion_tokens, 3);
    }

    #[test]
    fn empty_choices_yield_none() {
        let text = r#"{"model": "m", "choices": [], "usage": null}"#;
        let response: Response = serde_json::from_str(text).unwrap();
        assert!(response.content().is_none());
    }
}
