//! Wire format for the Gemini generateContent API.

use llm::{Message, Params, Role, Usage};
use serde::{Deserialize, Serialize};

/// The request body for generateContent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The conversation turns.
    pub contents: Vec<Content>,

    /// The system prompt, when the conversation has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Sampling configuration.
    pub generation_config: GenerationConfig,
}

impl Request {
    /// Build a request from parameters and a message list.
    ///
    /// Gemini has no `system`/`assistant` roles: a leading system message
    /// becomes `systemInstruction` and assistant turns map to `model`.
    pub fn new(params: &Params, messages: &[Message]) -> Self {
        let mut system_instruction = None;
        let mut contents = Vec::with_capacity(messages.len());

        for message in messages {
            match message.role {
                Role::System if contents.is_empty() && system_instruction.is_none() => {
                    system_instruction = Some(Content::text(None, &message.content));
                }
                Role::System | Role::User => {
                    contents.push(Content::text(Some("user"), &message.content));
                }
                Role::Assistant => {
                    contents.push(Content::text(Some("model"), &message.content));
                }
            }
        }

        Self {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        }
    }
}

/// A content entry: a role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The role of the entry (`user` or `model`); absent for the
    /// system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The text parts.
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![Part {
                text: text.to_owned(),
            }],
        }
    }
}

/// A text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// The text of the part.
    #[serde(default)]
    pub text: String,
}

/// Sampling configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,

    /// Completion token limit.
    pub max_output_tokens: u32,
}

/// The response body of generateContent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The completion candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Token usage statistics.
    pub usage_metadata: Option<UsageMetadata>,
}

impl Response {
    /// The concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Normalized token usage.
    pub fn usage(&self) -> Option<Usage> {
        self.usage_metadata.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
        })
    }
}

/// A completion candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// The candidate content.
    pub content: Content,
}

/// Token usage statistics as the API reports them.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: u32,

    /// Number of tokens in the completion.
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_becomes_instruction() {
        let params = Params::new("gemini-2.0-flash-exp");
        let messages = vec![Message::system("be brief"), Message::user("hello")];
        let request = Request::new(&params, &messages);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "be brief"
        );
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn assistant_turns_map_to_model_role() {
        let params = Params::new("gemini-2.0-flash-exp");
        let messages = vec![Message::user("q"), Message::assistant("a")];
        let request = Request::new(&params, &messages);
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
    }

    #[test]
    fn response_concatenates_parts() {
        let text = r#"{
            "candidates": [{"content": {"role": "model", "parts": [{"text": "he"}, {"text": "llo"}]}}],
            "usageMetadata": {"promptTokenCount": 5, "candidatesTokenCount": 2}
        }"#;
        let response: Response = serde_json::from_str(text).unwrap();
        assert_eq!(response.text().unwrap(), "hello");
        assert_eq!(response.usage().unwrap().prompt_tokens, 5);
    }

    #[test]
    fn empty_candidates_yield_none() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }
}
