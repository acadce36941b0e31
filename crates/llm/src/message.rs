//! Chat messages.

use serde::{Deserialize, Serialize};

/// A message in the chat.
///
/// Messages are passed whole, in insertion order, to each provider call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message.
    pub role: Role,

    /// The content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Estimate the number of tokens in this message.
    ///
    /// Uses a simple heuristic: ~4 characters per token.
    pub fn estimate_tokens(&self) -> usize {
        (self.content.len() / 4).max(1)
    }
}

/// Estimate total tokens across a slice of messages.
pub fn estimate_tokens(messages: &[Message]) -> usize {
    messages.iter().map(|m| m.estimate_tokens()).sum()
}

/// The role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role.
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role.
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role.
    #[serde(rename = "system")]
    System,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role() {
        assert_eq!(Message::system("a").role, Role::System);
        assert_eq!(Message::user("b").role, Role::User);
        assert_eq!(Message::assistant("c").role, Role::Assistant);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn token_estimate_is_chars_over_four() {
        let msg = Message::user("a".repeat(40));
        assert_eq!(msg.estimate_tokens(), 10);
    }

    #[test]
    fn token_estimate_never_zero() {
        assert_eq!(Message::user("").estimate_tokens(), 1);
    }

    #[test]
    fn slice_estimate_sums() {
        let msgs = vec![Message::user("a".repeat(40)), Message::user("b".repeat(8))];
        assert_eq!(estimate_tokens(&msgs), 12);
    }
}
