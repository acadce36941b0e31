//! Scripted LLM provider for testing.
//!
//! Returns canned replies from an internal queue, in order. Intended for
//! unit tests that exercise prompt building, tool dispatch, and agent
//! loops without making real LLM calls.

use crate::{LLM, Client, Message, Params, Reply, estimate_tokens};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A scripted provider that replays canned completions.
///
/// Clones share the same queue, so a runtime holding a clone drains the
/// replies the test enqueued.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl Scripted {
    /// Create a scripted provider from a list of canned replies.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Into::into).collect())),
            prompts: Arc::default(),
        }
    }

    /// Append another canned reply to the queue.
    pub fn push(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    /// The message lists this provider has been called with, in order.
    pub fn prompts(&self) -> Vec<Vec<Message>> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of canned replies left in the queue.
    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl LLM for Scripted {
    fn new(_client: Client, _key: &str) -> Result<Self> {
        Ok(Self::default())
    }

    async fn send(&self, _params: &Params, messages: &[Message]) -> Result<Reply> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted provider ran out of replies"))?;
        let prompt_tokens = estimate_tokens(messages) as u32;
        let completion_tokens = (content.len() / 4).max(1) as u32;
        Ok(Reply {
            content,
            model: "scripted".into(),
            usage: Some(crate::Usage {
                prompt_tokens,
                completion_tokens,
            }),
            elapsed: Duration::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order() {
        let scripted = Scripted::with_replies(["first", "second"]);
        let params = Params::default();
        let reply = scripted.send(&params, &[Message::user("a")]).await.unwrap();
        assert_eq!(reply.content, "first");
        let reply = scripted.send(&params, &[Message::user("b")]).await.unwrap();
        assert_eq!(reply.content, "second");
        assert_eq!(scripted.remaining(), 0);
    }

    #[tokio::test]
    async fn errors_when_exhausted() {
        let scripted = Scripted::default();
        let result = scripted.send(&Params::default(), &[]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn records_prompts() {
        let scripted = Scripted::with_replies(["ok"]);
        scripted
            .send(&Params::default(), &[Message::user("question")])
            .await
            .unwrap();
        let prompts = scripted.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0][0].content, "question");
    }
}
