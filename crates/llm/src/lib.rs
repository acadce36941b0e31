//! Unified LLM interface types and traits.
//!
//! This crate provides the shared types used across all LLM providers:
//! [`Message`], [`Params`], [`Reply`], and the [`LLM`] trait. Provider
//! crates (`primer-openai`, `primer-anthropic`, `primer-google`) implement
//! the trait over their own wire formats.

pub use message::{Message, Role, estimate_tokens};
pub use params::Params;
pub use reply::{Reply, Usage};
pub use reqwest::{self, Client};
pub use scripted::Scripted;

mod message;
mod params;
mod reply;
mod scripted;

use anyhow::Result;

/// A trait for LLM providers.
///
/// One request in flight at a time; `send` resolves once the full
/// completion has arrived.
pub trait LLM: Sized + Clone {
    /// Create a new LLM provider.
    fn new(client: Client, key: &str) -> Result<Self>;

    /// Send a conversation to the LLM and return the normalized reply.
    fn send(
        &self,
        params: &Params,
        messages: &[Message],
    ) -> impl Future<Output = Result<Reply>> + Send;
}
