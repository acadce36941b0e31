//! Tool abstractions.
//!
//! A [`Tool`] is a descriptor; the matching [`Handler`] is a type-erased
//! async closure registered with the runtime. Text in, text out; tool
//! selection happens by keyword matching on the task, not by native
//! function calling.

use std::{future::Future, pin::Pin, sync::Arc};

/// A type-erased async tool handler.
pub type Handler =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync>;

/// A tool descriptor.
#[derive(Debug, Clone)]
pub struct Tool {
    /// The name of the tool.
    pub name: String,

    /// The description of the tool, shown to the model in loop prompts.
    pub description: String,
}

impl Tool {
    /// Create a new tool descriptor.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Wrap an async closure into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    Arc::new(move |input| Box::pin(f(input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_wraps_closure() {
        let h = handler(|input| async move { format!("got: {input}") });
        assert_eq!(h("x".into()).await, "got: x");
    }
}
