//! Agent memory for the primer lab framework.
//!
//! Memory is **not chat history**. It is structured knowledge (stored
//! facts plus a journal of past question/answer turns) that gets
//! compiled into the system prompt before LLM requests and persisted as
//! a flat JSON snapshot between invocations.
//!
//! Persistence is single-writer, single-reader: snapshots take no lock,
//! so concurrent invocations writing the same file race. That matches
//! the lab's usage (one process at a time).

pub use journal::{Journal, JournalStats, Turn};
pub use snapshot::Snapshot;
pub use store::InMemory;

mod journal;
mod snapshot;
mod store;

/// Structured fact memory for agents.
///
/// Implementations store named key-value pairs that get compiled into
/// the system prompt via [`compile()`](Memory::compile). The trait is
/// fully synchronous; persistence is the snapshot's concern.
pub trait Memory {
    /// Get the value for a key.
    fn get(&self, key: &str) -> Option<&str>;

    /// Get all key-value pairs.
    fn entries(&self) -> &[(String, String)];

    /// Set (upsert) a key-value pair. Returns the previous value if the
    /// key existed.
    fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String>;

    /// Remove a key. Returns the removed value if it existed.
    fn remove(&mut self, key: &str) -> Option<String>;

    /// Compile all entries into a string for system prompt injection.
    ///
    /// The default implementation produces XML-style blocks:
    ///
    /// ```text
    /// <memory>
    /// <user>
    /// Prefers short answers.
    /// </user>
    /// </memory>
    /// ```
    fn compile(&self) -> String {
        let entries = self.entries();
        if entries.is_empty() {
            return String::new();
        }

        let mut out = String::from("<memory>\n");
        for (key, value) in entries {
            out.push_str(&format!("<{key}>\n"));
            out.push_str(value);
            if !value.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("</{key}>\n"));
        }
        out.push_str("</memory>");
        out
    }
}
