//! Agent configuration.
//!
//! An [`Agent`] is pure config: name, system prompt, and tool names.
//! Tool handlers live in the runtime.

/// An agent configuration.
///
/// Agents describe *what* an agent does but not *how* tool calls are
/// dispatched. The runtime holds the actual tool handlers.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    /// Agent identifier.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// System prompt sent before each LLM request.
    pub system_prompt: String,
    /// Names of tools this agent can use (resolved by the runtime).
    pub tools: Vec<String>,
    /// Loop iteration cap for agent architectures.
    pub max_iterations: usize,
}

impl Agent {
    /// Create a new agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_iterations: 10,
            ..Default::default()
        }
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Add a tool by name.
    pub fn tool(mut self, name: impl Into<String>) -> Self {
        self.tools.push(name.into());
        self
    }

    /// Set the loop iteration cap.
    pub fn max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let agent = Agent::new("researcher")
            .system_prompt("You research things.")
            .tool("web_search")
            .tool("calculator");
        assert_eq!(agent.name, "researcher");
        assert_eq!(agent.tools, vec!["web_search", "calculator"]);
        assert_eq!(agent.max_iterations, 10);
    }
}
