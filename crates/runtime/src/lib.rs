//! Primer runtime: the top-level orchestrator.
//!
//! The [`Runtime`] holds the LLM provider, agent configurations, the
//! tool registry, an optional memory snapshot, and the session price
//! meter. Agent loop architectures (`react`, `planner`, `auto`) drive it
//! from their own modules.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcore::Agent;
//! use runtime::{Provider, Runtime};
//! use llm::{Client, Message, Params};
//!
//! let params = Params::new("claude-3-haiku-20240307");
//! let provider = Provider::new(&params.model, Client::new(), &key)?;
//! let mut runtime = Runtime::new(params, provider);
//! runtime.add_agent(Agent::new("assistant").system_prompt("You are helpful."));
//! let mut chat = runtime.chat("assistant")?;
//! let reply = runtime.send(&mut chat, Message::user("hello")).await?;
//! ```

pub use auto::{Assessment, Auto, Outcome, RunReport, TaskRecord};
pub use dispatch::{dispatch, run_tool, select_tool};
pub use planner::{PlanReport, Planner, Reflection, StepResult};
pub use provider::{Provider, provider_name};
pub use react::{ReAct, Step, Trace};

use anyhow::Result;
use llm::{LLM, Message, Params, Reply, Role, estimate_tokens};
use memory::{Memory, Snapshot};
use pcore::{Agent, ExtractError, Handler, PriceMeter, Tool, parse_json};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

pub mod auto;
pub mod dispatch;
pub mod planner;
mod provider;
pub mod react;

const COERCE_RETRIES: usize = 2;

/// A chat session: agent name + conversation messages.
pub struct Chat {
    /// The agent name for this session.
    pub agent_name: String,
    /// Conversation messages.
    pub messages: Vec<Message>,
}

impl Chat {
    /// Create a new chat session.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            messages: Vec::new(),
        }
    }

    /// Get the agent name for this session.
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Get the last message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// The primer runtime.
///
/// Generic over the provider so loop tests can drive it with
/// [`llm::Scripted`] instead of the network.
pub struct Runtime<P: LLM> {
    provider: P,
    params: Params,
    tools: BTreeMap<String, (Tool, Handler)>,
    agents: BTreeMap<String, Agent>,
    meter: PriceMeter,
    memory: Option<Snapshot>,
}

impl<P: LLM> Runtime<P> {
    /// Create a new runtime with the given request params and provider.
    ///
    /// The price meter is keyed by the model's provider prefix; models
    /// outside the price table are metered at zero.
    pub fn new(params: Params, provider: P) -> Self {
        let billing = provider_name(&params.model).unwrap_or("unknown");
        Self {
            provider,
            meter: PriceMeter::new(billing),
            params,
            tools: BTreeMap::new(),
            agents: BTreeMap::new(),
            memory: None,
        }
    }

    /// Register an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.name.clone(), agent);
    }

    /// Get a registered agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// Register a tool with its handler.
    pub fn register(&mut self, tool: Tool, handler: Handler) {
        self.tools.insert(tool.name.clone(), (tool, handler));
    }

    /// The registered tools.
    pub fn tools(&self) -> &BTreeMap<String, (Tool, Handler)> {
        &self.tools
    }

    /// The request params in effect.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Switch the model for subsequent requests.
    ///
    /// When the model moves to another provider the price meter is
    /// re-keyed and starts a fresh session.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.params.model = model.into();
        let billing = provider_name(&self.params.model).unwrap_or("unknown");
        if billing != self.meter.provider() {
            tracing::debug!(
                "re-keying price meter from {} to {billing}",
                self.meter.provider()
            );
            self.meter = PriceMeter::new(billing);
        }
    }

    /// The session price meter.
    pub fn meter(&self) -> &PriceMeter {
        &self.meter
    }

    /// Attach a memory snapshot. Its compiled facts join every system
    /// prompt from here on.
    pub fn attach_memory(&mut self, snapshot: Snapshot) {
        self.memory = Some(snapshot);
    }

    /// The attached memory snapshot, if any.
    pub fn memory(&self) -> Option<&Snapshot> {
        self.memory.as_ref()
    }

    /// Mutable access to the attached memory snapshot.
    pub fn memory_mut(&mut self) -> Option<&mut Snapshot> {
        self.memory.as_mut()
    }

    /// Create a new chat session for the named agent.
    pub fn chat(&self, agent: &str) -> Result<Chat> {
        if !self.agents.contains_key(agent) {
            anyhow::bail!("agent '{agent}' not registered");
        }
        Ok(Chat::new(agent))
    }

    /// Estimate current token usage for a chat session.
    pub fn estimate_tokens(&self, chat: &Chat) -> usize {
        estimate_tokens(&self.api_messages(chat))
    }

    /// Build the message list for an API request: the agent's system
    /// prompt (plus compiled memory) ahead of the session history.
    fn api_messages(&self, chat: &Chat) -> Vec<Message> {
        let mut messages = chat.messages.clone();
        let Some(agent) = self.agents.get(chat.agent_name()) else {
            return messages;
        };

        let mut system = agent.system_prompt.clone();
        if let Some(memory) = &self.memory {
            let compiled = memory.facts.compile();
            if !compiled.is_empty() {
                if !system.is_empty() {
                    system.push_str("\n\n");
                }
                system.push_str(&compiled);
            }
        }

        if !system.is_empty() && messages.first().map(|m| m.role) != Some(Role::System) {
            messages.insert(0, Message::system(system));
        }
        messages
    }

    /// One raw provider call over an explicit message list, metered.
    ///
    /// Loop architectures build their own transcripts and call this
    /// directly; chat sessions go through [`send`](Runtime::send).
    pub async fn complete(&mut self, messages: &[Message]) -> Result<Reply> {
        let reply = self.provider.send(&self.params, messages).await?;
        let usage = reply.usage_or_estimate(messages);
        self.meter.record(&usage, &self.params.model);
        Ok(reply)
    }

    /// Send a message through a chat session.
    pub async fn send(&mut self, chat: &mut Chat, message: Message) -> Result<Reply> {
        if !self.agents.contains_key(chat.agent_name()) {
            anyhow::bail!("agent '{}' not registered", chat.agent_name());
        }
        chat.messages.push(message);

        let messages = self.api_messages(chat);
        let reply = self.complete(&messages).await?;
        chat.messages.push(Message::assistant(&reply.content));
        Ok(reply)
    }

    /// Send a message and coerce the reply into a JSON-typed value.
    ///
    /// On a malformed reply, re-prompts with the parse failure up to
    /// two retries, then surfaces the error with the raw response.
    pub async fn coerce<T: DeserializeOwned>(
        &mut self,
        chat: &mut Chat,
        message: Message,
    ) -> Result<T> {
        let mut next = message;
        let mut last: Option<ExtractError> = None;

        for attempt in 0..=COERCE_RETRIES {
            let reply = self.send(chat, next).await?;
            match parse_json::<T>(&reply.content) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!("json coercion attempt {attempt} failed: {err}");
                    next = Message::user(format!(
                        "That reply could not be used: {}. \
                         Respond again with only the corrected JSON.",
                        parse_feedback(&err)
                    ));
                    last = Some(err);
                }
            }
        }

        match last {
            Some(err) => Err(err.into()),
            None => anyhow::bail!("json coercion failed without a parse error"),
        }
    }
}

/// A short description of the parse failure, without echoing the full
/// raw response back to the model.
fn parse_feedback(err: &ExtractError) -> String {
    match err {
        ExtractError::NotFound { .. } => "no JSON object was found".to_owned(),
        ExtractError::Parse { source, .. } => format!("JSON parse error ({source})"),
    }
}
