//! ReAct loop: interleaved reasoning and tool use.
//!
//! The classic Thought / Action / Action Input / Observation cycle. The
//! model is shown the registered tools and the format, then each reply
//! is parsed for either a `Final Answer:` or an `Action:` to dispatch.
//! Output that follows neither shape is fed back as an Observation
//! asking for the correct format.

use crate::{Runtime, run_tool};
use anyhow::Result;
use llm::{LLM, Message};
use serde::Serialize;

/// One Thought/Action/Observation step of a ReAct run.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// The model's reasoning, when it emitted a `Thought:` line.
    pub thought: Option<String>,
    /// The tool the model chose.
    pub action: String,
    /// The input it passed to the tool.
    pub input: String,
    /// What the tool returned.
    pub observation: String,
}

/// A completed ReAct run.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    /// The question asked.
    pub question: String,
    /// The tool steps taken, in order.
    pub steps: Vec<Step>,
    /// The final answer, if the model produced one before the
    /// iteration cap.
    pub answer: Option<String>,
    /// LLM calls made.
    pub iterations: usize,
}

/// The ReAct loop driver.
#[derive(Debug, Clone)]
pub struct ReAct {
    /// Cap on LLM calls per run.
    pub max_iterations: usize,
}

impl Default for ReAct {
    fn default() -> Self {
        Self { max_iterations: 10 }
    }
}

impl ReAct {
    /// Create a driver with the given iteration cap.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Run the loop against the runtime's registered tools.
    pub async fn run<P: LLM>(&self, rt: &mut Runtime<P>, question: &str) -> Result<Trace> {
        let mut transcript = vec![Message::user(prompt(rt, question))];
        let mut trace = Trace {
            question: question.to_owned(),
            steps: Vec::new(),
            answer: None,
            iterations: 0,
        };

        for _ in 0..self.max_iterations {
            let reply = rt.complete(&transcript).await?;
            trace.iterations += 1;

            if let Some(answer) = field(&reply.content, "Final Answer:") {
                trace.answer = Some(answer);
                return Ok(trace);
            }

            let action = field(&reply.content, "Action:");
            let input = field(&reply.content, "Action Input:");
            let (Some(action), Some(input)) = (action, input) else {
                tracing::debug!("unparseable react reply: {}", reply.content);
                transcript.push(Message::assistant(&reply.content));
                transcript.push(Message::user(
                    "Observation: that did not follow the format. Reply with \
                     'Action:' and 'Action Input:' lines, or 'Final Answer:'.",
                ));
                continue;
            };

            let observation = run_tool(rt.tools(), &action, &input).await;
            trace.steps.push(Step {
                thought: field(&reply.content, "Thought:"),
                action,
                input,
                observation: observation.clone(),
            });

            transcript.push(Message::assistant(&reply.content));
            transcript.push(Message::user(format!("Observation: {observation}")));
        }

        Ok(trace)
    }
}

/// The opening prompt: tool list, format instructions, and the question.
fn prompt<P: LLM>(rt: &Runtime<P>, question: &str) -> String {
    let tools: Vec<String> = rt
        .tools()
        .values()
        .map(|(tool, _)| format!("{}: {}", tool.name, tool.description))
        .collect();
    let names: Vec<&str> = rt.tools().keys().map(String::as_str).collect();

    format!(
        "Answer the following questions as best you can. You have access \
         to the following tools:\n\n{}\n\nUse the following format:\n\n\
         Question: the input question you must answer\n\
         Thought: you should always think about what to do\n\
         Action: the action to take, should be one of [{}]\n\
         Action Input: the input to the action\n\
         Observation: the result of the action\n\
         ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
         Thought: I now know the final answer\n\
         Final Answer: the final answer to the original input question\n\n\
         Begin!\n\nQuestion: {question}\nThought:",
        tools.join("\n"),
        names.join(", "),
    )
}

/// Extract the text after a labeled line, up to the end of that line.
///
/// The label must open a line, so prose that merely contains it (say
/// "Reaction: positive") is not mistaken for an `Action:`.
///
/// `Final Answer:` is the exception: everything after the label is the
/// answer, newlines included.
fn field(text: &str, label: &str) -> Option<String> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(label) {
            let value = if label == "Final Answer:" {
                let start = offset + (line.len() - trimmed.len()) + label.len();
                &text[start..]
            } else {
                after
            };
            let value = value.trim();
            return (!value.is_empty()).then(|| value.to_owned());
        }
        offset += line.len();
    }
    None
}
