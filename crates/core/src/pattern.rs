//! Prompt patterns from the prompt lab.
//!
//! Each builder wraps caller-supplied article text in a pattern-specific
//! instruction and returns the full message list to send.

use llm::Message;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A prompt-engineering pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Direct instruction, no examples.
    Zero,
    /// Instruction preceded by worked examples.
    FewShot,
    /// Schema-constrained JSON output.
    Schema,
    /// Stepwise reasoning before the answer.
    Cot,
}

impl Pattern {
    /// All patterns, in evaluation order.
    pub const ALL: [Pattern; 4] = [
        Pattern::Zero,
        Pattern::FewShot,
        Pattern::Schema,
        Pattern::Cot,
    ];

    /// The pattern's short name.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Zero => "zero",
            Pattern::FewShot => "fewshot",
            Pattern::Schema => "schema",
            Pattern::Cot => "cot",
        }
    }

    /// Temperature suited to the pattern (lower for structured output).
    pub fn temperature(&self) -> f32 {
        match self {
            Pattern::Schema => 0.1,
            Pattern::Cot => 0.5,
            _ => 0.3,
        }
    }

    /// Build the message list for this pattern over an article.
    pub fn messages(&self, article: &str, examples: &[Example]) -> Vec<Message> {
        match self {
            Pattern::Zero => zero_shot(article),
            Pattern::FewShot => few_shot(article, examples),
            Pattern::Schema => schema(article),
            Pattern::Cot => chain_of_thought(article),
        }
    }
}

/// A worked few-shot example: an article and its bullet summary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Example {
    /// The example article text.
    pub article: String,
    /// The bullet points of its summary.
    pub summary: Vec<String>,
}

/// The structured output demanded by the schema pattern.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ArticleSummary {
    /// One sentence overview.
    pub summary: String,
    /// Exactly three bullet points.
    pub key_points: Vec<String>,
    /// Overall sentiment: positive, neutral, or negative.
    pub sentiment: String,
    /// Estimated word count of the original.
    pub word_count: u32,
}

/// Basic zero-shot prompting: ask directly for three bullets.
pub fn zero_shot(article: &str) -> Vec<Message> {
    vec![Message::user(format!(
        "Summarize the following article in exactly 3 bullet points:\n\
         \n\
         {article}\n\
         \n\
         Format: Use bullet points (\u{2022}) and keep each point under 15 words."
    ))]
}

/// Few-shot prompting: render up to two worked examples before the task.
pub fn few_shot(article: &str, examples: &[Example]) -> Vec<Message> {
    let mut rendered = String::new();
    for (index, example) in examples.iter().take(2).enumerate() {
        let preview: String = example.article.chars().take(100).collect();
        rendered.push_str(&format!("\nExample {}:\nArticle: {preview}...\n", index + 1));
        rendered.push_str("Summary:\n");
        for point in &example.summary {
            rendered.push_str(&format!("\u{2022} {point}\n"));
        }
    }

    vec![Message::user(format!(
        "You are an expert summarizer. Here are examples of good summaries:\n\
         \n\
         {rendered}\n\
         Now summarize this article in exactly 3 bullet points:\n\
         \n\
         {article}\n\
         \n\
         Format: Use bullet points (\u{2022}) and keep each point under 15 words."
    ))]
}

/// Schema-constrained prompting: embed the JSON schema and demand
/// JSON-only output.
pub fn schema(article: &str) -> Vec<Message> {
    let schema = schemars::schema_for!(ArticleSummary);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_default();

    vec![Message::user(format!(
        "Analyze this article and return a JSON response matching this exact schema:\n\
         \n\
         {rendered}\n\
         \n\
         Article to analyze:\n\
         {article}\n\
         \n\
         IMPORTANT: Return only valid JSON, no additional text."
    ))]
}

/// Chain-of-thought prompting: stepwise reasoning before the summary.
pub fn chain_of_thought(article: &str) -> Vec<Message> {
    vec![Message::user(format!(
        "Let's analyze this article step by step:\n\
         \n\
         <thinking>\n\
         1. First, identify the main topic\n\
         2. Then find the 3 most important points\n\
         3. Finally, write concise bullet points\n\
         </thinking>\n\
         \n\
         Article:\n\
         {article}\n\
         \n\
         Please show your reasoning process and then provide a 3 bullet point summary."
    ))]
}
