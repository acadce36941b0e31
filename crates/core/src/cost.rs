//! Token cost estimation.
//!
//! A static per-provider/per-model price table (USD per 1M tokens) and a
//! session meter. Token counts use the chars/4 proxy from `primer-llm`
//! when no provider-reported usage is available.

use llm::Usage;
use serde::Serialize;

/// Price table entry: (provider, model, input $/1M, output $/1M).
///
/// Prices as of 2024.
pub const PRICING: &[(&str, &str, f64, f64)] = &[
    ("openai", "gpt-4o", 2.50, 10.00),
    ("openai", "gpt-4o-mini", 0.15, 0.60),
    ("openai", "gpt-3.5-turbo", 0.50, 1.50),
    ("anthropic", "claude-3-5-sonnet-20241022", 3.00, 15.00),
    ("anthropic", "claude-3-haiku-20240307", 0.25, 1.25),
    ("anthropic", "claude-3-opus-20240229", 15.00, 75.00),
    ("google", "gemini-2.0-flash-exp", 0.075, 0.30),
    ("google", "gemini-1.5-pro", 1.25, 5.00),
    ("google", "gemini-1.5-flash", 0.075, 0.30),
];

/// Cost breakdown for a single call.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    /// The provider billed.
    pub provider: String,
    /// The model billed (the table entry actually used).
    pub model: String,
    /// Tokens in the prompt.
    pub input_tokens: u32,
    /// Tokens in the completion.
    pub output_tokens: u32,
    /// Dollar cost of the prompt.
    pub input_cost: f64,
    /// Dollar cost of the completion.
    pub output_cost: f64,
    /// Total dollar cost.
    pub total_cost: f64,
}

/// Summary of all costs metered in a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Total dollar cost.
    pub total_cost: f64,
    /// Number of metered calls.
    pub total_calls: usize,
    /// Average dollar cost per call.
    pub avg_cost_per_call: f64,
    /// Total prompt tokens.
    pub total_input_tokens: u64,
    /// Total completion tokens.
    pub total_output_tokens: u64,
}

/// Tracks and estimates costs for one provider across a session.
#[derive(Debug, Clone, Default)]
pub struct PriceMeter {
    provider: String,
    total: f64,
    history: Vec<Breakdown>,
}

impl PriceMeter {
    /// Create a meter for the given provider.
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into().to_lowercase(),
            ..Default::default()
        }
    }

    /// Count tokens in text with the chars/4 proxy.
    pub fn count_tokens(text: &str) -> u32 {
        llm::estimate_tokens(&[llm::Message::user(text)]) as u32
    }

    /// Estimate the cost of one call from raw input/output text.
    pub fn estimate(&mut self, input: &str, output: &str, model: &str) -> Breakdown {
        let usage = Usage {
            prompt_tokens: Self::count_tokens(input),
            completion_tokens: Self::count_tokens(output),
        };
        self.record(&usage, model)
    }

    /// Record the cost of one call from token usage.
    ///
    /// Unknown models fall back to the provider's first table entry;
    /// unknown providers are billed at zero. Both log a warning.
    pub fn record(&mut self, usage: &Usage, model: &str) -> Breakdown {
        let (billed_model, input_price, output_price) = self.lookup(model);
        let input_cost = (usage.prompt_tokens as f64 / 1_000_000.0) * input_price;
        let output_cost = (usage.completion_tokens as f64 / 1_000_000.0) * output_price;

        let breakdown = Breakdown {
            provider: self.provider.clone(),
            model: billed_model,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
        };

        self.total += breakdown.total_cost;
        self.history.push(breakdown.clone());
        breakdown
    }

    fn lookup(&self, model: &str) -> (String, f64, f64) {
        if let Some((_, m, input, output)) = PRICING
            .iter()
            .find(|(p, m, _, _)| *p == self.provider && *m == model)
        {
            return (m.to_string(), *input, *output);
        }

        if let Some((_, m, input, output)) =
            PRICING.iter().find(|(p, _, _, _)| *p == self.provider)
        {
            tracing::warn!("using {m} pricing for unknown model {model}");
            return (m.to_string(), *input, *output);
        }

        tracing::warn!("no pricing data for provider {}", self.provider);
        (model.to_string(), 0.0, 0.0)
    }

    /// The provider this meter bills against.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Total dollar cost so far.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// All breakdowns metered this session, in call order.
    pub fn history(&self) -> &[Breakdown] {
        &self.history
    }

    /// Summarize the session.
    pub fn summary(&self) -> SessionSummary {
        let calls = self.history.len();
        SessionSummary {
            total_cost: self.total,
            total_calls: calls,
            avg_cost_per_call: if calls == 0 {
                0.0
            } else {
                self.total / calls as f64
            },
            total_input_tokens: self.history.iter().map(|b| b.input_tokens as u64).sum(),
            total_output_tokens: self.history.iter().map(|b| b.output_tokens as u64).sum(),
        }
    }
}

/// The price-table provider for a model name, by prefix.
///
/// `gpt-*` and `o*` (o1, o3, ...) are OpenAI, `claude-*` is Anthropic,
/// `gemini-*` is Google.
pub fn billing_provider(model: &str) -> Option<&'static str> {
    match model {
        m if m.starts_with("gpt") || m.starts_with('o') => Some("openai"),
        m if m.starts_with("claude") => Some("anthropic"),
        m if m.starts_with("gemini") => Some("google"),
        _ => None,
    }
}

/// Compare the cost of one input/output pair across every table entry,
/// cheapest first.
pub fn compare(input: &str, output: &str) -> Vec<(String, f64)> {
    let mut options: Vec<(String, f64)> = PRICING
        .iter()
        .map(|(provider, model, _, _)| {
            let mut meter = PriceMeter::new(*provider);
            let breakdown = meter.estimate(input, output, model);
            (format!("{provider}_{model}"), breakdown.total_cost)
        })
        .collect();
    options.sort_by(|a, b| a.1.total_cmp(&b.1));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_provider_by_prefix() {
        assert_eq!(billing_provider("gpt-4o-mini"), Some("openai"));
        assert_eq!(billing_provider("o3-mini"), Some("openai"));
        assert_eq!(billing_provider("claude-3-haiku-20240307"), Some("anthropic"));
        assert_eq!(billing_provider("gemini-1.5-flash"), Some("google"));
        assert_eq!(billing_provider("llama-3"), None);
    }

    #[test]
    fn cost_is_non_negative() {
        let mut meter = PriceMeter::new("openai");
        let breakdown = meter.estimate("", "", "gpt-4o-mini");
        assert!(breakdown.total_cost >= 0.0);
    }

    #[test]
    fn cost_is_monotonic_in_tokens() {
        let mut meter = PriceMeter::new("openai");
        let small = meter.estimate(&"x".repeat(100), "out", "gpt-4o").total_cost;
        let large = meter
            .estimate(&"x".repeat(10_000), "out", "gpt-4o")
            .total_cost;
        assert!(large > small);
    }

    #[test]
    fn unknown_model_falls_back_to_first_entry() {
        let mut meter = PriceMeter::new("anthropic");
        let breakdown = meter.estimate("input", "output", "claude-99-mega");
        assert_eq!(breakdown.model, "claude-3-5-sonnet-20241022");
        assert!(breakdown.total_cost > 0.0);
    }

    #[test]
    fn unknown_provider_bills_zero() {
        let mut meter = PriceMeter::new("mystery");
        let breakdown = meter.estimate("input", "output", "model");
        assert_eq!(breakdown.total_cost, 0.0);
    }

    #[test]
    fn session_summary_accumulates() {
        let mut meter = PriceMeter::new("openai");
        meter.estimate(&"a".repeat(400), &"b".repeat(400), "gpt-4o");
        meter.estimate(&"c".repeat(400), &"d".repeat(400), "gpt-4o");
        let summary = meter.summary();
        assert_eq!(summary.total_calls, 2);
        assert_eq!(summary.total_input_tokens, 200);
        assert!((summary.avg_cost_per_call - summary.total_cost / 2.0).abs() < 1e-12);
    }

    #[test]
    fn compare_is_sorted_cheapest_first() {
        let options = compare(&"x".repeat(4000), &"y".repeat(4000));
        assert_eq!(options.len(), PRICING.len());
        assert!(options.windows(2).all(|w| w[0].1 <= w[1].1));
        // opus is the most expensive entry in the table
        assert!(options.last().unwrap().0.contains("opus"));
    }

    #[test]
    fn record_uses_reported_usage() {
        let mut meter = PriceMeter::new("google");
        let usage = Usage {
            prompt_tokens: 1_000_000,
            completion_tokens: 0,
        };
        let breakdown = meter.record(&usage, "gemini-1.5-pro");
        assert!((breakdown.total_cost - 1.25).abs() < 1e-9);
    }
}
