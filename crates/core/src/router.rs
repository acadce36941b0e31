//! Keyword model router.
//!
//! Picks a model tier by scanning the request for complexity signals.
//! Complex indicators win over simple ones; with neither, short requests
//! are treated as simple.

/// Assessed request complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Short lookup-style request.
    Simple,
    /// Multi-step or analytical request.
    Complex,
}

const SIMPLE_INDICATORS: &[&str] = &[
    "what is",
    "calculate",
    "convert",
    "define",
    "search for",
    "find",
    "lookup",
    "current",
    "today",
    "weather",
];

const COMPLEX_INDICATORS: &[&str] = &[
    "analyze",
    "compare",
    "evaluate",
    "plan",
    "strategy",
    "create a report",
    "summarize multiple",
    "research",
    "write a",
    "explain why",
    "pros and cons",
];

/// Routes requests to a fast or powerful model by keyword matching.
#[derive(Debug, Clone)]
pub struct Router {
    /// Model for simple requests.
    pub fast: String,
    /// Model for complex requests.
    pub powerful: String,
}

impl Router {
    /// Create a router over a fast/powerful model pair.
    pub fn new(fast: impl Into<String>, powerful: impl Into<String>) -> Self {
        Self {
            fast: fast.into(),
            powerful: powerful.into(),
        }
    }

    /// Assess request complexity. First-match-wins, complex checked first.
    pub fn assess(&self, input: &str) -> Complexity {
        let lowered = input.to_lowercase();

        if COMPLEX_INDICATORS.iter().any(|kw| lowered.contains(kw)) {
            return Complexity::Complex;
        }
        if SIMPLE_INDICATORS.iter().any(|kw| lowered.contains(kw)) {
            return Complexity::Simple;
        }

        if input.len() < 100 {
            Complexity::Simple
        } else {
            Complexity::Complex
        }
    }

    /// The model to use for a request.
    pub fn route(&self, input: &str) -> &str {
        match self.assess(input) {
            Complexity::Simple => &self.fast,
            Complexity::Complex => &self.powerful,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("claude-3-haiku-20240307", "claude-3-5-sonnet-20241022")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_keywords_win() {
        let router = Router::default();
        // "find" is a simple indicator, but "compare" outranks it
        assert_eq!(
            router.assess("find and compare two laptops"),
            Complexity::Complex
        );
    }

    #[test]
    fn simple_keywords_route_fast() {
        let router = Router::default();
        assert_eq!(router.assess("what is a neural network"), Complexity::Simple);
        assert_eq!(router.route("what is rust"), "claude-3-haiku-20240307");
    }

    #[test]
    fn length_breaks_ties() {
        let router = Router::default();
        assert_eq!(router.assess("hello there"), Complexity::Simple);
        assert_eq!(router.assess(&"hm ".repeat(50)), Complexity::Complex);
    }
}
