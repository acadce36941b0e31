//! Structured-output salvage.
//!
//! Models asked for JSON routinely wrap it in markdown fences or prose.
//! [`extract_json`] digs the JSON out; [`parse_json`] deserializes it.
//! Failures are reported with the raw response preserved, never raised
//! as panics.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to pull structured output from a model reply.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No JSON-looking region in the reply.
    #[error("no JSON object found in response: {raw}")]
    NotFound {
        /// The raw model reply.
        raw: String,
    },

    /// A JSON-looking region that does not parse.
    #[error("JSON parse error ({source}) - raw response: {raw}")]
    Parse {
        /// The parse failure.
        source: serde_json::Error,
        /// The raw model reply.
        raw: String,
    },
}

impl ExtractError {
    /// The raw model reply that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            ExtractError::NotFound { raw } | ExtractError::Parse { raw, .. } => raw,
        }
    }
}

/// Locate the JSON payload inside a model reply.
///
/// Checks, in order: a ```json fence, any ``` fence, then the span from
/// the first `{` to the last `}`.
pub fn extract_json(response: &str) -> Option<&str> {
    if let Some(fenced) = fenced_block(response, "```json") {
        return Some(fenced);
    }
    if let Some(fenced) = fenced_block(response, "```") {
        let trimmed = fenced.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Some(fenced);
        }
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

fn fenced_block<'a>(response: &'a str, opener: &str) -> Option<&'a str> {
    let after = &response[response.find(opener)? + opener.len()..];
    let end = after.find("```")?;
    Some(after[..end].trim())
}

/// Extract and deserialize structured output from a model reply.
pub fn parse_json<T: DeserializeOwned>(response: &str) -> Result<T, ExtractError> {
    let payload = extract_json(response).ok_or_else(|| ExtractError::NotFound {
        raw: response.to_owned(),
    })?;

    serde_json::from_str(payload).map_err(|source| ExtractError::Parse {
        source,
        raw: response.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        complete: bool,
    }

    #[test]
    fn bare_json_parses() {
        let verdict: Verdict = parse_json(r#"{"complete": true}"#).unwrap();
        assert!(verdict.complete);
    }

    #[test]
    fn json_fence_is_unwrapped() {
        let response = "Here you go:\n```json\n{\"complete\": false}\n```\nDone.";
        let verdict: Verdict = parse_json(response).unwrap();
        assert!(!verdict.complete);
    }

    #[test]
    fn plain_fence_is_unwrapped() {
        let response = "```\n{\"complete\": true}\n```";
        let verdict: Verdict = parse_json(response).unwrap();
        assert!(verdict.complete);
    }

    #[test]
    fn prose_wrapped_json_is_found() {
        let response = "Sure! The verdict is {\"complete\": true} as requested.";
        let verdict: Verdict = parse_json(response).unwrap();
        assert!(verdict.complete);
    }

    #[test]
    fn missing_json_is_reported_with_raw() {
        let err = parse_json::<Verdict>("no structure here").unwrap_err();
        assert_eq!(err.raw(), "no structure here");
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn malformed_json_is_reported_not_raised() {
        let err = parse_json::<Verdict>("{\"complete\": tru}").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
        assert!(err.to_string().contains("raw response"));
    }
}
