//! Heuristic output scoring.
//!
//! Points for formatting, length, key-term relevance, and
//! pattern-specific structure, normalized to [0, 1]. Crude on purpose:
//! the harness compares patterns against each other, it does not grade
//! absolute quality.

use pcore::{Pattern, extract_json};

/// Terms a good summary of the sample article should mention.
const KEY_TERMS: &[&str] = &["ai", "bank", "customer", "service", "cost", "reduction"];

const REASONING_MARKERS: &[&str] = &["step", "first", "then", "therefore", "thinking"];

/// Score one model output for a pattern, in [0, 1].
///
/// Malformed output scores low, it never errors.
pub fn quality_score(output: &str, pattern: Pattern) -> f64 {
    let mut score: i32 = 0;
    let lowered = output.to_lowercase();

    // formatting
    if output.contains('\u{2022}') || output.contains("- ") {
        score += 20;
    }

    // length band
    let word_count = output.split_whitespace().count();
    if (30..=100).contains(&word_count) {
        score += 20;
    } else if word_count <= 150 {
        score += 10;
    }

    // key-term relevance, up to 25 points
    let found = KEY_TERMS.iter().filter(|t| lowered.contains(*t)).count() as i32;
    score += (found * 5).min(25);

    // structure: exactly three bullets is the asked-for shape
    let bullets = output.matches('\u{2022}').count() + output.matches("\n- ").count();
    if bullets == 3 {
        score += 10;
    } else if bullets > 0 {
        score += 5;
    }

    match pattern {
        Pattern::Schema => {
            let valid = extract_json(output)
                .and_then(|json| serde_json::from_str::<serde_json::Value>(json).ok())
                .is_some();
            score += if valid { 25 } else { -20 };
        }
        Pattern::Cot => {
            if REASONING_MARKERS.iter().any(|m| lowered.contains(m)) {
                score += 10;
            }
        }
        _ => {}
    }

    (f64::from(score) / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_SUMMARY: &str = "\u{2022} Banks adopt AI for customer service\n\
         \u{2022} Cost reduction reached forty percent this year\n\
         \u{2022} Service quality improved across all branches measured";

    #[test]
    fn well_formed_summary_scores_high() {
        let score = quality_score(GOOD_SUMMARY, Pattern::Zero);
        assert!(score >= 0.5, "score was {score}");
    }

    #[test]
    fn empty_output_scores_near_zero() {
        assert!(quality_score("", Pattern::Zero) <= 0.1);
    }

    #[test]
    fn valid_json_boosts_schema_score() {
        let json = r#"{"summary": "Banks adopt AI", "key_points": ["a", "b", "c"],
                       "sentiment": "positive", "word_count": 120}"#;
        let invalid = "not json at all";
        assert!(quality_score(json, Pattern::Schema) > quality_score(invalid, Pattern::Schema));
    }

    #[test]
    fn invalid_json_is_penalized_for_schema_only() {
        let text = "some plain text about ai banks";
        assert!(quality_score(text, Pattern::Schema) < quality_score(text, Pattern::Zero));
    }

    #[test]
    fn reasoning_markers_boost_cot() {
        let reasoned = format!("First, the main topic. Then the points.\n{GOOD_SUMMARY}");
        assert!(quality_score(&reasoned, Pattern::Cot) >= quality_score(GOOD_SUMMARY, Pattern::Zero));
    }

    #[test]
    fn score_is_clamped() {
        let score = quality_score(GOOD_SUMMARY, Pattern::Zero);
        assert!((0.0..=1.0).contains(&score));
    }
}
