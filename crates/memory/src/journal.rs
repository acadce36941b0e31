//! Conversation journal.
//!
//! Records finished question/answer turns with the tools used, for
//! recall, keyword search, and usage statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A finished conversation turn.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Turn {
    /// The user's question or goal.
    pub question: String,
    /// The agent's final answer.
    pub answer: String,
    /// Tools invoked while answering.
    pub tools_used: Vec<String>,
    /// When the turn finished.
    pub timestamp: DateTime<Utc>,
}

/// An insertion-ordered journal of conversation turns.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Journal {
    turns: Vec<Turn>,
}

/// Journal statistics.
#[derive(Debug, Clone, Serialize)]
pub struct JournalStats {
    /// Total recorded turns.
    pub total_turns: usize,
    /// The most used tools, descending, at most three.
    pub most_used_tools: Vec<(String, usize)>,
    /// Timestamp of the first turn.
    pub first: Option<DateTime<Utc>>,
    /// Timestamp of the last turn.
    pub last: Option<DateTime<Utc>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished turn.
    pub fn record(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        tools_used: Vec<String>,
    ) {
        self.turns.push(Turn {
            question: question.into(),
            answer: answer.into(),
            tools_used,
            timestamp: Utc::now(),
        });
    }

    /// All turns, in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent `limit` turns, oldest first.
    pub fn recent(&self, limit: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(limit);
        &self.turns[start..]
    }

    /// Case-insensitive keyword search over questions and answers.
    pub fn search(&self, keyword: &str) -> Vec<&Turn> {
        let keyword = keyword.to_lowercase();
        self.turns
            .iter()
            .filter(|turn| {
                turn.question.to_lowercase().contains(&keyword)
                    || turn.answer.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Usage statistics across all turns.
    pub fn stats(&self) -> JournalStats {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for turn in &self.turns {
            for tool in &turn.tools_used {
                *counts.entry(tool).or_default() += 1;
            }
        }

        let mut most_used: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tool, count)| (tool.to_owned(), count))
            .collect();
        most_used.sort_by(|a, b| b.1.cmp(&a.1));
        most_used.truncate(3);

        JournalStats {
            total_turns: self.turns.len(),
            most_used_tools: most_used,
            first: self.turns.first().map(|t| t.timestamp),
            last: self.turns.last().map(|t| t.timestamp),
        }
    }

    /// Drop all turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Journal {
        let mut journal = Journal::new();
        journal.record("what is rust", "a language", vec!["web_search".into()]);
        journal.record(
            "compute 2+2",
            "4",
            vec!["calculator".into(), "web_search".into()],
        );
        journal.record("what day is it", "friday", vec!["current_date".into()]);
        journal
    }

    #[test]
    fn recent_returns_tail() {
        let journal = sample();
        let recent = journal.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].question, "compute 2+2");
    }

    #[test]
    fn recent_handles_short_journal() {
        let journal = sample();
        assert_eq!(journal.recent(10).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive() {
        let journal = sample();
        let hits = journal.search("RUST");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].answer, "a language");
    }

    #[test]
    fn search_matches_answers_too() {
        let journal = sample();
        assert_eq!(journal.search("friday").len(), 1);
    }

    #[test]
    fn stats_rank_tools() {
        let journal = sample();
        let stats = journal.stats();
        assert_eq!(stats.total_turns, 3);
        assert_eq!(stats.most_used_tools[0], ("web_search".into(), 2));
        assert!(stats.first.is_some());
    }
}
