//! Keyword tool dispatch.
//!
//! Agent loops pick a tool by substring matching on the lowercased task,
//! first match wins. Factual lookups win ties by defaulting to
//! `web_search` when nothing matches.

use pcore::{Handler, Tool};
use std::collections::BTreeMap;

const SEARCH_KEYWORDS: &[&str] = &["search", "find", "research", "look up", "information about"];
const CALC_KEYWORDS: &[&str] = &["calculate", "compute", "average", "math", "sum"];
const DATE_KEYWORDS: &[&str] = &["date", "time", "current", "today"];

/// Pick a tool name for a task by keyword matching.
pub fn select_tool(task: &str) -> &'static str {
    let task = task.to_lowercase();
    if SEARCH_KEYWORDS.iter().any(|k| task.contains(k)) {
        "web_search"
    } else if CALC_KEYWORDS.iter().any(|k| task.contains(k)) {
        "calculator"
    } else if DATE_KEYWORDS.iter().any(|k| task.contains(k)) {
        "current_date"
    } else {
        "web_search"
    }
}

/// Run a named tool from the registry against an input string.
///
/// Unknown tools produce a readable result string instead of an error, so
/// a model hallucinating a tool name gets corrective feedback in its next
/// observation.
pub async fn run_tool(
    tools: &BTreeMap<String, (Tool, Handler)>,
    name: &str,
    input: &str,
) -> String {
    match tools.get(name) {
        Some((_, handler)) => handler(input.to_owned()).await,
        None => format!("tool {name} not available"),
    }
}

/// Select a tool for the task by keyword, then run it with the task as
/// input.
pub async fn dispatch(tools: &BTreeMap<String, (Tool, Handler)>, task: &str) -> (String, String) {
    let name = select_tool(task);
    tracing::debug!("dispatching task to {name}: {task}");
    let result = run_tool(tools, name, task).await;
    (name.to_owned(), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcore::handler;

    fn registry() -> BTreeMap<String, (Tool, Handler)> {
        let mut tools = BTreeMap::new();
        for name in ["web_search", "calculator", "current_date"] {
            tools.insert(
                name.to_owned(),
                (
                    Tool::new(name, ""),
                    handler(move |input| async move { format!("{name}: {input}") }),
                ),
            );
        }
        tools
    }

    #[test]
    fn keywords_route_to_tools() {
        assert_eq!(select_tool("Search for the largest cities"), "web_search");
        assert_eq!(select_tool("Calculate the average of these"), "calculator");
        assert_eq!(select_tool("What is today?"), "current_date");
    }

    #[test]
    fn first_match_wins() {
        // "find" matches before "calculate"
        assert_eq!(select_tool("find the sum and calculate it"), "web_search");
    }

    #[test]
    fn default_is_search() {
        assert_eq!(select_tool("who wrote Hamlet"), "web_search");
    }

    #[tokio::test]
    async fn dispatch_runs_selected_tool() {
        let tools = registry();
        let (name, result) = dispatch(&tools, "calculate 2 + 2").await;
        assert_eq!(name, "calculator");
        assert_eq!(result, "calculator: calculate 2 + 2");
    }

    #[tokio::test]
    async fn unknown_tool_reports_not_available() {
        let tools = BTreeMap::new();
        let result = run_tool(&tools, "teleport", "home").await;
        assert_eq!(result, "tool teleport not available");
    }
}
