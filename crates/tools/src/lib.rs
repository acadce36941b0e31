//! Builtin tools for primer agents.
//!
//! Each module exposes a constructor returning a `(Tool, Handler)` pair
//! for runtime registration. Handlers convert their own failures into
//! readable result strings, so a broken tool never aborts an agent loop.

pub use calc::evaluate;
pub use csv::CsvManager;
pub use email::Outbox;
pub use http::HttpTool;
pub use search::Search;

pub mod calc;
pub mod csv;
pub mod date;
pub mod email;
pub mod http;
pub mod search;

use pcore::{Handler, Tool};
use std::path::Path;

/// The standard tool set for agent loops: search, calculator, date.
pub fn agent_tools() -> Vec<(Tool, Handler)> {
    vec![search::tool(), calc::tool(), date::tool()]
}

/// The full tool set, including the file-writing tools rooted at
/// `outdir`.
pub fn all_tools(outdir: &Path) -> Vec<(Tool, Handler)> {
    let mut tools = agent_tools();
    tools.push(csv::tool(outdir));
    tools.push(email::tool(outdir.join("outbox.json")));
    tools.push(http::tool());
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_tool_names() {
        let names: Vec<String> = agent_tools().into_iter().map(|(t, _)| t.name).collect();
        assert_eq!(names, vec!["web_search", "calculator", "current_date"]);
    }

    #[test]
    fn all_tools_extend_agent_tools() {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<String> = all_tools(dir.path())
            .into_iter()
            .map(|(t, _)| t.name)
            .collect();
        assert!(names.contains(&"csv".to_string()));
        assert!(names.contains(&"email".to_string()));
        assert!(names.contains(&"http".to_string()));
    }
}
