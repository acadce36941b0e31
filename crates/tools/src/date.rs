//! Current date/time tool.

use chrono::Local;
use pcore::{Handler, Tool, handler};

/// The date tool descriptor and handler.
pub fn tool() -> (Tool, Handler) {
    let spec = Tool::new(
        "current_date",
        "Gets the current date and time. Input: optional query like 'time' or 'year'.",
    );
    let handler = handler(|input| async move { run(&input) });
    (spec, handler)
}

/// Answer a date/time query against the local clock.
pub fn run(query: &str) -> String {
    let now = Local::now();
    let query = query.to_lowercase();

    if query.contains("time") {
        format!("Current time: {}", now.format("%H:%M:%S"))
    } else if query.contains("year") {
        format!("Current year: {}", now.format("%Y"))
    } else {
        format!(
            "Current date: {} (Time: {})",
            now.format("%Y-%m-%d"),
            now.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_query_returns_time() {
        assert!(run("what time is it").starts_with("Current time:"));
    }

    #[test]
    fn year_query_returns_year() {
        let output = run("the YEAR please");
        assert!(output.starts_with("Current year: 2"));
    }

    #[test]
    fn default_returns_date() {
        assert!(run("").starts_with("Current date:"));
    }
}
