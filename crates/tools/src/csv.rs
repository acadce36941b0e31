//! CSV writer tool.
//!
//! Turns model-produced tables into CSV files under an output
//! directory. Accepts `|`-separated tables or `key: value` lines, with
//! an optional leading `filename: name.csv` line. Also supports `read`
//! and `list` operations.

use pcore::{Handler, Tool, handler};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The csv tool descriptor and handler.
pub fn tool(outdir: &Path) -> (Tool, Handler) {
    let manager = Arc::new(CsvManager::new(outdir));
    let spec = Tool::new(
        "csv",
        "Writes tabular data to a CSV file. Input: 'filename: name.csv' then a |-table \
         or 'key: value' lines; or 'read <name.csv>'; or 'list'.",
    );
    let handler = handler(move |input| {
        let manager = manager.clone();
        async move { manager.run(&input) }
    });
    (spec, handler)
}

/// Writes and reads CSV exports under one output directory.
#[derive(Debug, Clone)]
pub struct CsvManager {
    outdir: PathBuf,
}

impl CsvManager {
    /// Create a manager rooted at `outdir`.
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Execute one tool invocation.
    pub fn run(&self, input: &str) -> String {
        let input = input.trim();
        if let Some(name) = input.strip_prefix("read ") {
            return self.read(name.trim());
        }
        if input == "list" {
            return self.list();
        }

        match self.write(input) {
            Ok(message) => message,
            Err(err) => format!("CSV error: {err}"),
        }
    }

    /// Write the parsed rows to a file, returning a confirmation.
    pub fn write(&self, input: &str) -> anyhow::Result<String> {
        let (filename, data) = split_filename(input);
        let rows = parse_rows(data);
        anyhow::ensure!(!rows.is_empty(), "no tabular data found in input");

        std::fs::create_dir_all(&self.outdir)?;
        let path = self.outdir.join(&filename);

        let mut text = String::new();
        for row in &rows {
            let line: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
            text.push_str(&line.join(","));
            text.push('\n');
        }
        std::fs::write(&path, text)?;

        Ok(format!(
            "Wrote {} rows to {}",
            rows.len().saturating_sub(1),
            path.display()
        ))
    }

    fn read(&self, filename: &str) -> String {
        let path = self.outdir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => format!("CSV error: could not read {filename}: {err}"),
        }
    }

    fn list(&self) -> String {
        let entries = match std::fs::read_dir(&self.outdir) {
            Ok(entries) => entries,
            Err(_) => return "No CSV files yet.".into(),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".csv"))
            .collect();
        names.sort();

        if names.is_empty() {
            "No CSV files yet.".into()
        } else {
            names.join("\n")
        }
    }
}

/// Split an optional leading `filename: name.csv` line off the input.
fn split_filename(input: &str) -> (String, &str) {
    if let Some(rest) = input.strip_prefix("filename:") {
        if let Some((name, data)) = rest.split_once('\n') {
            let name = name.trim();
            if !name.is_empty() {
                return (ensure_csv(name), data);
            }
        }
    }
    ("export.csv".into(), input)
}

fn ensure_csv(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_owned()
    } else {
        format!("{name}.csv")
    }
}

/// Parse `|`-separated table rows, falling back to `key: value` lines.
fn parse_rows(data: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.iter().any(|line| line.contains('|')) {
        return lines
            .iter()
            .filter(|line| line.contains('|'))
            // skip markdown separator rows like |---|---|
            .filter(|line| !line.chars().all(|c| "|-: ".contains(c)))
            .map(|line| {
                line.trim_matches('|')
                    .split('|')
                    .map(|cell| cell.trim().to_owned())
                    .collect()
            })
            .collect();
    }

    let pairs: Vec<Vec<String>> = lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| vec![key.trim().to_owned(), value.trim().to_owned()])
        .collect();

    if pairs.is_empty() {
        Vec::new()
    } else {
        let mut rows = vec![vec!["key".to_owned(), "value".to_owned()]];
        rows.extend(pairs);
        rows
    }
}

fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pipe_table() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CsvManager::new(dir.path());
        let output = manager.run(
            "filename: laptops.csv\n\
             | name | price |\n\
             | --- | --- |\n\
             | A | 999 |\n\
             | B | 1, 299 |",
        );
        assert!(output.contains("2 rows"));

        let text = std::fs::read_to_string(dir.path().join("laptops.csv")).unwrap();
        assert!(text.starts_with("name,price\n"));
        assert!(text.contains("\"1, 299\""));
    }

    #[test]
    fn key_value_lines_become_two_columns() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CsvManager::new(dir.path());
        manager.run("total: 42\naverage: 3.5");
        let text = std::fs::read_to_string(dir.path().join("export.csv")).unwrap();
        assert_eq!(text, "key,value\ntotal,42\naverage,3.5\n");
    }

    #[test]
    fn empty_input_is_an_error_string() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CsvManager::new(dir.path());
        assert!(manager.run("nothing tabular here").starts_with("CSV error:"));
    }

    #[test]
    fn read_and_list_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CsvManager::new(dir.path());
        manager.run("filename: a.csv\nk: v");
        assert_eq!(manager.run("list"), "a.csv");
        assert!(manager.run("read a.csv").contains("k,v"));
        assert!(manager.run("read missing.csv").starts_with("CSV error:"));
    }

    #[test]
    fn filename_gets_csv_extension() {
        assert_eq!(split_filename("filename: out\nx: 1").0, "out.csv");
    }
}
