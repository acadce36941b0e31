//! Mock email tool.
//!
//! There is no SMTP here: "sending" appends a JSON record to an outbox
//! file and returns a confirmation, which is all the labs need to
//! demonstrate a side-effecting tool.

use chrono::Utc;
use pcore::{Handler, Tool, handler};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The email tool descriptor and handler.
pub fn tool(outbox_path: impl AsRef<Path>) -> (Tool, Handler) {
    let outbox = Arc::new(Outbox::new(outbox_path.as_ref()));
    let spec = Tool::new(
        "email",
        "Sends an email (mock). Input lines: 'to: addr', 'subject: text', 'body: text'; \
         or 'list' to show sent mail.",
    );
    let handler = handler(move |input| {
        let outbox = outbox.clone();
        async move { outbox.run(&input) }
    });
    (spec, handler)
}

/// A sent email record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Email {
    /// The recipient address.
    pub to: String,
    /// The subject line.
    pub subject: String,
    /// The body text.
    pub body: String,
    /// When the mail was "sent".
    pub sent_at: chrono::DateTime<Utc>,
}

/// A JSON-file outbox of mock-sent email.
#[derive(Debug, Clone)]
pub struct Outbox {
    path: PathBuf,
}

impl Outbox {
    /// Create an outbox at the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Execute one tool invocation.
    pub fn run(&self, input: &str) -> String {
        if input.trim() == "list" {
            return self.list();
        }

        match parse_request(input) {
            Ok(email) => match self.append(email) {
                Ok(confirmation) => confirmation,
                Err(err) => format!("Email error: {err}"),
            },
            Err(err) => format!("Email error: {err}"),
        }
    }

    fn append(&self, email: Email) -> anyhow::Result<String> {
        let mut sent = self.sent();
        let confirmation = format!("Email sent to {} (subject: {})", email.to, email.subject);
        sent.push(email);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&sent)?)?;
        Ok(confirmation)
    }

    /// All mail in the outbox.
    pub fn sent(&self) -> Vec<Email> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn list(&self) -> String {
        let sent = self.sent();
        if sent.is_empty() {
            return "Outbox is empty.".into();
        }
        sent.iter()
            .map(|email| format!("{} - {} ({})", email.to, email.subject, email.sent_at))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse `to:/subject:/body:` lines out of a request.
fn parse_request(input: &str) -> Result<Email, String> {
    let mut to = None;
    let mut subject = None;
    let mut body: Option<String> = None;

    for line in input.lines() {
        let trimmed = line.trim();
        if let Some(value) = strip_field(trimmed, "to") {
            to = Some(value.to_owned());
        } else if let Some(value) = strip_field(trimmed, "subject") {
            subject = Some(value.to_owned());
        } else if let Some(value) = strip_field(trimmed, "body") {
            body = Some(value.to_owned());
        } else if let Some(text) = &mut body {
            // continuation lines extend the body
            text.push('\n');
            text.push_str(trimmed);
        }
    }

    let to = to.ok_or("missing 'to:' line")?;
    if !to.contains('@') {
        return Err(format!("invalid recipient address '{to}'"));
    }

    Ok(Email {
        to,
        subject: subject.unwrap_or_else(|| "(no subject)".into()),
        body: body.unwrap_or_default(),
        sent_at: Utc::now(),
    })
}

fn strip_field<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    if line.len() < field.len() || !line[..field.len()].eq_ignore_ascii_case(field) {
        return None;
    }
    line[field.len()..].strip_prefix(':').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_request() {
        let email = parse_request(
            "to: ada@example.com\nsubject: Results\nbody: See attached.\nMore detail.",
        )
        .unwrap();
        assert_eq!(email.to, "ada@example.com");
        assert_eq!(email.subject, "Results");
        assert_eq!(email.body, "See attached.\nMore detail.");
    }

    #[test]
    fn missing_recipient_is_an_error() {
        assert!(parse_request("subject: hi").is_err());
        assert!(parse_request("to: not-an-address").is_err());
    }

    #[test]
    fn outbox_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::new(dir.path().join("outbox.json"));

        let first = outbox.run("to: a@example.com\nsubject: one");
        assert!(first.contains("a@example.com"));
        outbox.run("to: b@example.com\nsubject: two");

        let sent = outbox.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].subject, "two");
    }

    #[test]
    fn list_shows_sent_mail() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::new(dir.path().join("outbox.json"));
        assert_eq!(outbox.run("list"), "Outbox is empty.");
        outbox.run("to: a@example.com\nsubject: hello");
        assert!(outbox.run("list").contains("hello"));
    }

    #[test]
    fn bad_request_is_an_error_string() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::new(dir.path().join("outbox.json"));
        assert!(outbox.run("gibberish").starts_with("Email error:"));
    }
}
