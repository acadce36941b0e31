//! HTTP request tool.
//!
//! GET/POST with an http/https scheme allow-list, a 30 second timeout,
//! and a 1 MiB response cap. Input: `GET https://...` or
//! `POST https://... {json body}`.

use llm::Client;
use pcore::{Handler, Tool, handler};
use std::sync::Arc;
use std::time::Duration;

const MAX_RESPONSE: usize = 1024 * 1024;
const TIMEOUT: Duration = Duration::from_secs(30);

/// The http tool descriptor and handler.
pub fn tool() -> (Tool, Handler) {
    let http = Arc::new(HttpTool::new());
    let spec = Tool::new(
        "http",
        "Makes an HTTP request. Input: 'GET <url>' or 'POST <url> <json body>'.",
    );
    let handler = handler(move |input| {
        let http = http.clone();
        async move { http.run(&input).await }
    });
    (spec, handler)
}

/// An HTTP client with classroom guard rails.
#[derive(Clone)]
pub struct HttpTool {
    client: Client,
}

impl Default for HttpTool {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTool {
    /// Create the tool with its timeout applied.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Execute one tool invocation.
    pub async fn run(&self, input: &str) -> String {
        match self.request(input).await {
            Ok(output) => output,
            Err(err) => format!("HTTP error: {err}"),
        }
    }

    async fn request(&self, input: &str) -> anyhow::Result<String> {
        let (method, rest) = input
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| anyhow::anyhow!("expected '<METHOD> <url>'"))?;
        let (url, body) = match rest.trim().split_once(char::is_whitespace) {
            Some((url, body)) => (url, Some(body.trim())),
            None => (rest.trim(), None),
        };

        anyhow::ensure!(
            url.starts_with("http://") || url.starts_with("https://"),
            "only http/https URLs are allowed, got '{url}'"
        );

        let request = match method.to_uppercase().as_str() {
            "GET" => self.client.get(url),
            "POST" => {
                let body: serde_json::Value = match body {
                    Some(text) => serde_json::from_str(text)
                        .map_err(|err| anyhow::anyhow!("invalid JSON body: {err}"))?,
                    None => serde_json::Value::Null,
                };
                self.client.post(url).json(&body)
            }
            other => anyhow::bail!("unsupported method '{other}', use GET or POST"),
        };

        let mut response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_owned();

        // Read incrementally so the cap bounds the download, not just the output.
        let mut bytes = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await? {
            truncated = append_capped(&mut bytes, &chunk, MAX_RESPONSE);
            if truncated {
                break;
            }
        }
        let body = String::from_utf8_lossy(&bytes);

        Ok(format!(
            "Status: {status}\nContent-Type: {content_type}\n\n{body}{}",
            if truncated { "\n... (truncated)" } else { "" }
        ))
    }
}

/// Appends a chunk to `buf`, keeping it within `limit` bytes.
/// Returns true once the cap has been reached.
fn append_capped(buf: &mut Vec<u8>, chunk: &[u8], limit: usize) -> bool {
    let room = limit.saturating_sub(buf.len());
    if chunk.len() > room {
        buf.extend_from_slice(&chunk[..room]);
        true
    } else {
        buf.extend_from_slice(chunk);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let http = HttpTool::new();
        let output = http.run("GET file:///etc/passwd").await;
        assert!(output.starts_with("HTTP error:"));
        assert!(output.contains("only http/https"));
    }

    #[tokio::test]
    async fn rejects_unknown_methods() {
        let http = HttpTool::new();
        let output = http.run("DELETE https://example.com").await;
        assert!(output.contains("unsupported method"));
    }

    #[tokio::test]
    async fn rejects_bad_json_body() {
        let http = HttpTool::new();
        let output = http.run("POST https://example.com {not json").await;
        assert!(output.contains("invalid JSON body"));
    }

    #[tokio::test]
    async fn rejects_missing_url() {
        let http = HttpTool::new();
        assert!(http.run("GET").await.starts_with("HTTP error:"));
    }

    #[test]
    fn append_capped_stops_at_the_byte_limit() {
        let mut buf = Vec::new();
        assert!(!append_capped(&mut buf, &[1; 6], 10));
        assert!(append_capped(&mut buf, &[2; 6], 10));
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn append_capped_allows_an_exact_fill() {
        let mut buf = Vec::new();
        assert!(!append_capped(&mut buf, &[1; 10], 10));
        assert_eq!(buf.len(), 10);
        // a further chunk past the boundary reports truncation
        assert!(append_capped(&mut buf, &[2; 1], 10));
        assert_eq!(buf.len(), 10);
    }
}
