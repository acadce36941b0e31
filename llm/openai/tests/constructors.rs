//! Tests for OpenAI provider constructors.

use primer_openai::{OpenAi, endpoint};

#[test]
fn api_constructor_uses_default_endpoint() {
    let client = llm::Client::new();
    let provider = OpenAi::api(client, "test-key").expect("provider");
    assert_eq!(provider.endpoint(), endpoint::OPENAI);
}

#[test]
fn custom_constructor_sets_endpoint() {
    let client = llm::Client::new();
    let custom = "http://localhost:9999/v1/chat/completions";
    let provider = OpenAi::custom(client, "test-key", custom).expect("provider");
    assert_eq!(provider.endpoint(), custom);
}

#[test]
fn ollama_constructor_needs_no_key() {
    let client = llm::Client::new();
    let provider = OpenAi::ollama(client).expect("provider");
    assert_eq!(provider.endpoint(), endpoint::OLLAMA);
}
