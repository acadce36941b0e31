//! Configuration for the CLI.
//!
//! `~/.config/primer.toml`: default request params plus a `[key]` table
//! per provider. API keys resolve from the config first, then from the
//! provider's environment variable; absence is an error naming the
//! variable to set.

use anyhow::{Context, Result};
use llm::Params;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, path::PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default request parameters
    pub params: Params,

    /// The API keys per provider
    pub key: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            params: Params::new("claude-3-haiku-20240307"),
            key: [("anthropic".to_string(), String::new())]
                .into_iter()
                .collect(),
        }
    }
}

impl Config {
    /// The configuration file path.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("primer.toml")
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path())
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Save the configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path())
    }

    /// Save the configuration to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("writing config {}", path.display()))?;
        tracing::info!("configuration saved to {}", path.display());
        Ok(())
    }

    /// Resolve the API key for a provider: config `[key]` entry first,
    /// then the provider's environment variable.
    pub fn key_for(&self, provider: &str) -> Result<String> {
        if let Some(key) = self.key.get(provider)
            && !key.is_empty()
        {
            return Ok(key.clone());
        }

        let var = match provider {
            "openai" => "OPENAI_API_KEY",
            "anthropic" => "ANTHROPIC_API_KEY",
            "google" => "GOOGLE_API_KEY",
            other => anyhow::bail!("no key table entry for provider '{other}'"),
        };
        std::env::var(var).with_context(|| {
            format!(
                "no API key for {provider}: set {var} or add a [key] entry in {}",
                Self::path().display()
            )
        })
    }
}
