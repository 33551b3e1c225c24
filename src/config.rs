use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the Ringover bearer token
pub const RINGOVER_API_KEY_ENV: &str = "RINGOVER_API_KEY";

/// Environment variable holding the OpenAI bearer token
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the HTTP port
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub input: InputConfig,
    pub transcription: TranscriptionConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON document of the form `{ "callIds": [...] }`, read on every batch
    pub call_ids_path: String,
}

/// Which transcription backend answers `fetch(call_id)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderKind {
    Ringover,
    Placeholder,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub provider: TranscriptionProviderKind,
    /// Overrides the provider's default base URL
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "call-intent".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            call_ids_path: "call_ids.json".to_string(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderKind::Ringover,
            base_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            max_tokens: 50,
            timeout_secs: 30,
        }
    }
}

impl TranscriptionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from an optional config file, then `CALL_INTENT__*` variables,
    /// then the well-known provider variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CALL_INTENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        cfg.apply_env(|key| std::env::var(key).ok())?;

        Ok(cfg)
    }

    /// Apply the provider credentials and port override from the environment.
    /// Blank values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(RINGOVER_API_KEY_ENV) {
            self.transcription.api_key = Some(key.trim().to_string());
        }
        if let Some(key) = lookup(OPENAI_API_KEY_ENV) {
            self.completion.api_key = Some(key.trim().to_string());
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.service.http.port = port
                .trim()
                .parse()
                .with_context(|| format!("{} is not a valid port: {}", PORT_ENV, port))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_service_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.service.http.port, 3000);
        assert_eq!(cfg.input.call_ids_path, "call_ids.json");
        assert_eq!(cfg.transcription.provider, TranscriptionProviderKind::Ringover);
        assert_eq!(cfg.completion.model, "gpt-3.5-turbo");
        assert_eq!(cfg.completion.temperature, 0.5);
        assert_eq!(cfg.completion.max_tokens, 50);
    }

    #[test]
    fn env_overrides_credentials_and_port() {
        let env: HashMap<&str, &str> = [
            (RINGOVER_API_KEY_ENV, "ring-key"),
            (OPENAI_API_KEY_ENV, " sk-test "),
            (PORT_ENV, "8081"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.transcription.api_key.as_deref(), Some("ring-key"));
        assert_eq!(cfg.completion.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.service.http.port, 8081);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env(|_| Some("   ".to_string())).unwrap();

        assert!(cfg.transcription.api_key.is_none());
        assert_eq!(cfg.service.http.port, 3000);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let result = cfg.apply_env(|k| (k == PORT_ENV).then(|| "not-a-port".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn provider_kind_parses_lowercase() {
        let kind: TranscriptionProviderKind = serde_json::from_str("\"placeholder\"").unwrap();
        assert_eq!(kind, TranscriptionProviderKind::Placeholder);
    }
}
