use super::messages::{ChatRequest, ChatResponse};
use super::CompletionProvider;
use crate::config::{CompletionConfig, OPENAI_API_KEY_ENV};
use crate::error::CompletionError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// OpenAI-compatible chat completion client
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build completion HTTP client")?;

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH),
            api_key,
        })
    }

    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        let client = Self::new(&config.base_url, config.api_key.clone(), config.timeout())?;
        if !client.has_credentials() {
            warn!(
                "{} is not set. Intent analysis requests will be rejected by the provider.",
                OPENAI_API_KEY_ENV
            );
        }
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, CompletionError> {
        info!(
            "Sending chat completion to {} (model={}, max_tokens={})",
            self.endpoint, request.model, request.max_tokens
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI API error details: {} {}", status, body);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(parsed.first_content())
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
