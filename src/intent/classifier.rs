use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::completion::{ChatMessage, ChatRequest, CompletionProvider};
use crate::config::CompletionConfig;
use crate::error::{ClassifyError, TRANSCRIPTION_FAILURE_PREFIX};
use crate::text::preview;
use std::sync::Arc;
use tracing::{error, info};

/// Returned when the provider answers without usable content
pub const NO_INTENT_IDENTIFIED: &str = "No intent identified.";

/// Sampling parameters sent with every classification request
#[derive(Debug, Clone, PartialEq)]
pub struct IntentSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for IntentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            max_tokens: 50,
        }
    }
}

impl From<&CompletionConfig> for IntentSettings {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Asks a completion provider for the customer's intent
#[derive(Clone)]
pub struct IntentClassifier {
    provider: Arc<dyn CompletionProvider>,
    settings: IntentSettings,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: IntentSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &IntentSettings {
        &self.settings
    }

    pub fn has_credentials(&self) -> bool {
        self.provider.has_credentials()
    }

    pub fn build_request(&self, transcription: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_user_prompt(transcription)),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Classify one transcription
    ///
    /// Text carrying the transcription-failure prefix never reaches the provider.
    pub async fn classify(&self, transcription: &str) -> Result<String, ClassifyError> {
        info!(
            "Getting intent for transcription: \"{}...\"",
            preview(transcription, 50)
        );

        if transcription.starts_with(TRANSCRIPTION_FAILURE_PREFIX) {
            return Err(ClassifyError::TranscriptionUnavailable);
        }

        let request = self.build_request(transcription);
        let content = self.provider.complete(&request).await.map_err(|e| {
            error!("Error getting intent from OpenAI: {}", e);
            ClassifyError::Provider(e)
        })?;

        let intent = content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_INTENT_IDENTIFIED.to_string());

        info!(
            "Intent for \"{}...\": {}",
            preview(transcription, 30),
            intent
        );

        Ok(intent)
    }
}
