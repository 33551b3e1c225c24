//! Chat-completion providers used by the intent classifier

mod messages;
mod openai;

pub use messages::{ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse, Role};
pub use openai::OpenAiClient;

use crate::error::CompletionError;

/// A chat-completion endpoint
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one request and return the first choice's content, if any
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, CompletionError>;

    /// Whether a credential is configured
    fn has_credentials(&self) -> bool {
        true
    }
}
