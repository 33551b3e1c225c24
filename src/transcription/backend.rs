use super::http::HttpTranscriptionFetcher;
use super::provider::ProviderProfile;
use crate::config::{TranscriptionConfig, TranscriptionProviderKind};
use crate::error::FetchError;
use anyhow::Result;
use std::sync::Arc;

/// Source of call transcriptions
#[async_trait::async_trait]
pub trait TranscriptionFetcher: Send + Sync {
    /// Fetch the transcription text for one call
    ///
    /// A provider response without a transcription field is not an error: the
    /// returned text is a "no transcription content found" placeholder.
    async fn fetch(&self, call_id: &str) -> Result<String, FetchError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Transcription fetcher factory
pub struct TranscriptionFetcherFactory;

impl TranscriptionFetcherFactory {
    /// Create the fetcher selected by configuration
    pub fn create(config: &TranscriptionConfig) -> Result<Arc<dyn TranscriptionFetcher>> {
        let profile = match config.provider {
            TranscriptionProviderKind::Ringover => ProviderProfile::ringover(),
            TranscriptionProviderKind::Placeholder => ProviderProfile::placeholder(),
        };

        let fetcher = HttpTranscriptionFetcher::new(
            profile,
            config.base_url.as_deref(),
            config.api_key.clone(),
            config.timeout(),
        )?;

        Ok(Arc::new(fetcher))
    }
}
