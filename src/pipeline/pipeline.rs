use super::batch::CallIdBatch;
use super::record::{BatchReport, CallRecord};
use crate::completion::OpenAiClient;
use crate::config::{Config, OPENAI_API_KEY_ENV};
use crate::error::{ClassifyError, PipelineError};
use crate::intent::{IntentClassifier, IntentSettings};
use crate::transcription::{TranscriptionFetcher, TranscriptionFetcherFactory};
use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Fetch-then-classify pipeline over the call IDs in the input file
///
/// Holds no per-run state: concurrent runs each read the input file and walk
/// their own loop.
pub struct BatchPipeline {
    input_path: PathBuf,
    fetcher: Arc<dyn TranscriptionFetcher>,
    classifier: IntentClassifier,
}

impl BatchPipeline {
    pub fn new(
        input_path: impl Into<PathBuf>,
        fetcher: Arc<dyn TranscriptionFetcher>,
        classifier: IntentClassifier,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            fetcher,
            classifier,
        }
    }

    /// Wire the real providers from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = TranscriptionFetcherFactory::create(&config.transcription)?;
        let completion = Arc::new(OpenAiClient::from_config(&config.completion)?);
        let classifier = IntentClassifier::new(completion, IntentSettings::from(&config.completion));

        info!(
            "Pipeline ready: input={}, transcription={}, model={}",
            config.input.call_ids_path,
            fetcher.name(),
            config.completion.model
        );

        Ok(Self::new(&config.input.call_ids_path, fetcher, classifier))
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Run one batch over the current contents of the input file
    ///
    /// Calls are processed strictly one after another and results keep the
    /// input order. Fails only if the input cannot be loaded.
    pub async fn process_batch(&self) -> Result<BatchReport, PipelineError> {
        let batch = CallIdBatch::load(&self.input_path).await?;

        let batch_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Batch {}: processing call IDs {:?}", batch_id, batch.call_ids);

        if !self.classifier.has_credentials() {
            warn!(
                "{} is not configured. Intent analysis will likely fail for this batch.",
                OPENAI_API_KEY_ENV
            );
        }

        let mut results = Vec::with_capacity(batch.len());
        for call_id in batch.iter() {
            results.push(self.process_call(call_id).await);
        }

        let report = BatchReport::new(batch_id, started_at, results);
        info!(
            "Batch {} finished: {} calls, {} succeeded, {} failed",
            batch_id, report.summary.total, report.summary.succeeded, report.summary.failed
        );

        Ok(report)
    }

    /// Fetch and classify a single call
    pub async fn process_call(&self, call_id: &str) -> CallRecord {
        let transcription = self.fetcher.fetch(call_id).await;

        let intent = match &transcription {
            Ok(text) => self.classifier.classify(text).await,
            Err(e) => {
                warn!("Skipping intent analysis for {}: {}", call_id, e);
                Err(ClassifyError::TranscriptionUnavailable)
            }
        };

        CallRecord::from_outcomes(call_id, transcription, intent)
    }
}
