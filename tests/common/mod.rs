// Test doubles shared by the integration tests

#![allow(dead_code)]

use call_intent::completion::{ChatRequest, CompletionProvider};
use call_intent::error::{CompletionError, FetchError};
use call_intent::intent::{IntentClassifier, IntentSettings};
use call_intent::pipeline::BatchPipeline;
use call_intent::transcription::TranscriptionFetcher;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Canned transcriptions; unknown IDs answer with a 404 failure
#[derive(Default)]
pub struct FakeFetcher {
    texts: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            texts: entries
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TranscriptionFetcher for FakeFetcher {
    async fn fetch(&self, call_id: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(call_id.to_string());
        self.texts
            .get(call_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                call_id: call_id.to_string(),
                provider: "Fake",
                status: 404,
                body: String::new(),
            })
    }

    fn name(&self) -> &str {
        "Fake"
    }
}

/// Maps the transcription embedded in the prompt to a canned intent
#[derive(Default)]
pub struct FakeCompletion {
    intents: HashMap<String, Option<String>>,
    fail: bool,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl FakeCompletion {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            intents: entries
                .iter()
                .map(|(text, intent)| (text.to_string(), Some(intent.to_string())))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for FakeCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            return Err(CompletionError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        let prompt = &request.messages[1].content;
        let intent = self
            .intents
            .iter()
            .find(|(text, _)| prompt.ends_with(&format!("Transcription: \"{}\"", text)))
            .and_then(|(_, intent)| intent.clone());

        Ok(intent)
    }
}

pub fn write_input(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("call_ids.json");
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn pipeline(
    input: impl AsRef<Path>,
    fetcher: Arc<FakeFetcher>,
    completion: Arc<FakeCompletion>,
) -> BatchPipeline {
    let classifier = IntentClassifier::new(completion, IntentSettings::default());
    BatchPipeline::new(input.as_ref(), fetcher, classifier)
}
