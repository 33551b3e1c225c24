pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod intent;
pub mod pipeline;
pub mod text;
pub mod transcription;

pub use completion::{ChatMessage, ChatRequest, CompletionProvider, OpenAiClient};
pub use config::Config;
pub use error::{ClassifyError, CompletionError, FetchError, PipelineError};
pub use http::{create_router, AppState};
pub use intent::{IntentClassifier, IntentSettings};
pub use pipeline::{BatchPipeline, BatchReport, CallIdBatch, CallRecord};
pub use transcription::{HttpTranscriptionFetcher, TranscriptionFetcher, TranscriptionFetcherFactory};
