//! Error types for the call-intent pipeline
//!
//! Two tiers:
//! - `PipelineError` aborts a whole batch and is reported to the caller
//! - `FetchError` / `ClassifyError` stay attached to a single call record
//!
//! The `Display` text of the item-level errors is the exact message placed in
//! the record's `transcription` / `intent` fields.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Every transcription failure message starts with this text
pub const TRANSCRIPTION_FAILURE_PREFIX: &str = "Failed to fetch transcription";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch transcription for {call_id}: {env_var} not configured.")]
    MissingCredential {
        call_id: String,
        env_var: &'static str,
    },

    #[error("Failed to fetch transcription for {call_id} from {provider}. Status: {status}")]
    Status {
        call_id: String,
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to fetch transcription for {call_id} from {provider}.")]
    Transport {
        call_id: String,
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion provider returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Could not determine intent due to transcription failure.")]
    TranscriptionUnavailable,

    #[error("Failed to get intent from OpenAI.")]
    Provider(#[source] CompletionError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error: {file_name} not found.")]
    NotFound { path: PathBuf, file_name: String },

    #[error("Invalid format in {file_name}. Expected an object with a \"callIds\" array.")]
    InvalidInput { file_name: String, reason: String },

    #[error("{file_name} is not valid JSON: {source}")]
    Malformed {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pipeline stage an item-level failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Transcription,
    Intent,
}

/// Machine-readable category of an item-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingCredential,
    HttpStatus,
    Transport,
    TranscriptionUnavailable,
    Provider,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::MissingCredential { .. } => FailureKind::MissingCredential,
            FetchError::Status { .. } => FailureKind::HttpStatus,
            FetchError::Transport { .. } => FailureKind::Transport,
        }
    }

    /// Underlying cause, for logs and the record's failure detail
    pub fn detail(&self) -> String {
        match self {
            FetchError::MissingCredential { env_var, .. } => format!("{} is not set", env_var),
            FetchError::Status { status, body, .. } if body.is_empty() => {
                format!("HTTP {}", status)
            }
            FetchError::Status { status, body, .. } => format!("HTTP {}: {}", status, body),
            FetchError::Transport { source, .. } => source.to_string(),
        }
    }
}

impl ClassifyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClassifyError::TranscriptionUnavailable => FailureKind::TranscriptionUnavailable,
            ClassifyError::Provider(_) => FailureKind::Provider,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ClassifyError::TranscriptionUnavailable => {
                "transcription stage did not produce text".to_string()
            }
            ClassifyError::Provider(source) => source.to_string(),
        }
    }
}
