use crate::error::{ClassifyError, FailureKind, FailureStage, FetchError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed description of why a record did not get a real intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub stage: FailureStage,
    pub kind: FailureKind,
    pub detail: String,
}

/// Result for a single call identifier
///
/// `transcription` and `intent` always hold display text; on failure they hold
/// the failure message and `failure` says which stage failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub call_id: String,
    pub transcription: String,
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ItemFailure>,
}

impl CallRecord {
    /// Build a record from the typed outcome of both stages
    ///
    /// A transcription failure takes precedence in `failure`.
    pub fn from_outcomes(
        call_id: impl Into<String>,
        transcription: Result<String, FetchError>,
        intent: Result<String, ClassifyError>,
    ) -> Self {
        let mut failure = None;

        let transcription = match transcription {
            Ok(text) => text,
            Err(e) => {
                failure = Some(ItemFailure {
                    stage: FailureStage::Transcription,
                    kind: e.kind(),
                    detail: e.detail(),
                });
                e.to_string()
            }
        };

        let intent = match intent {
            Ok(text) => text,
            Err(e) => {
                failure.get_or_insert_with(|| ItemFailure {
                    stage: FailureStage::Intent,
                    kind: e.kind(),
                    detail: e.detail(),
                });
                e.to_string()
            }
        };

        Self {
            call_id: call_id.into(),
            transcription,
            intent,
            failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Everything produced by one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub results: Vec<CallRecord>,
}

impl BatchReport {
    pub fn new(batch_id: Uuid, started_at: DateTime<Utc>, results: Vec<CallRecord>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let summary = BatchSummary {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        };

        Self {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            summary,
            results,
        }
    }
}
