use crate::error::PipelineError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Ordered call identifiers loaded for one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallIdBatch {
    pub call_ids: Vec<String>,
}

impl CallIdBatch {
    /// Read and validate the input file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file_name = file_name_of(path);

        let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                PipelineError::NotFound {
                    path: path.to_path_buf(),
                    file_name: file_name.clone(),
                }
            } else {
                PipelineError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let batch = Self::parse(&contents, &file_name)?;
        info!("Loaded {} call IDs from {}", batch.len(), path.display());
        Ok(batch)
    }

    /// Validate a `{ "callIds": [string, ...] }` document
    pub fn parse(contents: &str, file_name: &str) -> Result<Self, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidInput {
            file_name: file_name.to_string(),
            reason,
        };

        let document: Value =
            serde_json::from_str(contents).map_err(|source| PipelineError::Malformed {
                file_name: file_name.to_string(),
                source,
            })?;

        let entries = document
            .get("callIds")
            .filter(|v| !v.is_null())
            .ok_or_else(|| invalid("missing \"callIds\" field".to_string()))?
            .as_array()
            .ok_or_else(|| invalid("\"callIds\" is not an array".to_string()))?;

        if entries.is_empty() {
            return Err(invalid("\"callIds\" is empty".to_string()));
        }

        let call_ids = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(format!("callIds[{}] is not a string", idx)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { call_ids })
    }

    pub fn len(&self) -> usize {
        self.call_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.call_ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.call_ids.iter().map(String::as_str)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: PipelineError) -> String {
        match err {
            PipelineError::InvalidInput { reason, .. } => reason,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn parses_ordered_ids() {
        let batch = CallIdBatch::parse(r#"{"callIds": ["B", "A", "B"]}"#, "call_ids.json").unwrap();
        assert_eq!(batch.call_ids, vec!["B", "A", "B"]);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn rejects_missing_field() {
        let err = CallIdBatch::parse(r#"{"ids": []}"#, "call_ids.json").unwrap_err();
        assert_eq!(reason(err), "missing \"callIds\" field");

        let err = CallIdBatch::parse(r#"{"callIds": null}"#, "call_ids.json").unwrap_err();
        assert_eq!(reason(err), "missing \"callIds\" field");
    }

    #[test]
    fn rejects_non_array() {
        let err = CallIdBatch::parse(r#"{"callIds": "not-an-array"}"#, "call_ids.json").unwrap_err();
        assert_eq!(reason(err), "\"callIds\" is not an array");
    }

    #[test]
    fn rejects_empty_and_non_string_entries() {
        let err = CallIdBatch::parse(r#"{"callIds": []}"#, "call_ids.json").unwrap_err();
        assert_eq!(reason(err), "\"callIds\" is empty");

        let err = CallIdBatch::parse(r#"{"callIds": ["A", 7]}"#, "call_ids.json").unwrap_err();
        assert_eq!(reason(err), "callIds[1] is not a string");
    }

    #[test]
    fn top_level_array_is_invalid_input() {
        let err = CallIdBatch::parse(r#"["A", "B"]"#, "call_ids.json").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput { .. }));
    }

    #[test]
    fn broken_json_is_malformed() {
        let err = CallIdBatch::parse("{callIds: [", "call_ids.json").unwrap_err();
        assert!(matches!(err, PipelineError::Malformed { .. }));
    }
}
