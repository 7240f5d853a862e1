use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::{EmbeddingService, IdGenerator, VectorRepository};
use crate::domain::{normalize_record, DomainError, EmbeddedRecord, IngestReport, Record};

/// Loads a JSON file of records, embeds each one and upserts it.
///
/// A record that fails to normalize, embed or upsert is logged and reported
/// in the [`IngestReport`]; the remaining records are still processed. File
/// and parse problems abort before any external call is made.
pub struct LoadRecordsUseCase {
    vector_repo: Arc<dyn VectorRepository>,
    embedding_service: Arc<dyn EmbeddingService>,
    id_generator: Arc<dyn IdGenerator>,
}

impl LoadRecordsUseCase {
    pub fn new(
        vector_repo: Arc<dyn VectorRepository>,
        embedding_service: Arc<dyn EmbeddingService>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            vector_repo,
            embedding_service,
            id_generator,
        }
    }

    pub async fn execute(&self, path: &str) -> Result<IngestReport, DomainError> {
        info!("Loading records from {}", path);
        let start_time = Instant::now();

        let records = read_records(Path::new(path)).await?;
        debug!("Parsed {} records from {}", records.len(), path);

        self.vector_repo.ensure_collection().await?;

        let mut report = IngestReport::new(self.vector_repo.collection_name());
        let mut first_error: Option<DomainError> = None;

        for (index, record) in records.into_iter().enumerate() {
            match self.load_record(record).await {
                Ok(id) => {
                    debug!("Stored record {} as {}", index, id);
                    report.record_success();
                }
                Err(e) => {
                    warn!("Failed to load record {}: {}", index, e);
                    report.record_failure(index, e.to_string());
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        let duration = start_time.elapsed();
        info!(
            "Loaded {} of {} records into {} in {:.2}s",
            report.loaded(),
            report.total(),
            report.collection_name(),
            duration.as_secs_f64()
        );

        if report.loaded() == 0 {
            if let Some(e) = first_error {
                return Err(e.with_prefix(&format!("0 of {} records loaded", report.total())));
            }
        }

        Ok(report)
    }

    async fn load_record(&self, record: Record) -> Result<Uuid, DomainError> {
        let text = normalize_record(&record)?;
        let vector = self.embedding_service.embed(&text).await?;
        let id = self.id_generator.next_id();

        let embedded = EmbeddedRecord::new(id, vector, record);
        self.vector_repo.upsert(&embedded).await?;

        Ok(id)
    }
}

/// Read and validate the whole file before anything is embedded.
///
/// The file must hold an array of objects; a single top-level object is
/// accepted as a one-element array.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, DomainError> {
    let not_found = |e: std::io::Error| {
        if e.kind() == ErrorKind::NotFound {
            DomainError::file_not_found(path.display().to_string())
        } else {
            DomainError::Io(e)
        }
    };

    if tokio::fs::metadata(path).await.map_err(not_found)?.is_dir() {
        return Err(DomainError::invalid_json(format!(
            "{} is a directory, not a JSON file",
            path.display()
        )));
    }

    let content = tokio::fs::read(path).await.map_err(not_found)?;

    // Bytes are parsed directly so non-UTF-8 content is a parse error.
    let value: Value =
        serde_json::from_slice(&content).map_err(|e| DomainError::invalid_json(e.to_string()))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(DomainError::invalid_json(format!(
                    "element {} is not a JSON object (found {})",
                    index,
                    json_type_name(&other)
                ))),
            })
            .collect(),
        Value::Object(record) => Ok(vec![record]),
        other => Err(DomainError::invalid_json(format!(
            "expected an array of objects, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[tokio::test]
    async fn read_records_accepts_array_of_objects() {
        let file = write_file(r#"[{"question": "a"}, {"question": "b"}]"#);

        let records = read_records(file.path()).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn read_records_wraps_single_object() {
        let file = write_file(r#"{"question": "only one"}"#);

        let records = read_records(file.path()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["question"], "only one");
    }

    #[tokio::test]
    async fn read_records_rejects_non_object_elements() {
        let file = write_file(r#"[{"question": "a"}, 7]"#);

        let err = read_records(file.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson(ref msg) if msg.contains("element 1")));
    }

    #[tokio::test]
    async fn read_records_rejects_malformed_json() {
        let file = write_file("[{\"question\": ");

        let err = read_records(file.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn read_records_rejects_scalar_documents() {
        let file = write_file("\"just a string\"");

        let err = read_records(file.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn read_records_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = read_records(&missing).await.unwrap_err();
        assert!(err.is_file_not_found());
    }

    #[tokio::test]
    async fn read_records_rejects_non_utf8_bytes() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[b'[', 0xff, 0xfe, b']']).expect("write");

        let err = read_records(file.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn read_records_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_records(dir.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson(ref msg) if msg.contains("directory")));
    }
}
