use async_trait::async_trait;

use crate::domain::{DomainError, EmbeddedRecord, Match};

/// Vector storage and similarity search operations.
///
/// Scores are cosine similarities; `search` keeps matches with
/// `score >= threshold`, best first, and returns an empty list when none
/// qualify.
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create the collection if it does not exist yet. Idempotent.
    async fn ensure_collection(&self) -> Result<(), DomainError>;

    /// Insert or overwrite the point with the record's id.
    async fn upsert(&self, record: &EmbeddedRecord) -> Result<(), DomainError>;

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Match>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn health_check(&self) -> Result<(), DomainError>;

    fn collection_name(&self) -> &str;
}
