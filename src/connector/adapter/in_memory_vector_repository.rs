use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::application::VectorRepository;
use crate::domain::{DomainError, EmbeddedRecord, Match};

/// Process-local cosine-similarity store for development and tests.
pub struct InMemoryVectorRepository {
    collection_name: String,
    dimensions: usize,
    records: Arc<RwLock<HashMap<Uuid, EmbeddedRecord>>>,
}

impl InMemoryVectorRepository {
    pub fn new(collection_name: impl Into<String>, dimensions: usize) -> Self {
        Self {
            collection_name: collection_name.into(),
            dimensions,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<EmbeddedRecord> {
        self.records.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl VectorRepository for InMemoryVectorRepository {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn upsert(&self, record: &EmbeddedRecord) -> Result<(), DomainError> {
        if record.dimensions() != self.dimensions {
            return Err(DomainError::vector_store(format!(
                "vector has {} dimensions, collection {} expects {}",
                record.dimensions(),
                self.collection_name,
                self.dimensions
            )));
        }

        self.records
            .write()
            .await
            .insert(record.id(), record.clone());

        debug!("Upserted {} into memory", record.id());
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Match>, DomainError> {
        let records = self.records.read().await;

        let mut scored: Vec<(&EmbeddedRecord, f32)> = records
            .values()
            .map(|record| (record, cosine_similarity(vector, record.vector())))
            .filter(|(_, score)| *score >= threshold)
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(record, score)| {
                Match::new(record.id().to_string(), record.payload().clone(), score)
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use serde_json::json;

    fn record_with(id: u128, vector: Vec<f32>, question: &str) -> EmbeddedRecord {
        let mut payload = Record::new();
        payload.insert("question".to_string(), json!(question));
        EmbeddedRecord::new(Uuid::from_u128(id), vector, payload)
    }

    #[tokio::test]
    async fn search_orders_by_score_and_applies_threshold() {
        let repo = InMemoryVectorRepository::new("test", 2);
        repo.upsert(&record_with(1, vec![1.0, 0.0], "x-axis")).await.unwrap();
        repo.upsert(&record_with(2, vec![0.7, 0.7], "diagonal")).await.unwrap();
        repo.upsert(&record_with(3, vec![0.0, 1.0], "y-axis")).await.unwrap();

        let matches = repo.search(&[1.0, 0.0], 0.5, 10).await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record()["question"], "x-axis");
        assert_eq!(matches[1].record()["question"], "diagonal");
        assert!(matches[0].score() >= matches[1].score());
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let repo = InMemoryVectorRepository::new("test", 2);
        for i in 0..5 {
            repo.upsert(&record_with(i, vec![1.0, 0.1 * i as f32], "q"))
                .await
                .unwrap();
        }

        let matches = repo.search(&[1.0, 0.0], 0.0, 3).await.unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn upsert_overwrites_same_id() {
        let repo = InMemoryVectorRepository::new("test", 2);
        repo.upsert(&record_with(7, vec![1.0, 0.0], "first")).await.unwrap();
        repo.upsert(&record_with(7, vec![0.0, 1.0], "second")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let stored = repo.get(Uuid::from_u128(7)).await.unwrap();
        assert_eq!(stored.payload()["question"], "second");
        assert_eq!(stored.vector(), &[0.0, 1.0]);
    }

    #[tokio::test]
    async fn upsert_rejects_wrong_dimensions() {
        let repo = InMemoryVectorRepository::new("test", 3);

        let err = repo
            .upsert(&record_with(1, vec![1.0, 0.0], "q"))
            .await
            .unwrap_err();
        assert!(err.is_vector_store_error());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_store_returns_no_matches() {
        let repo = InMemoryVectorRepository::new("test", 2);

        let matches = repo.search(&[1.0, 0.0], 0.0, 10).await.unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_mismatched_lengths_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
