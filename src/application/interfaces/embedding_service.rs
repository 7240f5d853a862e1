use async_trait::async_trait;

use crate::domain::{DomainError, EmbeddingConfig};

/// Turns text into fixed-length vectors.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Per-item equivalent to calling [`EmbeddingService::embed`] for each text.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Cheap reachability probe. Must not trigger a billed embedding call.
    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn config(&self) -> &EmbeddingConfig;
}
