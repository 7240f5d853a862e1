use std::sync::Arc;

use futures_util::future::join;
use tracing::warn;

use crate::application::{EmbeddingService, VectorRepository};
use crate::domain::{DependencyStatus, HealthReport};

/// Probes both external dependencies concurrently.
pub struct CheckHealthUseCase {
    vector_repo: Arc<dyn VectorRepository>,
    embedding_service: Arc<dyn EmbeddingService>,
}

impl CheckHealthUseCase {
    pub fn new(
        vector_repo: Arc<dyn VectorRepository>,
        embedding_service: Arc<dyn EmbeddingService>,
    ) -> Self {
        Self {
            vector_repo,
            embedding_service,
        }
    }

    pub async fn execute(&self) -> HealthReport {
        let (store, provider) = join(
            self.vector_repo.health_check(),
            self.embedding_service.health_check(),
        )
        .await;

        let vector_store = match store {
            Ok(()) => DependencyStatus::Ok,
            Err(e) => {
                warn!("Vector store health check failed: {}", e);
                DependencyStatus::Unreachable
            }
        };

        let embedding_provider = match provider {
            Ok(()) => DependencyStatus::Ok,
            Err(e) => {
                warn!("Embedding provider health check failed: {}", e);
                DependencyStatus::Unreachable
            }
        };

        HealthReport {
            vector_store,
            embedding_provider,
        }
    }
}
