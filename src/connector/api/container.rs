use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::AppConfig;
use crate::{
    CheckHealthUseCase, EmbeddingService, IdGenerator, InMemoryVectorRepository,
    LoadRecordsUseCase, MockEmbedding, OpenAiEmbedding, QdrantVectorRepository,
    QueryRecordsUseCase, UuidGenerator, VectorRepository,
};

pub struct ContainerConfig {
    pub app: AppConfig,
    pub mock_embeddings: bool,
    pub memory_storage: bool,
}

/// Owns the gateways and hands out use cases wired to them.
pub struct Container {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_repo: Arc<dyn VectorRepository>,
    id_generator: Arc<dyn IdGenerator>,
    config: AppConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let app = config.app;
        let dimensions = app.embedding.dimensions();

        let embedding_service: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::with_dimensions(dimensions))
        } else {
            let api_key = app
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY is required unless --mock-embeddings is set")?;
            debug!(
                "Using OpenAI embeddings ({}, {} dimensions)",
                app.embedding.model_name(),
                dimensions
            );
            Arc::new(OpenAiEmbedding::new(
                api_key,
                app.embedding.clone(),
                app.openai_base_url.clone(),
                app.request_timeout,
            )?)
        };

        let vector_repo: Arc<dyn VectorRepository> = if config.memory_storage {
            debug!("Using in-memory vector storage");
            Arc::new(InMemoryVectorRepository::new(
                app.collection_name.clone(),
                dimensions,
            ))
        } else {
            let url = app.qdrant_url();
            debug!("Connecting to Qdrant at {} collection {}", url, app.collection_name);
            Arc::new(QdrantVectorRepository::new(
                &url,
                app.qdrant_api_key.clone(),
                app.collection_name.clone(),
                dimensions,
                app.request_timeout,
            )?)
        };

        vector_repo.ensure_collection().await.with_context(|| {
            format!(
                "Failed to prepare collection {} at {}",
                app.collection_name,
                app.qdrant_url()
            )
        })?;

        Ok(Self::from_parts(
            embedding_service,
            vector_repo,
            Arc::new(UuidGenerator),
            app,
        ))
    }

    /// Wires already-built gateways; no collection setup is performed.
    pub fn from_parts(
        embedding_service: Arc<dyn EmbeddingService>,
        vector_repo: Arc<dyn VectorRepository>,
        id_generator: Arc<dyn IdGenerator>,
        config: AppConfig,
    ) -> Self {
        Self {
            embedding_service,
            vector_repo,
            id_generator,
            config,
        }
    }

    pub fn load_use_case(&self) -> LoadRecordsUseCase {
        LoadRecordsUseCase::new(
            self.vector_repo.clone(),
            self.embedding_service.clone(),
            self.id_generator.clone(),
        )
    }

    pub fn query_use_case(&self) -> QueryRecordsUseCase {
        QueryRecordsUseCase::new(self.vector_repo.clone(), self.embedding_service.clone())
    }

    pub fn health_use_case(&self) -> CheckHealthUseCase {
        CheckHealthUseCase::new(self.vector_repo.clone(), self.embedding_service.clone())
    }

    pub fn vector_repo(&self) -> Arc<dyn VectorRepository> {
        self.vector_repo.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn collection_name(&self) -> &str {
        self.vector_repo.collection_name()
    }
}
