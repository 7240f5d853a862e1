use anyhow::Result;

use crate::{HealthReport, VectorRepository};

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let health = self.container.health_use_case().execute().await;
        let points = self.container.vector_repo().count().await?;
        Ok(self.format_stats(points, &health))
    }

    fn format_stats(&self, points: u64, health: &HealthReport) -> String {
        let config = self.container.config();
        format!(
            "PreMed RAG Statistics\n=====================\nCollection:   {}\nPoints:       {}\nModel:        {} ({} dims)\nVector store: {}\nEmbeddings:   {}",
            self.container.collection_name(),
            points,
            config.embedding.model_name(),
            config.embedding.dimensions(),
            health.vector_store,
            health.embedding_provider
        )
    }
}
