use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::application::{EmbeddingService, VectorRepository};
use crate::domain::{DomainError, Match, SearchQuery};

/// Matches for one query, with the threshold that was applied.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    query: String,
    matches: Vec<Match>,
    threshold: f32,
}

impl QueryOutcome {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn total(&self) -> usize {
        self.matches.len()
    }
}

/// Embeds a query and returns the stored records above the threshold.
///
/// All-or-nothing: the request fails if either the embedding or the search
/// fails. Validation runs before any external call.
pub struct QueryRecordsUseCase {
    vector_repo: Arc<dyn VectorRepository>,
    embedding_service: Arc<dyn EmbeddingService>,
}

impl QueryRecordsUseCase {
    pub fn new(
        vector_repo: Arc<dyn VectorRepository>,
        embedding_service: Arc<dyn EmbeddingService>,
    ) -> Self {
        Self {
            vector_repo,
            embedding_service,
        }
    }

    pub async fn execute(&self, query: SearchQuery) -> Result<QueryOutcome, DomainError> {
        query.validate()?;

        info!("Searching for: {}", query.summary());
        let start_time = Instant::now();

        let query_embedding = self.embedding_service.embed(query.query()).await?;
        let matches = self
            .vector_repo
            .search(&query_embedding, query.threshold(), query.limit())
            .await?;

        let duration = start_time.elapsed();
        info!(
            "Found {} matches in {:.2}s",
            matches.len(),
            duration.as_secs_f64()
        );

        Ok(QueryOutcome {
            query: query.query().to_string(),
            matches,
            threshold: query.threshold(),
        })
    }
}
