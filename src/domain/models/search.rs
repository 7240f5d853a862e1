use serde::{Deserialize, Serialize};

use super::Record;
use crate::domain::DomainError;

pub const DEFAULT_THRESHOLD: f32 = 0.75;
pub const DEFAULT_LIMIT: usize = 10;
/// Server-side maximum for the number of matches a single query can return.
pub const MAX_LIMIT: usize = 100;

/// A stored record returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    id: String,
    record: Record,
    score: f32,
}

impl Match {
    pub fn new(id: impl Into<String>, record: Record, score: f32) -> Self {
        Self {
            id: id.into(),
            record,
            score,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn is_relevant(&self, threshold: f32) -> bool {
        self.score >= threshold
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    query: String,
    threshold: f32,
    limit: usize,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Limits above [`MAX_LIMIT`] are clamped; zero is left for `validate` to reject.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.query.trim().is_empty() {
            return Err(DomainError::validation("query must not be empty"));
        }

        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(DomainError::validation(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }

        if self.limit == 0 {
            return Err(DomainError::validation("limit must be greater than 0"));
        }

        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "query=\"{}\", threshold={:.2}, limit={}",
            self.query, self.threshold, self.limit
        )
    }
}
