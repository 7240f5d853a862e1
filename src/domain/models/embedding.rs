use serde::{Deserialize, Serialize};

/// Configuration for the embedding model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    model_name: String,
    dimensions: usize,
}

impl EmbeddingConfig {
    pub fn new(model_name: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model_name: model_name.into(),
            dimensions,
        }
    }

    /// Config for a known OpenAI model, falling back to 1536 dimensions for
    /// models this crate has not been told about.
    pub fn for_model(model_name: impl Into<String>) -> Self {
        let model_name = model_name.into();
        let dimensions = known_dimensions(&model_name).unwrap_or(1536);
        Self::new(model_name, dimensions)
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::for_model("text-embedding-3-large")
    }
}

pub fn known_dimensions(model_name: &str) -> Option<usize> {
    match model_name {
        "text-embedding-3-large" => Some(3072),
        "text-embedding-3-small" | "text-embedding-ada-002" => Some(1536),
        _ => None,
    }
}
