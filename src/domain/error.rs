use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid JSON file: {0}")]
    InvalidJson(String),

    #[error("JSON file not found: {0}")]
    FileNotFound(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::InvalidJson(msg.into())
    }

    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingProvider(msg.into())
    }

    pub fn vector_store(msg: impl Into<String>) -> Self {
        Self::VectorStore(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Rebuild the error with `prefix` prepended to its message, keeping the kind.
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::InvalidRecord(msg) => Self::InvalidRecord(format!("{prefix}: {msg}")),
            Self::InvalidJson(msg) => Self::InvalidJson(format!("{prefix}: {msg}")),
            Self::FileNotFound(msg) => Self::FileNotFound(format!("{prefix}: {msg}")),
            Self::EmbeddingProvider(msg) => Self::EmbeddingProvider(format!("{prefix}: {msg}")),
            Self::VectorStore(msg) => Self::VectorStore(format!("{prefix}: {msg}")),
            Self::Validation(msg) => Self::Validation(format!("{prefix}: {msg}")),
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), format!("{prefix}: {e}"))),
            Self::Internal(msg) => Self::Internal(format!("{prefix}: {msg}")),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    pub fn is_embedding_error(&self) -> bool {
        matches!(self, Self::EmbeddingProvider(_))
    }

    pub fn is_vector_store_error(&self) -> bool {
        matches!(self, Self::VectorStore(_))
    }
}
