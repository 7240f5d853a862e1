//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use premed_rag::{
    DomainError, EmbeddedRecord, EmbeddingConfig, EmbeddingService, InMemoryVectorRepository,
    Match, MockEmbedding, VectorRepository,
};

pub const DIMENSIONS: usize = 64;
pub const COLLECTION: &str = "test_questions";

/// Mock embedder that counts calls and fails for texts containing `FAIL`.
pub struct CountingEmbedding {
    inner: MockEmbedding,
    calls: AtomicUsize,
}

impl CountingEmbedding {
    pub fn new() -> Self {
        Self {
            inner: MockEmbedding::with_dimensions(DIMENSIONS),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for CountingEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("FAIL") {
            return Err(DomainError::embedding("provider rejected the input"));
        }
        self.inner.embed(text).await
    }

    fn config(&self) -> &EmbeddingConfig {
        self.inner.config()
    }
}

/// In-memory store that counts upserts.
pub struct CountingRepository {
    inner: InMemoryVectorRepository,
    upserts: AtomicUsize,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryVectorRepository::new(COLLECTION, DIMENSIONS),
            upserts: AtomicUsize::new(0),
        }
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorRepository for CountingRepository {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        self.inner.ensure_collection().await
    }

    async fn upsert(&self, record: &EmbeddedRecord) -> Result<(), DomainError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert(record).await
    }

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Match>, DomainError> {
        self.inner.search(vector, threshold, limit).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.inner.count().await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.inner.health_check().await
    }

    fn collection_name(&self) -> &str {
        self.inner.collection_name()
    }
}

/// A vector store that is never reachable.
pub struct UnreachableRepository;

#[async_trait]
impl VectorRepository for UnreachableRepository {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        Err(DomainError::vector_store("connection refused"))
    }

    async fn upsert(&self, _record: &EmbeddedRecord) -> Result<(), DomainError> {
        Err(DomainError::vector_store("connection refused"))
    }

    async fn search(
        &self,
        _vector: &[f32],
        _threshold: f32,
        _limit: usize,
    ) -> Result<Vec<Match>, DomainError> {
        Err(DomainError::vector_store("connection refused"))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(DomainError::vector_store("connection refused"))
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Err(DomainError::vector_store("connection refused"))
    }

    fn collection_name(&self) -> &str {
        COLLECTION
    }
}

pub fn json_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

pub fn path_of(file: &tempfile::NamedTempFile) -> String {
    file.path().to_string_lossy().to_string()
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
