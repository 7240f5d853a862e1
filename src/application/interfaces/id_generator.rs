use uuid::Uuid;

/// Source of identifiers for newly ingested records.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}
