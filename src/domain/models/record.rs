use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One JSON object from an ingest file. No schema is enforced beyond
/// "is a JSON object".
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A record paired with its assigned id and embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    id: Uuid,
    vector: Vec<f32>,
    payload: Record,
}

impl EmbeddedRecord {
    pub fn new(id: Uuid, vector: Vec<f32>, payload: Record) -> Self {
        Self {
            id,
            vector,
            payload,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn payload(&self) -> &Record {
        &self.payload
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}
