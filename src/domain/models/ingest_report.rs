use serde::{Deserialize, Serialize};

/// A record that could not be loaded, by its position in the input array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub index: usize,
    pub error: String,
}

/// Outcome of loading one JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    loaded: usize,
    failures: Vec<RecordFailure>,
    collection_name: String,
}

impl IngestReport {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            loaded: 0,
            failures: Vec::new(),
            collection_name: collection_name.into(),
        }
    }

    pub fn record_success(&mut self) {
        self.loaded += 1;
    }

    pub fn record_failure(&mut self, index: usize, error: impl Into<String>) {
        self.failures.push(RecordFailure {
            index,
            error: error.into(),
        });
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.loaded + self.failures.len()
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Successfully loaded {} objects from JSON file", self.loaded)
        } else {
            format!(
                "Loaded {} of {} objects from JSON file ({} failed)",
                self.loaded,
                self.total(),
                self.failed()
            )
        }
    }
}
