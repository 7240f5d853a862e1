use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Ok,
    Unreachable,
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyStatus::Ok => "ok",
            DependencyStatus::Unreachable => "unreachable",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DependencyStatus::Ok)
    }
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reachability of both external dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub vector_store: DependencyStatus,
    pub embedding_provider: DependencyStatus,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.vector_store.is_ok() && self.embedding_provider.is_ok()
    }
}
