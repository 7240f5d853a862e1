pub mod application;
pub mod cli;
pub mod config;
pub mod connector;
pub mod domain;

pub use application::{
    CheckHealthUseCase, EmbeddingService, IdGenerator, LoadRecordsUseCase, QueryOutcome,
    QueryRecordsUseCase, VectorRepository,
};

pub use cli::Commands;

pub use config::{AppConfig, ConfigError};

pub use connector::{
    Container, ContainerConfig, InMemoryVectorRepository, MockEmbedding, OpenAiEmbedding,
    QdrantVectorRepository, Router, SequentialIdGenerator, UuidGenerator,
};

pub use domain::{
    normalize_record, DependencyStatus, DomainError, EmbeddedRecord, EmbeddingConfig,
    HealthReport, IngestReport, Match, Record, RecordFailure, SearchQuery,
};
