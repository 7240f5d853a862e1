//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - Embedding generation (OpenAI over HTTP, deterministic mock offline)
//! - Vector storage (Qdrant over gRPC, in-memory for development)
//! - Entry points (CLI routing and the HTTP API)

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
pub use api::*;
