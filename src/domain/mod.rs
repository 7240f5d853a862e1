//! # Domain Layer
//!
//! Core models, the error taxonomy and the record-to-text policy.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
