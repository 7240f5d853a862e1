//! # Application Layer
//!
//! Capability traits for the external services and the use cases that
//! orchestrate them.

mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
