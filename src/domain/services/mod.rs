//! Domain services containing pure business logic.

mod text_normalizer;

pub use text_normalizer::*;
