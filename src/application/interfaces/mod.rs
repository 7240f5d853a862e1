mod embedding_service;
mod id_generator;
mod vector_repository;

pub use embedding_service::*;
pub use id_generator::*;
pub use vector_repository::*;
