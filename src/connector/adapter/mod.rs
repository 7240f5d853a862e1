mod id_generator;
mod in_memory_vector_repository;
mod mock_embedding;
mod openai_embedding;
mod qdrant_vector_repository;

pub use id_generator::*;
pub use in_memory_vector_repository::*;
pub use mock_embedding::*;
pub use openai_embedding::*;
pub use qdrant_vector_repository::QdrantVectorRepository;
