//! REST API over the use cases, mounted under `/api/v1`.

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, start_server};
pub use types::*;
