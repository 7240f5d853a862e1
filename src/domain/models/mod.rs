mod embedding;
mod health;
mod ingest_report;
mod record;
mod search;

pub use embedding::*;
pub use health::*;
pub use ingest_report::*;
pub use record::*;
pub use search::*;
