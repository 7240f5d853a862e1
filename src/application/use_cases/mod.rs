mod check_health;
mod load_records;
mod query_records;

pub use check_health::*;
pub use load_records::*;
pub use query_records::*;
