pub mod load_controller;
pub mod query_controller;
pub mod stats_controller;

pub use load_controller::LoadController;
pub use query_controller::QueryController;
pub use stats_controller::StatsController;
