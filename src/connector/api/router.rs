use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{LoadController, QueryController, StatsController};

pub struct Router<'a> {
    load_controller: LoadController<'a>,
    query_controller: QueryController<'a>,
    stats_controller: StatsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            load_controller: LoadController::new(container),
            query_controller: QueryController::new(container),
            stats_controller: StatsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Load { path } => self.load_controller.load(path).await,
            Commands::Query {
                query,
                threshold,
                limit,
                json,
            } => {
                self.query_controller
                    .query(query, threshold, limit, json)
                    .await
            }
            Commands::Stats => self.stats_controller.stats().await,
            Commands::Serve { .. } => unreachable!("serve is handled separately in main"),
        }
    }
}
