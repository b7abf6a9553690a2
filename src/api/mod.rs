pub mod handlers;
pub mod routes;

use crate::database::Database;
use crate::services::{MarketClient, PriceUpdater};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub database: Arc<Database>,
    pub market: Arc<MarketClient>,
    pub updater: Arc<PriceUpdater>,
}

impl ApiState {
    pub fn new(
        database: Arc<Database>,
        market: Arc<MarketClient>,
        updater: Arc<PriceUpdater>,
    ) -> Self {
        Self {
            database,
            market,
            updater,
        }
    }
}

pub use routes::create_router;
