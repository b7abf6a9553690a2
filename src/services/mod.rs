pub mod api_service;
pub mod market_client;
pub mod import_service;
pub mod price_updater;

pub use api_service::ApiService;
pub use market_client::{MarketClient, QuoteSource};
pub use import_service::ImportService;
pub use price_updater::{resolvable_cmc_id, PriceStore, PriceUpdater};
