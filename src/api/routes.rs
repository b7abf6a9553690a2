use super::{handlers, ApiState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Cryptocurrency registry routes
        .route("/api/cryptocurrencies", get(handlers::get_cryptocurrencies))
        .route("/api/cryptocurrencies/active", get(handlers::get_active_cryptocurrencies))
        .route("/api/cryptocurrencies/with-metadata", get(handlers::get_cryptocurrencies_with_metadata))
        .route("/api/cryptocurrencies/fetch", post(handlers::fetch_and_save_cryptocurrencies))
        .route("/api/cryptocurrencies/symbol/:symbol", get(handlers::get_cryptocurrency_by_symbol))
        .route("/api/cryptocurrencies/:id", get(handlers::get_cryptocurrency_by_id))
        .route("/api/cryptocurrencies/:id/metadata", get(handlers::get_cryptocurrency_metadata))

        // Live price routes
        .route("/api/prices", get(handlers::get_latest_prices))
        .route("/api/prices/crypto/:id", get(handlers::get_price_for_crypto))
        .route("/api/prices/top-performers", get(handlers::get_top_performers))
        .route("/api/prices/top-gainers", get(handlers::get_top_gainers))
        .route("/api/prices/top-losers", get(handlers::get_top_losers))
        .route("/api/prices/market-stats", get(handlers::get_market_stats))
        .route("/api/prices/by-symbols", get(handlers::get_prices_by_symbols))
        .route("/api/prices/by-ids", get(handlers::get_prices_by_ids))

        // Historical data + update scheduler control routes
        .route("/api/historical/prices", get(handlers::get_multiple_historical_prices))
        .route("/api/historical/prices/:id", get(handlers::get_historical_prices))
        .route("/api/historical/stats", get(handlers::get_historical_stats))
        .route("/api/historical/report", get(handlers::get_crypto_price_report))
        .route("/api/historical/status", get(handlers::get_update_status))
        .route("/api/historical/start-update", post(handlers::start_auto_update))
        .route("/api/historical/stop-update", post(handlers::stop_auto_update))
        .route("/api/historical/cleanup", post(handlers::cleanup_old_data))
        .route("/api/historical/force-update", post(handlers::force_update))

        // Health
        .route("/api/health", get(handlers::get_health))
        .route("/", get(handlers::root))

        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
