use crate::api::{create_router, ApiState};
use crate::config::Config;
use crate::database::Database;
use crate::services::{MarketClient, PriceUpdater};
use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub struct ApiService {
    config: Config,
    database: Arc<Database>,
    market: Arc<MarketClient>,
    updater: Arc<PriceUpdater>,
}

impl ApiService {
    pub async fn new(config: Config, updater: Option<Arc<PriceUpdater>>) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;
        let database = Arc::new(Database::new(pool));
        database.create_tables().await?;

        let market = Arc::new(MarketClient::new(&config.market));

        let updater = updater.unwrap_or_else(|| {
            Arc::new(PriceUpdater::new(
                Arc::clone(&database) as Arc<dyn crate::services::PriceStore>,
                Arc::clone(&market) as Arc<dyn crate::services::QuoteSource>,
            ))
        });

        Ok(Self {
            config,
            database,
            market,
            updater,
        })
    }

    pub fn updater(&self) -> Arc<PriceUpdater> {
        Arc::clone(&self.updater)
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 启动API服务...");

        let api_state = ApiState::new(
            Arc::clone(&self.database),
            Arc::clone(&self.market),
            Arc::clone(&self.updater),
        );

        let app = create_router(api_state);
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.server.host, self.config.server.port
        ))
        .await?;

        info!(
            "API Server starting on {}:{}",
            self.config.server.host, self.config.server.port
        );
        axum::serve(listener, app).await?;

        Ok(())
    }
}
