#![allow(unused_variables)]  // 忽略未使用变量的警告
#![allow(dead_code)]        // 忽略未使用代码的警告
use anyhow::Result;
use crypto_monitor::config::Config;
use crypto_monitor::database::Database;
use crypto_monitor::services::{MarketClient, PriceStore, PriceUpdater, QuoteSource};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 启动独立价格更新服务...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    let database = Arc::new(Database::new(pool));
    database.create_tables().await?;
    info!("Database connected and tables created");

    let market = Arc::new(MarketClient::new(&config.market));
    let updater = Arc::new(PriceUpdater::new(
        Arc::clone(&database) as Arc<dyn PriceStore>,
        Arc::clone(&market) as Arc<dyn QuoteSource>,
    ));

    updater.clone().start_auto_update(config.updater.interval_minutes);

    // Run until interrupted
    tokio::signal::ctrl_c().await?;
    updater.stop_auto_update();

    Ok(())
}
