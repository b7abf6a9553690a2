
#![allow(warnings)]
use anyhow::Result;
use crypto_monitor::{services::ApiService, Config};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🔧 启动组合服务 (API + 价格更新)...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Create API service; the updater shares its database pool
    let api_service = ApiService::new(config.clone(), None).await?;

    // Start the price update scheduler alongside the API
    api_service
        .updater()
        .start_auto_update(config.updater.interval_minutes);

    api_service.start().await?;

    Ok(())
}
