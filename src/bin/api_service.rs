#![allow(unused_variables)]  // 忽略未使用变量的警告
#![allow(dead_code)]        // 忽略未使用代码的警告
use anyhow::Result;
use crypto_monitor::config::Config;
use crypto_monitor::services::ApiService;
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 启动独立API服务...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Create and start API service
    let api_service = ApiService::new(config.clone(), None).await?;

    // 调度器默认保持空闲,可通过HTTP控制;配置可选自动启动
    if config.updater.auto_start {
        api_service
            .updater()
            .start_auto_update(config.updater.interval_minutes);
    }

    api_service.start().await?;

    Ok(())
}
