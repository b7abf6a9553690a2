use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Asset {
    pub id: i32,
    pub cmc_id: Option<i64>,
    pub rank: i32,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub is_active: bool,
    pub status: i32,
    pub first_historical_data: Option<DateTime<Utc>>,
    pub last_historical_data: Option<DateTime<Utc>>,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub cmc_id: Option<i64>,
    pub rank: i32,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub is_active: bool,
    pub status: i32,
    pub first_historical_data: Option<DateTime<Utc>>,
    pub last_historical_data: Option<DateTime<Utc>>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub id: i32,
    pub cryptocurrency_id: i32,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    pub date_launched: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub platform: Option<serde_json::Value>,
    pub website_urls: Vec<String>,
    pub technical_doc_urls: Vec<String>,
    pub twitter_urls: Vec<String>,
    pub reddit_urls: Vec<String>,
    pub message_board_urls: Vec<String>,
    pub announcement_urls: Vec<String>,
    pub chat_urls: Vec<String>,
    pub explorer_urls: Vec<String>,
    pub source_code_urls: Vec<String>,
    pub facebook_urls: Vec<String>,
    pub subreddit: Option<String>,
    pub twitter_username: Option<String>,
    pub is_hidden: bool,
    pub notice: Option<String>,
    pub tag_names: Vec<String>,
    pub tag_groups: Vec<String>,
    pub contract_addresses: Option<serde_json::Value>,
    pub self_reported_circulating_supply: Option<Decimal>,
    pub self_reported_market_cap: Option<Decimal>,
    pub self_reported_tags: Option<Vec<String>>,
    pub infinite_supply: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssetMetadata {
    pub cryptocurrency_id: i32,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    pub date_launched: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub platform: Option<serde_json::Value>,
    pub website_urls: Vec<String>,
    pub technical_doc_urls: Vec<String>,
    pub twitter_urls: Vec<String>,
    pub reddit_urls: Vec<String>,
    pub message_board_urls: Vec<String>,
    pub announcement_urls: Vec<String>,
    pub chat_urls: Vec<String>,
    pub explorer_urls: Vec<String>,
    pub source_code_urls: Vec<String>,
    pub facebook_urls: Vec<String>,
    pub subreddit: Option<String>,
    pub twitter_username: Option<String>,
    pub is_hidden: bool,
    pub notice: Option<String>,
    pub tag_names: Vec<String>,
    pub tag_groups: Vec<String>,
    pub contract_addresses: Option<serde_json::Value>,
    pub self_reported_circulating_supply: Option<Decimal>,
    pub self_reported_market_cap: Option<Decimal>,
    pub self_reported_tags: Option<Vec<String>>,
    pub infinite_supply: bool,
}

/// 一次采样写入的载荷,recorded_at由更新周期统一打点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceSample {
    pub cryptocurrency_id: i32,
    pub cmc_id: i64,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub volume_24h: Decimal,
    pub percent_change_1h: Option<Decimal>,
    pub percent_change_24h: Option<Decimal>,
    pub percent_change_7d: Option<Decimal>,
    pub percent_change_30d: Option<Decimal>,
    pub percent_change_60d: Option<Decimal>,
    pub percent_change_90d: Option<Decimal>,
    pub market_cap_dominance: Option<Decimal>,
    pub fully_diluted_market_cap: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub cmc_rank: Option<i32>,
    pub volume_change_24h: Option<Decimal>,
    pub num_market_pairs: Option<i32>,
    pub is_active: Option<bool>,
    pub is_fiat: Option<bool>,
    pub tvl_ratio: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub recorded_at: DateTime<Utc>,
}
