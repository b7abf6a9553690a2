use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// /v1/cryptocurrency/map 响应
#[derive(Debug, Clone, Deserialize)]
pub struct MapResponse {
    pub data: Vec<MapEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapEntry {
    pub id: i64,
    pub rank: Option<i32>,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub is_active: Option<i32>,
    pub first_historical_data: Option<DateTime<Utc>>,
    pub last_historical_data: Option<DateTime<Utc>>,
    pub platform: Option<MapPlatform>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapPlatform {
    pub name: Option<String>,
}

/// /v2/cryptocurrency/quotes/latest 响应,data以字符串化的外部ID为键
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesResponse {
    pub data: HashMap<String, QuoteData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteData {
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub cmc_rank: Option<i32>,
    pub num_market_pairs: Option<i32>,
    pub is_active: Option<i32>,
    pub is_fiat: Option<i32>,
    pub tvl_ratio: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quote: HashMap<String, CurrencyQuote>,
}

impl QuoteData {
    /// USD报价块,缺失时整条记录按skipped处理
    pub fn usd(&self) -> Option<&CurrencyQuote> {
        self.quote.get("USD")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyQuote {
    pub price: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
    pub volume_change_24h: Option<Decimal>,
    pub percent_change_1h: Option<Decimal>,
    pub percent_change_24h: Option<Decimal>,
    pub percent_change_7d: Option<Decimal>,
    pub percent_change_30d: Option<Decimal>,
    pub percent_change_60d: Option<Decimal>,
    pub percent_change_90d: Option<Decimal>,
    pub market_cap_dominance: Option<Decimal>,
    pub fully_diluted_market_cap: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// /v2/cryptocurrency/info 响应
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    pub data: HashMap<String, MetadataEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEntry {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    pub date_launched: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub platform: Option<serde_json::Value>,
    pub urls: Option<MetadataUrls>,
    pub subreddit: Option<String>,
    pub twitter_username: Option<String>,
    pub is_hidden: Option<i32>,
    pub notice: Option<String>,
    #[serde(rename = "tag-names")]
    pub tag_names: Option<Vec<String>>,
    #[serde(rename = "tag-groups")]
    pub tag_groups: Option<Vec<String>>,
    pub contract_address: Option<serde_json::Value>,
    pub self_reported_circulating_supply: Option<Decimal>,
    pub self_reported_market_cap: Option<Decimal>,
    pub self_reported_tags: Option<Vec<String>>,
    pub infinite_supply: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataUrls {
    pub website: Option<Vec<String>>,
    pub technical_doc: Option<Vec<String>>,
    pub twitter: Option<Vec<String>>,
    pub reddit: Option<Vec<String>>,
    pub message_board: Option<Vec<String>>,
    pub announcement: Option<Vec<String>>,
    pub chat: Option<Vec<String>>,
    pub explorer: Option<Vec<String>>,
    pub source_code: Option<Vec<String>>,
    pub facebook: Option<Vec<String>>,
}
