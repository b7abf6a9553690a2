use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 一次更新周期的计数结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub saved: usize,
    pub skipped: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterStatus {
    pub is_running: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub update_interval: String, // "Active" | "Inactive"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalStats {
    pub total_records: i64,
    pub oldest_record: Option<DateTime<Utc>>,
    pub newest_record: Option<DateTime<Utc>>,
    pub unique_cryptos: i64,
    pub data_range_days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetWithMetadata {
    #[serde(flatten)]
    pub asset: crate::types::Asset,
    pub metadata: Option<crate::types::AssetMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBrief {
    pub id: i32,
    pub name: String,
    pub symbol: String,
}

/// 历史查询返回的单个采样点,bucket仅在按小时/天聚合时出现
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub id: i32,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub volume_24h: Decimal,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetHistory {
    pub cryptocurrency: AssetBrief,
    pub historical_prices: Vec<PricePoint>,
    pub count: usize,
    pub period: String,
    pub interval: String,
    pub filters: HistoryFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupedHistory {
    pub cryptocurrency: AssetBrief,
    pub prices: Vec<PricePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetReportEntry {
    pub id: i32,
    pub rank: i32,
    pub symbol: String,
    pub name: String,
    pub is_active: bool,
    pub price_count: i64,
    pub last_update: Option<DateTime<Utc>>,
    pub has_recent_data: bool,
    pub status: String, // "in_api" | "out_of_api"
    pub can_update: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_cryptocurrencies: usize,
    pub in_api: usize,
    pub out_of_api: usize,
    pub with_recent_data: usize,
    pub without_recent_data: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub summary: ReportSummary,
    pub cryptocurrencies: Vec<AssetReportEntry>,
}

/// 注册表数据与实时行情的合并视图
#[derive(Debug, Clone, Serialize)]
pub struct LivePrice {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub rank: i32,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub volume_24h: Decimal,
    pub percent_change_1h: Decimal,
    pub percent_change_24h: Decimal,
    pub percent_change_7d: Decimal,
    pub percent_change_30d: Decimal,
    pub percent_change_60d: Decimal,
    pub percent_change_90d: Decimal,
    pub market_cap_dominance: Decimal,
    pub fully_diluted_market_cap: Decimal,
    pub circulating_supply: Decimal,
    pub total_supply: Decimal,
    pub max_supply: Option<Decimal>,
    pub cmc_rank: i32,
    pub last_updated: DateTime<Utc>,
    pub volume_change_24h: Decimal,
    pub num_market_pairs: i32,
    pub is_active: i32,
    pub is_fiat: i32,
    pub tvl_ratio: Option<Decimal>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketSentiment {
    pub gainers: usize,
    pub losers: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketStats {
    pub total_cryptocurrencies: usize,
    pub total_market_cap: Decimal,
    pub total_volume_24h: Decimal,
    pub market_sentiment: MarketSentiment,
    pub average_change_24h: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPerformers {
    pub gainers: Vec<LivePrice>,
    pub losers: Vec<LivePrice>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportCounts {
    pub saved: usize,
    pub updated: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub cryptocurrencies: ImportCounts,
    pub metadata: ImportCounts,
}
