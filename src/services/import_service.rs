use crate::database::operations::{AssetOperations, MetadataOperations};
use crate::database::Database;
use crate::services::MarketClient;
use crate::types::{CreateAsset, CreateAssetMetadata, ImportCounts, ImportResult, MapEntry, MetadataEntry};
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// 元数据只拉取列表前几个资产,与行情源的免费档位配额保持一致
const METADATA_IMPORT_LIMIT: usize = 10;

pub struct ImportService {
    database: Arc<Database>,
    market: Arc<MarketClient>,
}

impl ImportService {
    pub fn new(database: Arc<Database>, market: Arc<MarketClient>) -> Self {
        Self { database, market }
    }

    /// 拉取资产列表与元数据并写入注册表
    pub async fn fetch_and_save_all(&self) -> Result<ImportResult> {
        info!("🔄 拉取资产列表...");
        let entries = self.market.fetch_asset_map().await?;

        info!("💾 写入资产注册表...");
        let crypto_counts = self.save_assets(&entries).await?;

        info!("🔄 拉取资产元数据...");
        let metadata_ids: Vec<i64> = entries
            .iter()
            .take(METADATA_IMPORT_LIMIT)
            .map(|entry| entry.id)
            .collect();
        let metadata = self.market.fetch_asset_metadata(&metadata_ids).await?;

        info!("💾 写入元数据...");
        let metadata_counts = self.save_metadata(&metadata).await?;

        info!(
            "✅ 导入完成: 资产 {} 新增 / {} 更新, 元数据 {} 新增 / {} 更新",
            crypto_counts.saved, crypto_counts.updated, metadata_counts.saved, metadata_counts.updated
        );

        Ok(ImportResult {
            cryptocurrencies: crypto_counts,
            metadata: metadata_counts,
        })
    }

    async fn save_assets(&self, entries: &[MapEntry]) -> Result<ImportCounts> {
        let mut counts = ImportCounts::default();

        for entry in entries {
            // 外部ID与展示rank分开保存,报价查询走cmc_id
            let data = CreateAsset {
                cmc_id: Some(entry.id),
                rank: entry.rank.unwrap_or(0),
                name: entry.name.clone(),
                symbol: entry.symbol.clone(),
                slug: entry.slug.clone(),
                is_active: true,
                status: 1,
                first_historical_data: entry.first_historical_data,
                last_historical_data: Some(Utc::now()),
                platform: entry.platform.as_ref().and_then(|p| p.name.clone()),
            };

            if AssetOperations::upsert_asset(self.database.pool(), &data).await? {
                counts.saved += 1;
            } else {
                counts.updated += 1;
            }
        }

        counts.total = counts.saved + counts.updated;
        Ok(counts)
    }

    async fn save_metadata(&self, metadata: &HashMap<String, MetadataEntry>) -> Result<ImportCounts> {
        let mut counts = ImportCounts::default();

        for (id, entry) in metadata {
            let asset = match AssetOperations::get_asset_by_slug(self.database.pool(), &entry.slug).await? {
                Some(asset) => asset,
                None => {
                    warn!("⚠️ 元数据 {} 对应的资产不存在: {}", id, entry.name);
                    continue;
                }
            };

            let urls = entry.urls.clone().unwrap_or_default();
            // 列表字段缺失补空数组,对象字段缺失保持NULL
            let data = CreateAssetMetadata {
                cryptocurrency_id: asset.id,
                logo: entry.logo.clone(),
                description: entry.description.clone(),
                date_added: entry.date_added,
                date_launched: entry.date_launched,
                tags: entry.tags.clone().unwrap_or_default(),
                category: entry.category.clone(),
                platform: entry.platform.clone(),
                website_urls: urls.website.unwrap_or_default(),
                technical_doc_urls: urls.technical_doc.unwrap_or_default(),
                twitter_urls: urls.twitter.unwrap_or_default(),
                reddit_urls: urls.reddit.unwrap_or_default(),
                message_board_urls: urls.message_board.unwrap_or_default(),
                announcement_urls: urls.announcement.unwrap_or_default(),
                chat_urls: urls.chat.unwrap_or_default(),
                explorer_urls: urls.explorer.unwrap_or_default(),
                source_code_urls: urls.source_code.unwrap_or_default(),
                facebook_urls: urls.facebook.unwrap_or_default(),
                subreddit: entry.subreddit.clone(),
                twitter_username: entry.twitter_username.clone(),
                is_hidden: entry.is_hidden == Some(1),
                notice: entry.notice.clone(),
                tag_names: entry.tag_names.clone().unwrap_or_default(),
                tag_groups: entry.tag_groups.clone().unwrap_or_default(),
                contract_addresses: entry.contract_address.clone(),
                self_reported_circulating_supply: entry.self_reported_circulating_supply,
                self_reported_market_cap: entry.self_reported_market_cap,
                self_reported_tags: entry.self_reported_tags.clone(),
                infinite_supply: entry.infinite_supply.unwrap_or(false),
            };

            if MetadataOperations::upsert_metadata(self.database.pool(), &data).await? {
                counts.saved += 1;
            } else {
                counts.updated += 1;
            }
        }

        counts.total = counts.saved + counts.updated;
        Ok(counts)
    }
}
