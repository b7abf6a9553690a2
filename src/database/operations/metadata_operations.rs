use crate::types::{AssetMetadata, CreateAssetMetadata};
use anyhow::Result;
use sqlx::PgPool;

pub struct MetadataOperations;

impl MetadataOperations {
    pub async fn get_metadata(
        pool: &PgPool,
        cryptocurrency_id: i32,
    ) -> Result<Option<AssetMetadata>> {
        let metadata = sqlx::query_as::<_, AssetMetadata>(
            "SELECT * FROM cryptocurrency_metadata WHERE cryptocurrency_id = $1",
        )
        .bind(cryptocurrency_id)
        .fetch_optional(pool)
        .await?;
        Ok(metadata)
    }

    /// 按资产新增或更新元数据,返回true表示新增
    pub async fn upsert_metadata(pool: &PgPool, data: &CreateAssetMetadata) -> Result<bool> {
        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM cryptocurrency_metadata WHERE cryptocurrency_id = $1",
        )
        .bind(data.cryptocurrency_id)
        .fetch_optional(pool)
        .await?;

        let inserted = existing.is_none();

        sqlx::query(
            r#"
            INSERT INTO cryptocurrency_metadata (
                cryptocurrency_id, logo, description, date_added, date_launched,
                tags, category, platform,
                website_urls, technical_doc_urls, twitter_urls, reddit_urls,
                message_board_urls, announcement_urls, chat_urls, explorer_urls,
                source_code_urls, facebook_urls,
                subreddit, twitter_username, is_hidden, notice,
                tag_names, tag_groups, contract_addresses,
                self_reported_circulating_supply, self_reported_market_cap,
                self_reported_tags, infinite_supply
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                $27, $28, $29
            )
            ON CONFLICT (cryptocurrency_id) DO UPDATE SET
                logo = EXCLUDED.logo,
                description = EXCLUDED.description,
                date_added = EXCLUDED.date_added,
                date_launched = EXCLUDED.date_launched,
                tags = EXCLUDED.tags,
                category = EXCLUDED.category,
                platform = EXCLUDED.platform,
                website_urls = EXCLUDED.website_urls,
                technical_doc_urls = EXCLUDED.technical_doc_urls,
                twitter_urls = EXCLUDED.twitter_urls,
                reddit_urls = EXCLUDED.reddit_urls,
                message_board_urls = EXCLUDED.message_board_urls,
                announcement_urls = EXCLUDED.announcement_urls,
                chat_urls = EXCLUDED.chat_urls,
                explorer_urls = EXCLUDED.explorer_urls,
                source_code_urls = EXCLUDED.source_code_urls,
                facebook_urls = EXCLUDED.facebook_urls,
                subreddit = EXCLUDED.subreddit,
                twitter_username = EXCLUDED.twitter_username,
                is_hidden = EXCLUDED.is_hidden,
                notice = EXCLUDED.notice,
                tag_names = EXCLUDED.tag_names,
                tag_groups = EXCLUDED.tag_groups,
                contract_addresses = EXCLUDED.contract_addresses,
                self_reported_circulating_supply = EXCLUDED.self_reported_circulating_supply,
                self_reported_market_cap = EXCLUDED.self_reported_market_cap,
                self_reported_tags = EXCLUDED.self_reported_tags,
                infinite_supply = EXCLUDED.infinite_supply,
                updated_at = NOW()
            "#,
        )
        .bind(data.cryptocurrency_id)
        .bind(&data.logo)
        .bind(&data.description)
        .bind(data.date_added)
        .bind(data.date_launched)
        .bind(&data.tags)
        .bind(&data.category)
        .bind(&data.platform)
        .bind(&data.website_urls)
        .bind(&data.technical_doc_urls)
        .bind(&data.twitter_urls)
        .bind(&data.reddit_urls)
        .bind(&data.message_board_urls)
        .bind(&data.announcement_urls)
        .bind(&data.chat_urls)
        .bind(&data.explorer_urls)
        .bind(&data.source_code_urls)
        .bind(&data.facebook_urls)
        .bind(&data.subreddit)
        .bind(&data.twitter_username)
        .bind(data.is_hidden)
        .bind(&data.notice)
        .bind(&data.tag_names)
        .bind(&data.tag_groups)
        .bind(&data.contract_addresses)
        .bind(data.self_reported_circulating_supply)
        .bind(data.self_reported_market_cap)
        .bind(&data.self_reported_tags)
        .bind(data.infinite_supply)
        .execute(pool)
        .await?;

        Ok(inserted)
    }
}
