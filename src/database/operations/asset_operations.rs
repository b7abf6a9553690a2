use crate::types::{Asset, AssetMetadata, AssetWithMetadata, CreateAsset};
use anyhow::Result;
use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;

const ASSET_COLUMNS: &str = "id, cmc_id, rank, name, symbol, slug, is_active, status, \
     first_historical_data, last_historical_data, platform, created_at, updated_at";

/// 注册表查询条件,handlers从query参数组装
#[derive(Debug, Clone)]
pub struct AssetFilter {
    pub q: Option<String>,
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub active: Option<bool>,
    pub sort_by: String,
    pub order: String,
    pub limit: i64,
    pub offset: i64,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self {
            q: None,
            min_rank: None,
            max_rank: None,
            active: None,
            sort_by: "rank".to_string(),
            order: "asc".to_string(),
            limit: 100,
            offset: 0,
        }
    }
}

pub struct AssetOperations;

impl AssetOperations {
    pub async fn list_assets(pool: &PgPool, filter: &AssetFilter) -> Result<Vec<Asset>> {
        let sort_column = match filter.sort_by.as_str() {
            "name" => "name",
            "symbol" => "symbol",
            "created_at" => "created_at",
            _ => "rank",
        };
        let order_clause = match filter.order.to_lowercase().as_str() {
            "desc" => "DESC",
            _ => "ASC",
        };

        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM cryptocurrencies WHERE 1=1",
            ASSET_COLUMNS
        ));

        if let Some(q) = &filter.q {
            let pattern = format!("%{}%", q);
            builder.push(" AND (name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR symbol ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR slug ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(min_rank) = filter.min_rank {
            builder.push(" AND rank >= ");
            builder.push_bind(min_rank);
        }
        if let Some(max_rank) = filter.max_rank {
            builder.push(" AND rank <= ");
            builder.push_bind(max_rank);
        }
        if let Some(active) = filter.active {
            builder.push(" AND is_active = ");
            builder.push_bind(active);
        }

        builder.push(format!(" ORDER BY {} {}", sort_column, order_clause));
        builder.push(" LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        let assets = builder.build_query_as::<Asset>().fetch_all(pool).await?;
        Ok(assets)
    }

    pub async fn get_asset(pool: &PgPool, id: i32) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE id = $1",
            ASSET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(asset)
    }

    pub async fn get_asset_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE symbol = $1 ORDER BY rank ASC LIMIT 1",
            ASSET_COLUMNS
        ))
        .bind(symbol.to_uppercase())
        .fetch_optional(pool)
        .await?;
        Ok(asset)
    }

    pub async fn get_asset_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE slug = $1",
            ASSET_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
        Ok(asset)
    }

    pub async fn get_assets_by_ids(pool: &PgPool, ids: &[i32]) -> Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE id = ANY($1) ORDER BY rank ASC",
            ASSET_COLUMNS
        ))
        .bind(ids.to_vec())
        .fetch_all(pool)
        .await?;
        Ok(assets)
    }

    pub async fn get_assets_by_symbols(pool: &PgPool, symbols: &[String]) -> Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE symbol = ANY($1) ORDER BY rank ASC",
            ASSET_COLUMNS
        ))
        .bind(symbols.to_vec())
        .fetch_all(pool)
        .await?;
        Ok(assets)
    }

    /// 活跃资产,rank升序,供更新周期与实时行情接口使用
    pub async fn get_active_assets(pool: &PgPool, limit: i64) -> Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies WHERE is_active = TRUE ORDER BY rank ASC LIMIT $1",
            ASSET_COLUMNS
        ))
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(assets)
    }

    /// 按slug新增或更新,返回true表示新增
    pub async fn upsert_asset(pool: &PgPool, data: &CreateAsset) -> Result<bool> {
        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM cryptocurrencies WHERE slug = $1")
                .bind(&data.slug)
                .fetch_optional(pool)
                .await?;

        match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE cryptocurrencies SET
                        cmc_id = $1, rank = $2, name = $3, symbol = $4,
                        is_active = $5, status = $6,
                        first_historical_data = $7, last_historical_data = $8,
                        platform = $9, updated_at = NOW()
                    WHERE id = $10
                    "#,
                )
                .bind(data.cmc_id)
                .bind(data.rank)
                .bind(&data.name)
                .bind(&data.symbol)
                .bind(data.is_active)
                .bind(data.status)
                .bind(data.first_historical_data)
                .bind(data.last_historical_data)
                .bind(&data.platform)
                .bind(id)
                .execute(pool)
                .await?;
                Ok(false)
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO cryptocurrencies (
                        cmc_id, rank, name, symbol, slug, is_active, status,
                        first_historical_data, last_historical_data, platform
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(data.cmc_id)
                .bind(data.rank)
                .bind(&data.name)
                .bind(&data.symbol)
                .bind(&data.slug)
                .bind(data.is_active)
                .bind(data.status)
                .bind(data.first_historical_data)
                .bind(data.last_historical_data)
                .bind(&data.platform)
                .execute(pool)
                .await?;
                Ok(true)
            }
        }
    }

    pub async fn list_assets_with_metadata(pool: &PgPool) -> Result<Vec<AssetWithMetadata>> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM cryptocurrencies ORDER BY rank ASC",
            ASSET_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        let metadata_rows = sqlx::query_as::<_, AssetMetadata>(
            "SELECT * FROM cryptocurrency_metadata",
        )
        .fetch_all(pool)
        .await?;

        let mut by_asset: HashMap<i32, AssetMetadata> = metadata_rows
            .into_iter()
            .map(|m| (m.cryptocurrency_id, m))
            .collect();

        Ok(assets
            .into_iter()
            .map(|asset| {
                let metadata = by_asset.remove(&asset.id);
                AssetWithMetadata { asset, metadata }
            })
            .collect())
    }
}
