use crate::database::utils::*;
use crate::types::{CreatePriceSample, PricePoint};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};

/// 历史查询的聚合粒度,对应interval=1h/1d
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBucket {
    Hour,
    Day,
}

impl HistoryBucket {
    fn trunc_unit(&self) -> &'static str {
        match self {
            HistoryBucket::Hour => "hour",
            HistoryBucket::Day => "day",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetSampleStat {
    pub cryptocurrency_id: i32,
    pub price_count: i64,
    pub last_update: Option<DateTime<Utc>>,
}

pub struct PriceOperations;

impl PriceOperations {
    /// 追加一条采样记录,采样行只增不改
    pub async fn insert_price_sample(pool: &PgPool, sample: &CreatePriceSample) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cryptocurrency_prices (
                cryptocurrency_id, cmc_id, price, market_cap, volume_24h,
                percent_change_1h, percent_change_24h, percent_change_7d,
                percent_change_30d, percent_change_60d, percent_change_90d,
                market_cap_dominance, fully_diluted_market_cap,
                circulating_supply, total_supply, max_supply,
                cmc_rank, volume_change_24h, num_market_pairs,
                is_active, is_fiat, tvl_ratio, tags, recorded_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
            )
            "#,
        )
        .bind(sample.cryptocurrency_id)
        .bind(sample.cmc_id)
        .bind(sample.price)
        .bind(sample.market_cap)
        .bind(sample.volume_24h)
        .bind(sample.percent_change_1h)
        .bind(sample.percent_change_24h)
        .bind(sample.percent_change_7d)
        .bind(sample.percent_change_30d)
        .bind(sample.percent_change_60d)
        .bind(sample.percent_change_90d)
        .bind(sample.market_cap_dominance)
        .bind(sample.fully_diluted_market_cap)
        .bind(sample.circulating_supply)
        .bind(sample.total_supply)
        .bind(sample.max_supply)
        .bind(sample.cmc_rank)
        .bind(sample.volume_change_24h)
        .bind(sample.num_market_pairs)
        .bind(sample.is_active)
        .bind(sample.is_fiat)
        .bind(sample.tvl_ratio)
        .bind(&sample.tags)
        .bind(sample.recorded_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// 单个资产的历史采样,可选时间范围与按小时/天聚合(每桶取最后一条)
    pub async fn get_price_history(
        pool: &PgPool,
        cryptocurrency_id: i32,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        bucket: Option<HistoryBucket>,
    ) -> Result<Vec<PricePoint>> {
        let mut builder: QueryBuilder<sqlx::Postgres> = match bucket {
            Some(b) => {
                let unit = b.trunc_unit();
                let mut builder = QueryBuilder::new(format!(
                    "SELECT DISTINCT ON (date_trunc('{unit}', recorded_at)) \
                     id, price, market_cap, volume_24h, recorded_at, \
                     date_trunc('{unit}', recorded_at) AS bucket \
                     FROM cryptocurrency_prices WHERE cryptocurrency_id = "
                ));
                builder.push_bind(cryptocurrency_id);
                builder
            }
            None => {
                let mut builder = QueryBuilder::new(
                    "SELECT id, price, market_cap, volume_24h, recorded_at, \
                     NULL::timestamptz AS bucket \
                     FROM cryptocurrency_prices WHERE cryptocurrency_id = ",
                );
                builder.push_bind(cryptocurrency_id);
                builder
            }
        };

        if let Some(start) = start {
            builder.push(" AND recorded_at >= ");
            builder.push_bind(start);
        }
        if let Some(end) = end {
            builder.push(" AND recorded_at <= ");
            builder.push_bind(end);
        }

        match bucket {
            Some(b) => {
                builder.push(format!(
                    " ORDER BY date_trunc('{}', recorded_at) ASC, recorded_at DESC",
                    b.trunc_unit()
                ));
            }
            None => {
                builder.push(" ORDER BY recorded_at ASC");
            }
        }

        let rows = builder.build().fetch_all(pool).await?;

        let points = rows
            .iter()
            .map(|row| PricePoint {
                id: safe_get_i32(row, "id"),
                price: safe_get_decimal(row, "price"),
                market_cap: safe_get_decimal(row, "market_cap"),
                volume_24h: safe_get_decimal(row, "volume_24h"),
                recorded_at: safe_get_datetime(row, "recorded_at"),
                bucket: safe_get_optional_datetime(row, "bucket"),
            })
            .collect();

        Ok(points)
    }

    /// 多资产历史采样,按recorded_at升序返回(cryptocurrency_id, point)
    pub async fn get_price_history_multi(
        pool: &PgPool,
        cryptocurrency_ids: &[i32],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<(i32, PricePoint)>> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "SELECT cryptocurrency_id, id, price, market_cap, volume_24h, recorded_at \
             FROM cryptocurrency_prices WHERE cryptocurrency_id = ANY(",
        );
        builder.push_bind(cryptocurrency_ids.to_vec());
        builder.push(")");

        if let Some(start) = start {
            builder.push(" AND recorded_at >= ");
            builder.push_bind(start);
        }
        if let Some(end) = end {
            builder.push(" AND recorded_at <= ");
            builder.push_bind(end);
        }
        builder.push(" ORDER BY recorded_at ASC");

        let rows = builder.build().fetch_all(pool).await?;

        let points = rows
            .iter()
            .map(|row| {
                (
                    safe_get_i32(row, "cryptocurrency_id"),
                    PricePoint {
                        id: safe_get_i32(row, "id"),
                        price: safe_get_decimal(row, "price"),
                        market_cap: safe_get_decimal(row, "market_cap"),
                        volume_24h: safe_get_decimal(row, "volume_24h"),
                        recorded_at: safe_get_datetime(row, "recorded_at"),
                        bucket: None,
                    },
                )
            })
            .collect();

        Ok(points)
    }

    /// 删除recorded_at早于cutoff的采样,返回删除行数
    pub async fn delete_samples_before(pool: &PgPool, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cryptocurrency_prices WHERE recorded_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// 每个资产的采样数与最近采样时间,供报表使用
    pub async fn per_asset_sample_stats(pool: &PgPool) -> Result<Vec<AssetSampleStat>> {
        let rows = sqlx::query(
            "SELECT cryptocurrency_id, COUNT(id) AS price_count, MAX(recorded_at) AS last_update \
             FROM cryptocurrency_prices GROUP BY cryptocurrency_id",
        )
        .fetch_all(pool)
        .await?;

        let stats = rows
            .iter()
            .map(|row| AssetSampleStat {
                cryptocurrency_id: safe_get_i32(row, "cryptocurrency_id"),
                price_count: safe_get_i64(row, "price_count"),
                last_update: safe_get_optional_datetime(row, "last_update"),
            })
            .collect();

        Ok(stats)
    }
}
