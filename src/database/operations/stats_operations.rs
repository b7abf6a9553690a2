use crate::database::utils::*;
use crate::types::HistoricalStats;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct StatsOperations;

impl StatsOperations {
    /// 历史数据总体统计:总行数、最早/最新采样、覆盖资产数、天跨度
    pub async fn historical_stats(pool: &PgPool) -> Result<HistoricalStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(id) AS total_records,
                MIN(recorded_at) AS oldest_record,
                MAX(recorded_at) AS newest_record,
                COUNT(DISTINCT cryptocurrency_id) AS unique_cryptos
            FROM cryptocurrency_prices
            "#,
        )
        .fetch_one(pool)
        .await?;

        let oldest = safe_get_optional_datetime(&row, "oldest_record");
        let newest = safe_get_optional_datetime(&row, "newest_record");

        Ok(HistoricalStats {
            total_records: safe_get_i64(&row, "total_records"),
            oldest_record: oldest,
            newest_record: newest,
            unique_cryptos: safe_get_i64(&row, "unique_cryptos"),
            data_range_days: day_span(oldest, newest),
        })
    }
}

/// 最早与最新采样之间的天数,向上取整,无数据为0
pub fn day_span(oldest: Option<DateTime<Utc>>, newest: Option<DateTime<Utc>>) -> i64 {
    match (oldest, newest) {
        (Some(oldest), Some(newest)) => {
            let secs = (newest - oldest).num_seconds().max(0);
            (secs + 86_399) / 86_400
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_span_rounds_up() {
        let oldest = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let newest = Utc.with_ymd_and_hms(2025, 8, 3, 13, 30, 0).unwrap();
        // 2天1.5小时 -> 向上取整3天
        assert_eq!(day_span(Some(oldest), Some(newest)), 3);
    }

    #[test]
    fn test_day_span_exact_days() {
        let oldest = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        let newest = Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap();
        assert_eq!(day_span(Some(oldest), Some(newest)), 3);
    }

    #[test]
    fn test_day_span_empty() {
        assert_eq!(day_span(None, None), 0);
        let only = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(day_span(Some(only), None), 0);
    }

    #[test]
    fn test_day_span_same_instant() {
        let t = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
        assert_eq!(day_span(Some(t), Some(t)), 0);
    }
}
