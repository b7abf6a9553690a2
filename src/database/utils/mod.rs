//! 数据库工具函数模块
//!
//! 行级安全取值函数,列缺失或类型不匹配时回退默认值

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::Row;

pub fn safe_get_i32(row: &PgRow, column: &str) -> i32 {
    row.try_get::<i32, _>(column).unwrap_or(0)
}

pub fn safe_get_i64(row: &PgRow, column: &str) -> i64 {
    row.try_get::<i64, _>(column).unwrap_or(0)
}

pub fn safe_get_decimal(row: &PgRow, column: &str) -> Decimal {
    row.try_get::<Decimal, _>(column)
        .unwrap_or_else(|_| Decimal::ZERO)
}

pub fn safe_get_datetime(row: &PgRow, column: &str) -> DateTime<Utc> {
    row.try_get::<DateTime<Utc>, _>(column)
        .unwrap_or_else(|_| Utc::now())
}

pub fn safe_get_optional_datetime(row: &PgRow, column: &str) -> Option<DateTime<Utc>> {
    row.try_get::<Option<DateTime<Utc>>, _>(column).ok().flatten()
}
