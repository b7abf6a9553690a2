pub mod asset_handlers;
pub mod price_handlers;
pub mod historical_handlers;
pub mod status_handlers;

pub use asset_handlers::*;
pub use price_handlers::*;
pub use historical_handlers::*;
pub use status_handlers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            count: None,
        }),
    )
        .into_response()
}

pub fn ok_with_count<T: Serialize>(data: T, count: usize) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            count: Some(count),
        }),
    )
        .into_response()
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            count: None,
        }),
    )
        .into_response()
}

pub fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
            count: None,
        }),
    )
        .into_response()
}

pub fn fail_with_error(
    status: StatusCode,
    message: impl Into<String>,
    error: impl ToString,
) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.to_string()),
            count: None,
        }),
    )
        .into_response()
}

/// 日期参数解析,接受YYYY-MM-DD、YYYY-MM-DDTHH:mm:ss或RFC3339
pub fn parse_date_param(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_param_accepts_plain_date() {
        let parsed = parse_date_param("2025-08-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_param_accepts_datetime() {
        let parsed = parse_date_param("2025-08-01T15:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 8, 1, 15, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_date_param_rejects_garbage() {
        assert!(parse_date_param("not-a-date").is_none());
        assert!(parse_date_param("2025-13-40").is_none());
    }
}
