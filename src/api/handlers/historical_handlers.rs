use super::{fail, fail_with_error, ok, ok_with_message, parse_date_param};
use crate::api::ApiState;
use crate::database::operations::{AssetOperations, HistoryBucket, PriceOperations};
use crate::services::resolvable_cmc_id;
use crate::types::{
    AssetBrief, AssetHistory, AssetReportEntry, GroupedHistory, HistoricalStats, HistoryFilters,
    PriceReport, ReportSummary, UpdateSummary, UpdaterStatus,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_HISTORY_DAYS: i64 = 7;
const REPORT_RECENT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<i64>,
    pub interval: Option<String>, // 1h, 1d, raw
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MultiHistoryQuery {
    pub ids: Option<String>,
    pub days: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartUpdateBody {
    pub interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupBody {
    pub days_to_keep: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusData {
    pub status: UpdaterStatus,
    pub stats: HistoricalStats,
}

#[derive(Debug, Serialize)]
pub struct CleanupResult {
    pub deleted_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ForceUpdateData {
    pub summary: UpdateSummary,
    pub stats: HistoricalStats,
}

#[derive(Debug, Serialize)]
pub struct MultiHistoryData {
    pub groups: HashMap<i32, GroupedHistory>,
    pub count: usize,
    pub period: String,
    pub filters: HistoryFilters,
}

struct ResolvedRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    period: String,
    filters: HistoryFilters,
}

/// 日期过滤解析:显式范围优先,否则回退days参数
fn resolve_date_range(
    days: Option<i64>,
    start_date: &Option<String>,
    end_date: &Option<String>,
) -> Result<ResolvedRange, Response> {
    match (start_date, end_date) {
        (Some(start_raw), Some(end_raw)) => {
            let (Some(start), Some(end)) = (parse_date_param(start_raw), parse_date_param(end_raw))
            else {
                return Err(fail(
                    StatusCode::BAD_REQUEST,
                    "Invalid date format. Use YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss",
                ));
            };
            if start >= end {
                return Err(fail(
                    StatusCode::BAD_REQUEST,
                    "start_date must be before end_date",
                ));
            }
            Ok(ResolvedRange {
                start: Some(start),
                end: Some(end),
                period: format!("From {} to {}", start_raw, end_raw),
                filters: HistoryFilters {
                    start_date: Some(start_raw.clone()),
                    end_date: Some(end_raw.clone()),
                    days: None,
                },
            })
        }
        (Some(start_raw), None) => {
            let Some(start) = parse_date_param(start_raw) else {
                return Err(fail(
                    StatusCode::BAD_REQUEST,
                    "Invalid start_date format. Use YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss",
                ));
            };
            Ok(ResolvedRange {
                start: Some(start),
                end: None,
                period: format!("From {}", start_raw),
                filters: HistoryFilters {
                    start_date: Some(start_raw.clone()),
                    end_date: None,
                    days: None,
                },
            })
        }
        (None, Some(end_raw)) => {
            let Some(end) = parse_date_param(end_raw) else {
                return Err(fail(
                    StatusCode::BAD_REQUEST,
                    "Invalid end_date format. Use YYYY-MM-DD or YYYY-MM-DDTHH:mm:ss",
                ));
            };
            Ok(ResolvedRange {
                start: None,
                end: Some(end),
                period: format!("Until {}", end_raw),
                filters: HistoryFilters {
                    start_date: None,
                    end_date: Some(end_raw.clone()),
                    days: None,
                },
            })
        }
        (None, None) => {
            let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
            if days < 0 {
                return Err(fail(
                    StatusCode::BAD_REQUEST,
                    "days must be a non-negative integer",
                ));
            }
            Ok(ResolvedRange {
                start: Some(Utc::now() - Duration::days(days)),
                end: None,
                period: format!("Last {} days", days),
                filters: HistoryFilters {
                    start_date: None,
                    end_date: None,
                    days: Some(days),
                },
            })
        }
    }
}

fn resolve_bucket(interval: &Option<String>) -> Result<(Option<HistoryBucket>, String), Response> {
    let label = interval.as_deref().unwrap_or("1h");
    let bucket = match label {
        "1h" => Some(HistoryBucket::Hour),
        "1d" => Some(HistoryBucket::Day),
        "raw" => None,
        _ => {
            return Err(fail(
                StatusCode::BAD_REQUEST,
                "interval must be one of 1h, 1d, raw",
            ))
        }
    };
    Ok((bucket, label.to_string()))
}

// Historical price handlers
pub async fn get_historical_prices(
    Path(id): Path<i32>,
    Query(params): Query<HistoryQuery>,
    State(state): State<ApiState>,
) -> Response {
    let asset = match AssetOperations::get_asset(state.database.pool(), id).await {
        Ok(Some(asset)) => asset,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Cryptocurrency not found"),
        Err(e) => {
            tracing::error!("Failed to get cryptocurrency {}: {}", id, e);
            return fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e);
        }
    };

    let range = match resolve_date_range(params.days, &params.start_date, &params.end_date) {
        Ok(range) => range,
        Err(response) => return response,
    };
    let (bucket, interval_label) = match resolve_bucket(&params.interval) {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    match PriceOperations::get_price_history(
        state.database.pool(),
        asset.id,
        range.start,
        range.end,
        bucket,
    )
    .await
    {
        Ok(points) => {
            let count = points.len();
            ok(AssetHistory {
                cryptocurrency: AssetBrief {
                    id: asset.id,
                    name: asset.name,
                    symbol: asset.symbol,
                },
                historical_prices: points,
                count,
                period: range.period,
                interval: interval_label,
                filters: range.filters,
            })
        }
        Err(e) => {
            tracing::error!("Failed to get historical prices for {}: {}", id, e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get historical data",
                e,
            )
        }
    }
}

pub async fn get_multiple_historical_prices(
    Query(params): Query<MultiHistoryQuery>,
    State(state): State<ApiState>,
) -> Response {
    let Some(ids_raw) = params.ids.as_ref().filter(|s| !s.trim().is_empty()) else {
        return fail(
            StatusCode::BAD_REQUEST,
            "ids parameter is required (comma separated)",
        );
    };

    let mut ids = Vec::new();
    for part in ids_raw.split(',') {
        match part.trim().parse::<i32>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                return fail(
                    StatusCode::BAD_REQUEST,
                    "ids must be a comma separated list of integers",
                )
            }
        }
    }

    let range = match resolve_date_range(params.days, &params.start_date, &params.end_date) {
        Ok(range) => range,
        Err(response) => return response,
    };

    let assets = match AssetOperations::get_assets_by_ids(state.database.pool(), &ids).await {
        Ok(assets) => assets,
        Err(e) => {
            tracing::error!("Failed to resolve cryptocurrency ids: {}", e);
            return fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e);
        }
    };

    let rows = match PriceOperations::get_price_history_multi(
        state.database.pool(),
        &ids,
        range.start,
        range.end,
    )
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to get historical prices: {}", e);
            return fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get historical data",
                e,
            );
        }
    };

    let mut groups: HashMap<i32, GroupedHistory> = assets
        .into_iter()
        .map(|asset| {
            (
                asset.id,
                GroupedHistory {
                    cryptocurrency: AssetBrief {
                        id: asset.id,
                        name: asset.name,
                        symbol: asset.symbol,
                    },
                    prices: Vec::new(),
                },
            )
        })
        .collect();

    for (asset_id, point) in rows {
        if let Some(group) = groups.get_mut(&asset_id) {
            group.prices.push(point);
        }
    }
    // 没有任何采样的资产不出现在结果里
    groups.retain(|_, group| !group.prices.is_empty());

    let count = groups.len();
    ok(MultiHistoryData {
        groups,
        count,
        period: range.period,
        filters: range.filters,
    })
}

pub async fn get_historical_stats(State(state): State<ApiState>) -> Response {
    match state.updater.historical_stats().await {
        Ok(stats) => ok(stats),
        Err(e) => {
            tracing::error!("Failed to get historical stats: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get historical stats",
                e,
            )
        }
    }
}

pub async fn get_crypto_price_report(State(state): State<ApiState>) -> Response {
    let assets = match AssetOperations::get_active_assets(state.database.pool(), 100_000).await {
        Ok(assets) => assets,
        Err(e) => {
            tracing::error!("Failed to list cryptocurrencies for report: {}", e);
            return fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e);
        }
    };

    let sample_stats = match PriceOperations::per_asset_sample_stats(state.database.pool()).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to compute sample stats: {}", e);
            return fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e);
        }
    };

    let stats_by_asset: HashMap<i32, _> = sample_stats
        .into_iter()
        .map(|s| (s.cryptocurrency_id, s))
        .collect();

    let now = Utc::now();
    let entries: Vec<AssetReportEntry> = assets
        .iter()
        .map(|asset| {
            let stat = stats_by_asset.get(&asset.id);
            let last_update = stat.and_then(|s| s.last_update);
            let has_recent_data = last_update
                .map(|t| now - t < Duration::hours(REPORT_RECENT_WINDOW_HOURS))
                .unwrap_or(false);
            let can_update = resolvable_cmc_id(asset).is_some();

            AssetReportEntry {
                id: asset.id,
                rank: asset.rank,
                symbol: asset.symbol.clone(),
                name: asset.name.clone(),
                is_active: asset.is_active,
                price_count: stat.map(|s| s.price_count).unwrap_or(0),
                last_update,
                has_recent_data,
                status: if can_update { "in_api" } else { "out_of_api" }.to_string(),
                can_update,
            }
        })
        .collect();

    let summary = ReportSummary {
        total_cryptocurrencies: entries.len(),
        in_api: entries.iter().filter(|e| e.can_update).count(),
        out_of_api: entries.iter().filter(|e| !e.can_update).count(),
        with_recent_data: entries.iter().filter(|e| e.has_recent_data).count(),
        without_recent_data: entries.iter().filter(|e| !e.has_recent_data).count(),
    };

    ok(PriceReport {
        summary,
        cryptocurrencies: entries,
    })
}

// Scheduler control handlers
pub async fn get_update_status(State(state): State<ApiState>) -> Response {
    let status = state.updater.get_status();
    match state.updater.historical_stats().await {
        Ok(stats) => ok(UpdateStatusData { status, stats }),
        Err(e) => {
            tracing::error!("Failed to get updater status: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get update service status",
                e,
            )
        }
    }
}

pub async fn start_auto_update(
    State(state): State<ApiState>,
    body: Option<Json<StartUpdateBody>>,
) -> Response {
    let interval = body.and_then(|Json(b)| b.interval).unwrap_or(1);
    if interval == 0 {
        return fail(
            StatusCode::BAD_REQUEST,
            "interval must be a positive number of minutes",
        );
    }

    let started = state.updater.clone().start_auto_update(interval);
    let message = if started {
        format!("Automatic updates started every {} minute(s)", interval)
    } else {
        "Update service is already running".to_string()
    };

    ok_with_message(state.updater.get_status(), message)
}

pub async fn stop_auto_update(State(state): State<ApiState>) -> Response {
    state.updater.stop_auto_update();
    ok_with_message(state.updater.get_status(), "Automatic updates stopped")
}

pub async fn cleanup_old_data(
    State(state): State<ApiState>,
    body: Option<Json<CleanupBody>>,
) -> Response {
    let days_to_keep = body.and_then(|Json(b)| b.days_to_keep).unwrap_or(30);
    if days_to_keep < 0 {
        return fail(
            StatusCode::BAD_REQUEST,
            "days_to_keep must be a non-negative integer",
        );
    }

    match state.updater.cleanup_old_data(days_to_keep).await {
        Ok(deleted_count) => ok_with_message(
            CleanupResult { deleted_count },
            format!("Cleanup completed: {} records deleted", deleted_count),
        ),
        Err(e) => {
            tracing::error!("Failed to clean up old data: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to clean up old data",
                e,
            )
        }
    }
}

pub async fn force_update(State(state): State<ApiState>) -> Response {
    tracing::info!("Manual price update requested");

    let summary = match state.updater.update_prices().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Manual price update failed: {}", e);
            return fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Manual update failed",
                e,
            );
        }
    };

    match state.updater.historical_stats().await {
        Ok(stats) => ok_with_message(
            ForceUpdateData { summary, stats },
            "Manual update completed",
        ),
        Err(e) => {
            tracing::error!("Failed to get stats after manual update: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get historical stats",
                e,
            )
        }
    }
}
