use super::{fail, fail_with_error, ok, ok_with_count, ok_with_message};
use crate::api::ApiState;
use crate::database::operations::{AssetFilter, AssetOperations, MetadataOperations};
use crate::services::ImportService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AssetListQuery {
    pub q: Option<String>,
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub active: Option<bool>,
    pub sort_by: Option<String>, // rank, name, symbol, created_at
    pub order: Option<String>,   // asc, desc
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Cryptocurrency registry handlers
pub async fn get_cryptocurrencies(
    Query(params): Query<AssetListQuery>,
    State(state): State<ApiState>,
) -> Response {
    let filter = AssetFilter {
        q: params.q,
        min_rank: params.min_rank,
        max_rank: params.max_rank,
        active: params.active,
        sort_by: params.sort_by.unwrap_or_else(|| "rank".to_string()),
        order: params.order.unwrap_or_else(|| "asc".to_string()),
        limit: params.limit.unwrap_or(100).clamp(1, 500),
        offset: params.offset.unwrap_or(0).max(0),
    };

    match AssetOperations::list_assets(state.database.pool(), &filter).await {
        Ok(assets) => {
            let count = assets.len();
            ok_with_count(assets, count)
        }
        Err(e) => {
            tracing::error!("Failed to list cryptocurrencies: {}", e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn get_active_cryptocurrencies(State(state): State<ApiState>) -> Response {
    let filter = AssetFilter {
        active: Some(true),
        limit: 10_000,
        ..Default::default()
    };

    match AssetOperations::list_assets(state.database.pool(), &filter).await {
        Ok(assets) => {
            let count = assets.len();
            ok_with_count(assets, count)
        }
        Err(e) => {
            tracing::error!("Failed to list active cryptocurrencies: {}", e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn get_cryptocurrency_by_id(
    Path(id): Path<i32>,
    State(state): State<ApiState>,
) -> Response {
    match AssetOperations::get_asset(state.database.pool(), id).await {
        Ok(Some(asset)) => ok(asset),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Cryptocurrency not found"),
        Err(e) => {
            tracing::error!("Failed to get cryptocurrency {}: {}", id, e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn get_cryptocurrency_by_symbol(
    Path(symbol): Path<String>,
    State(state): State<ApiState>,
) -> Response {
    match AssetOperations::get_asset_by_symbol(state.database.pool(), &symbol).await {
        Ok(Some(asset)) => ok(asset),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Cryptocurrency not found"),
        Err(e) => {
            tracing::error!("Failed to get cryptocurrency by symbol {}: {}", symbol, e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn get_cryptocurrency_metadata(
    Path(id): Path<i32>,
    State(state): State<ApiState>,
) -> Response {
    match MetadataOperations::get_metadata(state.database.pool(), id).await {
        Ok(Some(metadata)) => ok(metadata),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Metadata not found"),
        Err(e) => {
            tracing::error!("Failed to get metadata for cryptocurrency {}: {}", id, e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn get_cryptocurrencies_with_metadata(State(state): State<ApiState>) -> Response {
    match AssetOperations::list_assets_with_metadata(state.database.pool()).await {
        Ok(rows) => {
            let count = rows.len();
            ok_with_count(rows, count)
        }
        Err(e) => {
            tracing::error!("Failed to list cryptocurrencies with metadata: {}", e);
            fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e)
        }
    }
}

pub async fn fetch_and_save_cryptocurrencies(State(state): State<ApiState>) -> Response {
    let import = ImportService::new(Arc::clone(&state.database), Arc::clone(&state.market));

    match import.fetch_and_save_all().await {
        Ok(result) => ok_with_message(result, "Cryptocurrency data imported successfully"),
        Err(e) => {
            tracing::error!("Failed to import cryptocurrency data: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from the external API",
                e,
            )
        }
    }
}
