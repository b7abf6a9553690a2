use super::{fail, fail_with_error, ok, ok_with_count};
use crate::api::ApiState;
use crate::database::operations::{AssetOperations, QUOTE_BATCH_LIMIT};
use crate::services::resolvable_cmc_id;
use crate::services::market_client::QuoteSource;
use crate::types::{Asset, LivePrice, MarketSentiment, MarketStats, QuoteData, TopPerformers};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PerformersQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolsQuery {
    pub symbols: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: Option<String>,
}

/// 注册表 + 实时报价的合并行;USD块缺失字段按0处理
fn live_price_from(asset: &Asset, data: &QuoteData) -> LivePrice {
    let usd = data.usd();
    LivePrice {
        id: asset.id,
        name: asset.name.clone(),
        symbol: asset.symbol.clone(),
        slug: asset.slug.clone(),
        rank: asset.rank,
        price: usd.and_then(|u| u.price).unwrap_or(Decimal::ZERO),
        market_cap: usd.and_then(|u| u.market_cap).unwrap_or(Decimal::ZERO),
        volume_24h: usd.and_then(|u| u.volume_24h).unwrap_or(Decimal::ZERO),
        percent_change_1h: usd.and_then(|u| u.percent_change_1h).unwrap_or(Decimal::ZERO),
        percent_change_24h: usd.and_then(|u| u.percent_change_24h).unwrap_or(Decimal::ZERO),
        percent_change_7d: usd.and_then(|u| u.percent_change_7d).unwrap_or(Decimal::ZERO),
        percent_change_30d: usd.and_then(|u| u.percent_change_30d).unwrap_or(Decimal::ZERO),
        percent_change_60d: usd.and_then(|u| u.percent_change_60d).unwrap_or(Decimal::ZERO),
        percent_change_90d: usd.and_then(|u| u.percent_change_90d).unwrap_or(Decimal::ZERO),
        market_cap_dominance: usd
            .and_then(|u| u.market_cap_dominance)
            .unwrap_or(Decimal::ZERO),
        fully_diluted_market_cap: usd
            .and_then(|u| u.fully_diluted_market_cap)
            .unwrap_or(Decimal::ZERO),
        circulating_supply: data.circulating_supply.unwrap_or(Decimal::ZERO),
        total_supply: data.total_supply.unwrap_or(Decimal::ZERO),
        max_supply: data.max_supply,
        cmc_rank: data.cmc_rank.unwrap_or(0),
        last_updated: data.last_updated.unwrap_or_else(Utc::now),
        volume_change_24h: usd.and_then(|u| u.volume_change_24h).unwrap_or(Decimal::ZERO),
        num_market_pairs: data.num_market_pairs.unwrap_or(0),
        is_active: data.is_active.unwrap_or(0),
        is_fiat: data.is_fiat.unwrap_or(0),
        tvl_ratio: data.tvl_ratio,
        tags: data.tags.clone().unwrap_or_default(),
    }
}

/// 已注册活跃资产的实时报价,rank升序
async fn live_prices_for_registered(state: &ApiState) -> Result<Vec<LivePrice>> {
    let assets =
        AssetOperations::get_active_assets(state.database.pool(), QUOTE_BATCH_LIMIT).await?;

    let ids: Vec<i64> = assets.iter().filter_map(resolvable_cmc_id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let quotes = state.market.fetch_latest_quotes(&ids).await?;

    Ok(assets
        .iter()
        .filter_map(|asset| {
            let cmc_id = resolvable_cmc_id(asset)?;
            let data = quotes.get(&cmc_id.to_string())?;
            Some(live_price_from(asset, data))
        })
        .collect())
}

// Live price handlers
pub async fn get_latest_prices(State(state): State<ApiState>) -> Response {
    match live_prices_for_registered(&state).await {
        Ok(prices) => {
            let count = prices.len();
            ok_with_count(prices, count)
        }
        Err(e) => {
            tracing::error!("Failed to fetch latest prices: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

pub async fn get_price_for_crypto(
    Path(id): Path<i32>,
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

    let Some(cmc_id) = resolvable_cmc_id(&asset) else {
        return fail(
            StatusCode::NOT_FOUND,
            "No price data available for this cryptocurrency",
        );
    };

    match state.market.fetch_latest_quotes(&[cmc_id]).await {
        Ok(quotes) => match quotes.get(&cmc_id.to_string()) {
            Some(data) => ok(live_price_from(&asset, data)),
            None => fail(
                StatusCode::NOT_FOUND,
                "No price data available for this cryptocurrency",
            ),
        },
        Err(e) => {
            tracing::error!("Failed to fetch price for cryptocurrency {}: {}", id, e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

fn split_performers(mut prices: Vec<LivePrice>, limit: usize) -> TopPerformers {
    prices.sort_by(|a, b| b.percent_change_24h.cmp(&a.percent_change_24h));

    let gainers: Vec<LivePrice> = prices
        .iter()
        .filter(|p| p.percent_change_24h > Decimal::ZERO)
        .take(limit)
        .cloned()
        .collect();

    let mut losers: Vec<LivePrice> = prices
        .into_iter()
        .filter(|p| p.percent_change_24h < Decimal::ZERO)
        .collect();
    losers.sort_by(|a, b| a.percent_change_24h.cmp(&b.percent_change_24h));
    losers.truncate(limit);

    TopPerformers { gainers, losers }
}

pub async fn get_top_performers(
    Query(params): Query<PerformersQuery>,
    State(state): State<ApiState>,
) -> Response {
    let limit = params.limit.unwrap_or(10);
    match live_prices_for_registered(&state).await {
        Ok(prices) => ok(split_performers(prices, limit)),
        Err(e) => {
            tracing::error!("Failed to compute top performers: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

pub async fn get_top_gainers(
    Query(params): Query<PerformersQuery>,
    State(state): State<ApiState>,
) -> Response {
    let limit = params.limit.unwrap_or(10);
    match live_prices_for_registered(&state).await {
        Ok(prices) => {
            let performers = split_performers(prices, limit);
            let count = performers.gainers.len();
            ok_with_count(performers.gainers, count)
        }
        Err(e) => {
            tracing::error!("Failed to compute top gainers: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

pub async fn get_top_losers(
    Query(params): Query<PerformersQuery>,
    State(state): State<ApiState>,
) -> Response {
    let limit = params.limit.unwrap_or(10);
    match live_prices_for_registered(&state).await {
        Ok(prices) => {
            let performers = split_performers(prices, limit);
            let count = performers.losers.len();
            ok_with_count(performers.losers, count)
        }
        Err(e) => {
            tracing::error!("Failed to compute top losers: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

pub async fn get_market_stats(State(state): State<ApiState>) -> Response {
    let prices = match live_prices_for_registered(&state).await {
        Ok(prices) => prices,
        Err(e) => {
            tracing::error!("Failed to compute market stats: {}", e);
            return fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            );
        }
    };

    let total = prices.len();
    let total_market_cap: Decimal = prices.iter().map(|p| p.market_cap).sum();
    let total_volume_24h: Decimal = prices.iter().map(|p| p.volume_24h).sum();
    let gainers = prices
        .iter()
        .filter(|p| p.percent_change_24h > Decimal::ZERO)
        .count();
    let losers = prices
        .iter()
        .filter(|p| p.percent_change_24h < Decimal::ZERO)
        .count();
    let unchanged = total - gainers - losers;
    let average_change_24h = if total > 0 {
        prices
            .iter()
            .map(|p| p.percent_change_24h)
            .sum::<Decimal>()
            / Decimal::from(total as u64)
    } else {
        Decimal::ZERO
    };

    ok(MarketStats {
        total_cryptocurrencies: total,
        total_market_cap,
        total_volume_24h,
        market_sentiment: MarketSentiment {
            gainers,
            losers,
            unchanged,
        },
        average_change_24h,
    })
}

pub async fn get_prices_by_symbols(
    Query(params): Query<SymbolsQuery>,
    State(state): State<ApiState>,
) -> Response {
    let Some(symbols) = params.symbols.filter(|s| !s.trim().is_empty()) else {
        return fail(
            StatusCode::BAD_REQUEST,
            "symbols parameter is required (comma separated)",
        );
    };

    let symbol_list: Vec<String> = symbols
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    let assets = match AssetOperations::get_assets_by_symbols(state.database.pool(), &symbol_list).await {
        Ok(assets) => assets,
        Err(e) => {
            tracing::error!("Failed to resolve symbols: {}", e);
            return fail_with_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e);
        }
    };

    if assets.is_empty() {
        return fail(StatusCode::NOT_FOUND, "No cryptocurrencies found for the given symbols");
    }

    let ids: Vec<i64> = assets.iter().filter_map(resolvable_cmc_id).collect();
    if ids.is_empty() {
        return fail(
            StatusCode::NOT_FOUND,
            "No price data available for the given symbols",
        );
    }

    match state.market.fetch_latest_quotes(&ids).await {
        Ok(quotes) => {
            let prices: Vec<LivePrice> = assets
                .iter()
                .filter_map(|asset| {
                    let cmc_id = resolvable_cmc_id(asset)?;
                    let data = quotes.get(&cmc_id.to_string())?;
                    Some(live_price_from(asset, data))
                })
                .collect();
            let count = prices.len();
            ok_with_count(prices, count)
        }
        Err(e) => {
            tracing::error!("Failed to fetch prices by symbols: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}

pub async fn get_prices_by_ids(
    Query(params): Query<IdsQuery>,
    State(state): State<ApiState>,
) -> Response {
    let Some(ids_raw) = params.ids.filter(|s| !s.trim().is_empty()) else {
        return fail(
            StatusCode::BAD_REQUEST,
            "ids parameter is required (comma separated)",
        );
    };

    let mut ids = Vec::new();
    for part in ids_raw.split(',') {
        match part.trim().parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                return fail(
                    StatusCode::BAD_REQUEST,
                    "ids must be a comma separated list of integers",
                )
            }
        }
    }

    match state.market.fetch_latest_quotes(&ids).await {
        Ok(quotes) => {
            let count = quotes.len();
            ok_with_count(quotes, count)
        }
        Err(e) => {
            tracing::error!("Failed to fetch prices by ids: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch price data",
                e,
            )
        }
    }
}
