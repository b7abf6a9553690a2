use crate::config::MarketApiConfig;
use crate::types::{MapEntry, MapResponse, MetadataEntry, MetadataResponse, QuoteData, QuotesResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// 行情源抽象,更新周期只通过它批量拉取报价
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// 按外部ID批量查询最新报价,返回以字符串化ID为键的映射;
    /// 不传ID时行情源返回默认前100名
    async fn fetch_latest_quotes(&self, ids: &[i64]) -> Result<HashMap<String, QuoteData>>;
}

pub struct MarketClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl MarketClient {
    pub fn new(config: &MarketApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .header("User-Agent", "CryptoMonitor/1.0")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("行情API请求失败: {}", response.status()));
        }

        Ok(response.json::<T>().await?)
    }

    /// 前100名资产的注册信息,按外部ID排序
    pub async fn fetch_asset_map(&self) -> Result<Vec<MapEntry>> {
        let url = format!(
            "{}/v1/cryptocurrency/map?start=1&limit=100&sort=id",
            self.api_url
        );
        let response: MapResponse = self.get_json(url).await?;
        Ok(response.data)
    }

    pub async fn fetch_asset_metadata(&self, ids: &[i64]) -> Result<HashMap<String, MetadataEntry>> {
        let id_list = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/v2/cryptocurrency/info?id={}", self.api_url, id_list);
        let response: MetadataResponse = self.get_json(url).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl QuoteSource for MarketClient {
    async fn fetch_latest_quotes(&self, ids: &[i64]) -> Result<HashMap<String, QuoteData>> {
        let url = if ids.is_empty() {
            format!("{}/v2/cryptocurrency/quotes/latest?limit=100", self.api_url)
        } else {
            let id_list = ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("{}/v2/cryptocurrency/quotes/latest?id={}", self.api_url, id_list)
        };

        let response: QuotesResponse = self.get_json(url).await?;
        Ok(response.data)
    }
}
