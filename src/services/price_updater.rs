use crate::database::operations::{
    day_span, AssetOperations, PriceOperations, StatsOperations, QUOTE_BATCH_LIMIT,
    RESOLVABLE_RANK_MAX,
};
use crate::database::Database;
use crate::services::QuoteSource;
use crate::types::{Asset, CreatePriceSample, CurrencyQuote, HistoricalStats, QuoteData, UpdateSummary, UpdaterStatus};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 价格存储抽象,更新周期对持久层的全部依赖
#[async_trait::async_trait]
pub trait PriceStore: Send + Sync {
    /// 活跃资产,rank升序,最多limit条
    async fn active_assets(&self, limit: i64) -> Result<Vec<Asset>>;
    async fn append_sample(&self, sample: &CreatePriceSample) -> Result<()>;
    async fn delete_samples_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;
    async fn historical_stats(&self) -> Result<HistoricalStats>;
}

#[async_trait::async_trait]
impl PriceStore for Database {
    async fn active_assets(&self, limit: i64) -> Result<Vec<Asset>> {
        AssetOperations::get_active_assets(self.pool(), limit).await
    }

    async fn append_sample(&self, sample: &CreatePriceSample) -> Result<()> {
        PriceOperations::insert_price_sample(self.pool(), sample).await
    }

    async fn delete_samples_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        PriceOperations::delete_samples_before(self.pool(), cutoff).await
    }

    async fn historical_stats(&self) -> Result<HistoricalStats> {
        StatsOperations::historical_stats(self.pool()).await
    }
}

#[derive(Default)]
struct UpdaterState {
    running: bool,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
    last_update: Option<DateTime<Utc>>,
}

/// 周期性价格更新服务
///
/// 每个实例独立持有自己的定时器状态,进程启动时构造一次,
/// 通过Arc注入API层。重启进程后总是处于空闲状态。
pub struct PriceUpdater {
    store: Arc<dyn PriceStore>,
    quotes: Arc<dyn QuoteSource>,
    state: Mutex<UpdaterState>,
    // 单飞守卫:手动触发与定时周期互斥,后到者等待前一个周期完成
    cycle_guard: tokio::sync::Mutex<()>,
}

impl PriceUpdater {
    pub fn new(store: Arc<dyn PriceStore>, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            store,
            quotes,
            state: Mutex::new(UpdaterState::default()),
            cycle_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// 启动自动更新,立即执行首个周期,之后每interval_minutes分钟一次。
    /// 已在运行时不重置现有定时器,返回false
    pub fn start_auto_update(self: Arc<Self>, interval_minutes: u64) -> bool {
        if interval_minutes == 0 {
            warn!("⚠️ 更新间隔必须为正数");
            return false;
        }

        let mut state = self.state.lock().expect("updater state lock poisoned");
        if state.running {
            warn!("⚠️ 价格更新服务已在运行");
            return false;
        }

        info!("🚀 启动自动价格更新,每 {} 分钟一次", interval_minutes);
        state.running = true;

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        state.shutdown = Some(shutdown_tx);

        let updater = Arc::clone(&self);
        state.task = Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_secs(interval_minutes * 60));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = updater.update_prices().await {
                            error!("❌ 价格更新周期失败: {}", e);
                        }
                    }
                    // 停止信号只在周期之间生效,进行中的周期不被打断
                    _ = shutdown_rx.changed() => break,
                }
            }
        }));

        true
    }

    /// 停止自动更新,未运行时为空操作
    pub fn stop_auto_update(&self) {
        let mut state = self.state.lock().expect("updater state lock poisoned");
        if !state.running {
            return;
        }

        if let Some(shutdown) = state.shutdown.take() {
            let _ = shutdown.send(true);
        }
        state.task.take();
        state.running = false;

        info!("⏹️ 价格更新服务已停止");
    }

    /// 一次拉取并落盘的更新周期,定时与手动触发走同一条路径
    pub async fn update_prices(&self) -> Result<UpdateSummary> {
        let _guard = self.cycle_guard.lock().await;

        info!("📊 [{}] 开始价格更新...", Utc::now().to_rfc3339());

        let assets = self.store.active_assets(QUOTE_BATCH_LIMIT).await?;
        if assets.is_empty() {
            warn!("⚠️ 没有已注册的活跃资产可更新");
            return Ok(UpdateSummary::default());
        }

        let ids: Vec<i64> = assets.iter().filter_map(resolvable_cmc_id).collect();
        if ids.is_empty() {
            warn!("⚠️ 没有可用的外部行情标识");
            return Ok(UpdateSummary::default());
        }

        info!("📊 请求 {} 个资产的最新报价", ids.len());
        // 批量请求失败中止整个周期,定时器保持在位等待下个tick
        let quotes = self.quotes.fetch_latest_quotes(&ids).await?;

        let recorded_at = Utc::now();
        let mut summary = UpdateSummary::default();

        for asset in &assets {
            let quote = resolvable_cmc_id(asset)
                .and_then(|cmc_id| quotes.get(&cmc_id.to_string()).map(|q| (cmc_id, q)));

            match quote {
                Some((cmc_id, data)) => match data.usd() {
                    Some(usd) => {
                        let sample = build_price_sample(asset, cmc_id, data, usd, recorded_at);
                        match self.store.append_sample(&sample).await {
                            Ok(()) => summary.saved += 1,
                            Err(e) => {
                                // 单个资产写入失败不影响其余资产
                                error!("❌ 保存 {} 的价格失败: {}", asset.symbol, e);
                                summary.errored += 1;
                            }
                        }
                    }
                    None => {
                        summary.skipped += 1;
                        debug!("⚠️ {} (rank {}) 无USD报价块", asset.symbol, asset.rank);
                    }
                },
                None => {
                    summary.skipped += 1;
                    debug!("⚠️ {} (rank {}) 无报价数据", asset.symbol, asset.rank);
                }
            }
        }

        {
            let mut state = self.state.lock().expect("updater state lock poisoned");
            state.last_update = Some(recorded_at);
        }

        info!(
            "✅ [{}] 更新完成: {} 保存, {} 跳过, {} 错误",
            Utc::now().to_rfc3339(),
            summary.saved,
            summary.skipped,
            summary.errored
        );

        Ok(summary)
    }

    pub fn get_status(&self) -> UpdaterStatus {
        let state = self.state.lock().expect("updater state lock poisoned");
        UpdaterStatus {
            is_running: state.running,
            last_update: state.last_update,
            update_interval: if state.running { "Active" } else { "Inactive" }.to_string(),
        }
    }

    /// 删除recorded_at早于now - days_to_keep天的采样,返回删除行数
    pub async fn cleanup_old_data(&self, days_to_keep: i64) -> Result<u64> {
        if days_to_keep < 0 {
            return Err(anyhow!("保留天数不能为负: {}", days_to_keep));
        }

        let cutoff = Utc::now() - chrono::Duration::days(days_to_keep);
        let deleted = self.store.delete_samples_before(cutoff).await?;

        info!("🧹 清理完成: 删除 {} 条历史记录", deleted);
        Ok(deleted)
    }

    pub async fn historical_stats(&self) -> Result<HistoricalStats> {
        self.store.historical_stats().await
    }
}

/// 资产可向行情源解析时返回其外部ID:
/// 需要导入时记录过cmc_id,且rank落在行情源的可解析窗口内
pub fn resolvable_cmc_id(asset: &Asset) -> Option<i64> {
    match asset.cmc_id {
        Some(cmc_id) if asset.rank >= 1 && asset.rank <= RESOLVABLE_RANK_MAX => Some(cmc_id),
        _ => None,
    }
}

/// 报价到采样行的字段映射:
/// 必填三项缺失补0,其余缺失保持NULL
fn build_price_sample(
    asset: &Asset,
    cmc_id: i64,
    data: &QuoteData,
    usd: &CurrencyQuote,
    recorded_at: DateTime<Utc>,
) -> CreatePriceSample {
    CreatePriceSample {
        cryptocurrency_id: asset.id,
        cmc_id,
        price: usd.price.unwrap_or(Decimal::ZERO),
        market_cap: usd.market_cap.unwrap_or(Decimal::ZERO),
        volume_24h: usd.volume_24h.unwrap_or(Decimal::ZERO),
        percent_change_1h: usd.percent_change_1h,
        percent_change_24h: usd.percent_change_24h,
        percent_change_7d: usd.percent_change_7d,
        percent_change_30d: usd.percent_change_30d,
        percent_change_60d: usd.percent_change_60d,
        percent_change_90d: usd.percent_change_90d,
        market_cap_dominance: usd.market_cap_dominance,
        fully_diluted_market_cap: usd.fully_diluted_market_cap,
        circulating_supply: data.circulating_supply,
        total_supply: data.total_supply,
        max_supply: data.max_supply,
        cmc_rank: data.cmc_rank,
        volume_change_24h: usd.volume_change_24h,
        num_market_pairs: data.num_market_pairs,
        is_active: data.is_active.map(|v| v != 0),
        is_fiat: data.is_fiat.map(|v| v != 0),
        tvl_ratio: data.tvl_ratio,
        tags: data.tags.clone(),
        recorded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemoryStore {
        assets: Vec<Asset>,
        samples: StdMutex<Vec<CreatePriceSample>>,
        fail_asset: Option<i32>,
    }

    #[async_trait::async_trait]
    impl PriceStore for MemoryStore {
        async fn active_assets(&self, limit: i64) -> Result<Vec<Asset>> {
            let mut active: Vec<Asset> =
                self.assets.iter().filter(|a| a.is_active).cloned().collect();
            active.sort_by_key(|a| a.rank);
            active.truncate(limit as usize);
            Ok(active)
        }

        async fn append_sample(&self, sample: &CreatePriceSample) -> Result<()> {
            if self.fail_asset == Some(sample.cryptocurrency_id) {
                return Err(anyhow!("forced write failure"));
            }
            self.samples.lock().unwrap().push(sample.clone());
            Ok(())
        }

        async fn delete_samples_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
            let mut samples = self.samples.lock().unwrap();
            let before = samples.len();
            samples.retain(|s| s.recorded_at >= cutoff);
            Ok((before - samples.len()) as u64)
        }

        async fn historical_stats(&self) -> Result<HistoricalStats> {
            let samples = self.samples.lock().unwrap();
            let oldest = samples.iter().map(|s| s.recorded_at).min();
            let newest = samples.iter().map(|s| s.recorded_at).max();
            let unique: HashSet<i32> = samples.iter().map(|s| s.cryptocurrency_id).collect();
            Ok(HistoricalStats {
                total_records: samples.len() as i64,
                oldest_record: oldest,
                newest_record: newest,
                unique_cryptos: unique.len() as i64,
                data_range_days: day_span(oldest, newest),
            })
        }
    }

    struct StaticQuotes {
        data: HashMap<String, QuoteData>,
        fail: bool,
    }

    impl StaticQuotes {
        fn with(data: HashMap<String, QuoteData>) -> Self {
            Self { data, fail: false }
        }

        fn failing() -> Self {
            Self {
                data: HashMap::new(),
                fail: true,
            }
        }
    }

    #[async_trait::async_trait]
    impl QuoteSource for StaticQuotes {
        async fn fetch_latest_quotes(&self, ids: &[i64]) -> Result<HashMap<String, QuoteData>> {
            if self.fail {
                return Err(anyhow!("upstream unavailable"));
            }
            Ok(ids
                .iter()
                .filter_map(|id| {
                    let key = id.to_string();
                    self.data.get(&key).map(|quote| (key.clone(), quote.clone()))
                })
                .collect())
        }
    }

    fn test_asset(id: i32, rank: i32, symbol: &str, cmc_id: Option<i64>) -> Asset {
        Asset {
            id,
            cmc_id,
            rank,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            slug: symbol.to_lowercase(),
            is_active: true,
            status: 1,
            first_historical_data: None,
            last_historical_data: None,
            platform: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn full_quote(price: f64) -> QuoteData {
        serde_json::from_value(json!({
            "circulating_supply": 19_700_000.0,
            "total_supply": 19_700_000.0,
            "max_supply": 21_000_000.0,
            "cmc_rank": 1,
            "num_market_pairs": 11000,
            "is_active": 1,
            "is_fiat": 0,
            "tags": ["store-of-value"],
            "quote": {
                "USD": {
                    "price": price,
                    "market_cap": 1_280_000_000_000.0,
                    "volume_24h": 35_000_000_000.0,
                    "percent_change_24h": 1.25
                }
            }
        }))
        .unwrap()
    }

    fn price_only_quote(price: f64) -> QuoteData {
        serde_json::from_value(json!({
            "quote": { "USD": { "price": price } }
        }))
        .unwrap()
    }

    fn empty_sample(asset_id: i32, recorded_at: DateTime<Utc>) -> CreatePriceSample {
        CreatePriceSample {
            cryptocurrency_id: asset_id,
            cmc_id: asset_id as i64,
            price: Decimal::ZERO,
            market_cap: Decimal::ZERO,
            volume_24h: Decimal::ZERO,
            percent_change_1h: None,
            percent_change_24h: None,
            percent_change_7d: None,
            percent_change_30d: None,
            percent_change_60d: None,
            percent_change_90d: None,
            market_cap_dominance: None,
            fully_diluted_market_cap: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            cmc_rank: None,
            volume_change_24h: None,
            num_market_pairs: None,
            is_active: None,
            is_fiat: None,
            tvl_ratio: None,
            tags: None,
            recorded_at,
        }
    }

    fn updater(store: Arc<MemoryStore>, quotes: StaticQuotes) -> Arc<PriceUpdater> {
        Arc::new(PriceUpdater::new(store, Arc::new(quotes)))
    }

    #[tokio::test]
    async fn test_cycle_saves_sample_for_ranked_asset() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(7, 1, "BTC", Some(1))],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(
            summary,
            UpdateSummary {
                saved: 1,
                skipped: 0,
                errored: 0
            }
        );

        {
            let samples = store.samples.lock().unwrap();
            assert_eq!(samples.len(), 1);
            assert_eq!(samples[0].cryptocurrency_id, 7);
            assert_eq!(samples[0].cmc_id, 1);
            assert_eq!(samples[0].price, dec!(65000.12));
            assert_eq!(samples[0].percent_change_24h, Some(dec!(1.25)));
            assert_eq!(samples[0].percent_change_7d, None);
            assert_eq!(samples[0].is_active, Some(true));
            assert_eq!(samples[0].is_fiat, Some(false));
            assert_eq!(samples[0].tags, Some(vec!["store-of-value".to_string()]));
        }

        let stats = updater.historical_stats().await.unwrap();
        assert!(stats.total_records >= 1);
        assert!(stats.unique_cryptos >= 1);
    }

    #[tokio::test]
    async fn test_missing_optional_fields_become_null_and_required_zero() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(3, 2, "ETH", Some(1027))],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1027".to_string(), price_only_quote(3200.5));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary.saved, 1);

        let samples = store.samples.lock().unwrap();
        assert_eq!(samples[0].price, dec!(3200.5));
        assert_eq!(samples[0].market_cap, Decimal::ZERO);
        assert_eq!(samples[0].volume_24h, Decimal::ZERO);
        assert_eq!(samples[0].market_cap_dominance, None);
        assert_eq!(samples[0].circulating_supply, None);
        assert_eq!(samples[0].is_active, None);
        assert_eq!(samples[0].tags, None);
    }

    #[tokio::test]
    async fn test_rank_outside_window_yields_no_samples() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(9, 150, "FAR", Some(150))],
            ..Default::default()
        });
        // 行情源里即使有这条数据,窗口外的rank也不应发起查询
        let mut data = HashMap::new();
        data.insert("150".to_string(), full_quote(0.5));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary, UpdateSummary::default());
        assert!(store.samples.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_asset_without_cmc_id_yields_no_samples() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(4, 5, "OLD", None)],
            ..Default::default()
        });
        let updater = updater(store.clone(), StaticQuotes::with(HashMap::new()));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary, UpdateSummary::default());
        assert!(store.samples.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_registry_is_not_an_error() {
        let store = Arc::new(MemoryStore::default());
        let updater = updater(store, StaticQuotes::with(HashMap::new()));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary, UpdateSummary::default());
    }

    #[tokio::test]
    async fn test_missing_quote_counts_as_skipped() {
        let store = Arc::new(MemoryStore {
            assets: vec![
                test_asset(1, 1, "BTC", Some(1)),
                test_asset(2, 2, "ETH", Some(1027)),
            ],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errored, 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated_per_asset() {
        let store = Arc::new(MemoryStore {
            assets: vec![
                test_asset(1, 1, "BTC", Some(1)),
                test_asset(2, 2, "ETH", Some(1027)),
                test_asset(3, 3, "USDT", Some(825)),
            ],
            fail_asset: Some(2),
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        data.insert("1027".to_string(), full_quote(3200.5));
        data.insert("825".to_string(), full_quote(1.0));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        let summary = updater.update_prices().await.unwrap();
        assert_eq!(summary.saved, 2);
        assert_eq!(summary.errored, 1);
        assert_eq!(summary.saved + summary.skipped + summary.errored, 3);

        // 第二个资产失败不阻止第三个资产入库
        let saved_ids: Vec<i32> = store
            .samples
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.cryptocurrency_id)
            .collect();
        assert_eq!(saved_ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_upstream_failure_aborts_cycle() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(1, 1, "BTC", Some(1))],
            ..Default::default()
        });
        let updater = updater(store.clone(), StaticQuotes::failing());

        assert!(updater.update_prices().await.is_err());
        assert!(store.samples.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_noop_with_single_immediate_cycle() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(1, 1, "BTC", Some(1))],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        assert!(updater.clone().start_auto_update(1));
        assert!(!updater.clone().start_auto_update(1));

        // 放行立即执行的首个周期
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.samples.lock().unwrap().len(), 1);

        let status = updater.get_status();
        assert!(status.is_running);
        assert_eq!(status.update_interval, "Active");
        assert!(status.last_update.is_some());

        updater.stop_auto_update();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_repeats_on_interval() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(1, 1, "BTC", Some(1))],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        assert!(updater.clone().start_auto_update(1));
        tokio::time::sleep(Duration::from_secs(125)).await;

        // 立即周期 + 两次tick
        assert_eq!(store.samples.lock().unwrap().len(), 3);
        updater.stop_auto_update();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_future_cycles() {
        let store = Arc::new(MemoryStore {
            assets: vec![test_asset(1, 1, "BTC", Some(1))],
            ..Default::default()
        });
        let mut data = HashMap::new();
        data.insert("1".to_string(), full_quote(65000.12));
        let updater = updater(store.clone(), StaticQuotes::with(data));

        assert!(updater.clone().start_auto_update(1));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.samples.lock().unwrap().len(), 1);

        updater.stop_auto_update();
        let status = updater.get_status();
        assert!(!status.is_running);
        assert_eq!(status.update_interval, "Inactive");

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(store.samples.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let store = Arc::new(MemoryStore::default());
        let updater = updater(store, StaticQuotes::with(HashMap::new()));

        updater.stop_auto_update();
        let status = updater.get_status();
        assert!(!status.is_running);
        assert_eq!(status.update_interval, "Inactive");
        assert!(status.last_update.is_none());
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let updater = updater(store, StaticQuotes::with(HashMap::new()));

        assert!(!updater.clone().start_auto_update(0));
        assert!(!updater.get_status().is_running);
    }

    #[tokio::test]
    async fn test_cleanup_deletes_only_older_samples_and_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        {
            let mut samples = store.samples.lock().unwrap();
            samples.push(empty_sample(1, Utc::now() - chrono::Duration::days(40)));
            samples.push(empty_sample(1, Utc::now() - chrono::Duration::days(10)));
            samples.push(empty_sample(2, Utc::now()));
        }
        let updater = updater(store.clone(), StaticQuotes::with(HashMap::new()));

        let deleted = updater.cleanup_old_data(30).await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.samples.lock().unwrap().len(), 2);

        let deleted_again = updater.cleanup_old_data(30).await.unwrap();
        assert_eq!(deleted_again, 0);
        assert_eq!(store.samples.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cleanup_rejects_negative_days() {
        let store = Arc::new(MemoryStore::default());
        let updater = updater(store, StaticQuotes::with(HashMap::new()));

        assert!(updater.cleanup_old_data(-1).await.is_err());
    }

    #[tokio::test]
    async fn test_historical_stats_day_span() {
        let store = Arc::new(MemoryStore::default());
        {
            let mut samples = store.samples.lock().unwrap();
            samples.push(empty_sample(1, Utc::now() - chrono::Duration::hours(50)));
            samples.push(empty_sample(2, Utc::now()));
        }
        let updater = updater(store.clone(), StaticQuotes::with(HashMap::new()));

        let stats = updater.historical_stats().await.unwrap();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.unique_cryptos, 2);
        // 50小时向上取整为3天
        assert_eq!(stats.data_range_days, 3);
    }
}
