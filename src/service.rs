//! 預測服務（單物料與批次生成、查詢）

use std::sync::Arc;

use forecast_cache::SkuLockTable;
use forecast_calc::ForecastCalculator;
use forecast_core::{
    Clock, ForecastConfig, ForecastError, ForecastResult, ForecastStore, InventorySource,
    MovementSource, Result, RiskLevel, StockItem, SystemClock,
};
use rayon::prelude::*;
use uuid::Uuid;

use crate::summary::RiskSummary;

/// 預測服務
///
/// 從庫存與異動來源取得資料，計算後以 SKU 為鍵寫回預測儲存。
/// 同一 SKU 的生成流程（讀取、計算、寫入）在 SKU 鎖內執行，
/// 生成時間也在鎖內取得，因此最後寫入者必定擁有最新的時間戳。
pub struct ForecastService<I, M, S> {
    inventory: I,
    movements: M,
    store: S,
    calculator: ForecastCalculator,
    locks: SkuLockTable,
    clock: Arc<dyn Clock>,
}

impl<I, M, S> ForecastService<I, M, S>
where
    I: InventorySource,
    M: MovementSource,
    S: ForecastStore,
{
    /// 創建新的預測服務
    pub fn new(inventory: I, movements: M, store: S, config: ForecastConfig) -> Result<Self> {
        Ok(Self {
            inventory,
            movements,
            store,
            calculator: ForecastCalculator::new(config)?,
            locks: SkuLockTable::new(),
            clock: Arc::new(SystemClock),
        })
    }

    /// 建構器模式：設置時鐘
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// 生成單一 SKU 的預測並寫入
    pub fn generate_one(&self, sku: &str) -> Result<ForecastResult> {
        self.locks.with_lock(sku, || {
            let item = self
                .inventory
                .find_by_sku(sku)?
                .ok_or_else(|| ForecastError::ItemNotFound(sku.to_string()))?;

            let forecast = self.forecast_item(&item)?;
            tracing::info!(
                "物料 {} 預測完成：{}，風險 {}",
                sku,
                forecast.algorithm,
                forecast.risk_level
            );
            Ok(forecast)
        })
    }

    /// 重新生成單一 SKU 的預測
    pub fn refresh(&self, sku: &str) -> Result<ForecastResult> {
        self.generate_one(sku)
    }

    /// 為所有物料生成預測
    ///
    /// 單一物料失敗只記錄日誌並略過，批次一定會完成並回傳成功的部分。
    pub fn generate_all(&self) -> Vec<ForecastResult> {
        let items = match self.inventory.list_items() {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("無法列出庫存物料，批次預測中止: {}", e);
                return Vec::new();
            }
        };

        tracing::info!("開始批次預測：物料 {} 筆", items.len());
        let start_time = std::time::Instant::now();

        let run = |item: &StockItem| match self
            .locks
            .with_lock(&item.sku, || self.forecast_item(item))
        {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                tracing::error!(sku = %item.sku, "物料 {} 預測失敗: {}", item.sku, e);
                None
            }
        };

        let forecasts: Vec<ForecastResult> = if self.calculator.config().parallel_batch {
            items.par_iter().filter_map(run).collect()
        } else {
            items.iter().filter_map(run).collect()
        };

        // 批次結束後釋放閒置的 SKU 鎖
        self.locks.prune();

        tracing::info!(
            "批次預測完成，成功 {} 筆，失敗 {} 筆，耗時 {:?}",
            forecasts.len(),
            items.len() - forecasts.len(),
            start_time.elapsed()
        );

        forecasts
    }

    /// 單物料流程：讀取歷史 → 計算 → 寫入（呼叫者需持有 SKU 鎖）
    fn forecast_item(&self, item: &StockItem) -> Result<ForecastResult> {
        let now = self.clock.now();
        let history = self
            .movements
            .movements_since(&item.sku, self.calculator.window_start(now))?;

        let forecast = self.calculator.calculate(item, &history, now);
        self.store.upsert(forecast)
    }

    /// 所有預測，依缺貨天數由少到多
    pub fn forecasts(&self) -> Result<Vec<ForecastResult>> {
        let mut forecasts = self.store.list()?;
        sort_by_urgency(&mut forecasts);
        Ok(forecasts)
    }

    /// 指定風險等級的預測，依缺貨天數由少到多
    pub fn forecasts_by_risk(&self, level: RiskLevel) -> Result<Vec<ForecastResult>> {
        let mut forecasts: Vec<ForecastResult> = self
            .store
            .list()?
            .into_iter()
            .filter(|f| f.risk_level == level)
            .collect();
        sort_by_urgency(&mut forecasts);
        Ok(forecasts)
    }

    /// 以文字指定風險等級（不分大小寫）
    pub fn forecasts_by_risk_label(&self, label: &str) -> Result<Vec<ForecastResult>> {
        self.forecasts_by_risk(label.parse()?)
    }

    pub fn forecast_for_sku(&self, sku: &str) -> Result<ForecastResult> {
        self.store
            .find_by_sku(sku)?
            .ok_or_else(|| ForecastError::ForecastNotFound(sku.to_string()))
    }

    pub fn forecast_by_id(&self, id: Uuid) -> Result<ForecastResult> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ForecastError::ForecastNotFound(id.to_string()))
    }

    /// 刪除預測
    pub fn delete_forecast(&self, id: Uuid) -> Result<()> {
        if self.store.delete(id)? {
            tracing::info!("已刪除預測 {}", id);
            Ok(())
        } else {
            Err(ForecastError::ForecastNotFound(id.to_string()))
        }
    }

    /// 各風險等級的預測數量
    pub fn risk_summary(&self) -> Result<RiskSummary> {
        Ok(RiskSummary::from_forecasts(&self.store.list()?))
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn movements(&self) -> &M {
        &self.movements
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calculator(&self) -> &ForecastCalculator {
        &self.calculator
    }
}

fn sort_by_urgency(forecasts: &mut [ForecastResult]) {
    forecasts.sort_by(|a, b| {
        a.days_until_stockout
            .cmp(&b.days_until_stockout)
            .then_with(|| a.sku.cmp(&b.sku))
    });
}
