//! 記憶體內協作實作（庫存、異動、預測儲存）

use chrono::NaiveDateTime;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use forecast_core::{
    ForecastResult, ForecastStore, InventorySource, MovementRecord, MovementSource, Result,
    StockItem,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 記憶體內庫存
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    items: DashMap<String, StockItem>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以物料清單建立
    pub fn with_items(items: impl IntoIterator<Item = StockItem>) -> Self {
        let inventory = Self::new();
        for item in items {
            inventory.put(item);
        }
        inventory
    }

    /// 新增或覆寫物料
    pub fn put(&self, item: StockItem) {
        self.items.insert(item.sku.clone(), item);
    }

    /// 更新現有庫存，回傳物料是否存在
    pub fn set_quantity(&self, sku: &str, quantity: Decimal) -> bool {
        match self.items.get_mut(sku) {
            Some(mut item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

impl InventorySource for InMemoryInventory {
    fn find_by_sku(&self, sku: &str) -> Result<Option<StockItem>> {
        Ok(self.items.get(sku).map(|item| item.value().clone()))
    }

    /// 依 SKU 排序
    fn list_items(&self) -> Result<Vec<StockItem>> {
        let mut items: Vec<StockItem> = self.items.iter().map(|r| r.value().clone()).collect();
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(items)
    }
}

/// 記憶體內異動歷史
#[derive(Debug, Default)]
pub struct InMemoryMovements {
    records: DashMap<String, Vec<MovementRecord>>,
}

impl InMemoryMovements {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄一筆異動（缺 SKU 的記錄歸入空鍵，查詢不到）
    pub fn record(&self, record: MovementRecord) {
        let key = record.sku.clone().unwrap_or_default();
        self.records.entry(key).or_default().push(record);
    }

    pub fn extend(&self, records: impl IntoIterator<Item = MovementRecord>) {
        for record in records {
            self.record(record);
        }
    }
}

impl MovementSource for InMemoryMovements {
    fn movements_since(&self, sku: &str, since: NaiveDateTime) -> Result<Vec<MovementRecord>> {
        let mut records: Vec<MovementRecord> = self
            .records
            .get(sku)
            .map(|list| {
                list.iter()
                    .filter(|r| r.timestamp.is_some_and(|at| at > since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }
}

/// 記憶體內預測儲存
///
/// 以 SKU 為鍵；寫入時比較生成時間，較舊的結果不會覆蓋較新的結果。
#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    records: DashMap<String, ForecastResult>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ForecastStore for InMemoryForecastStore {
    fn upsert(&self, forecast: ForecastResult) -> Result<ForecastResult> {
        match self.records.entry(forecast.sku.clone()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get();
                if existing.generated_at > forecast.generated_at {
                    tracing::warn!(
                        "物料 {} 的預測較舊（{} < {}），保留既有記錄",
                        forecast.sku,
                        forecast.generated_at,
                        existing.generated_at
                    );
                    return Ok(existing.clone());
                }

                let updated = forecast.with_id(existing.id);
                entry.insert(updated.clone());
                Ok(updated)
            }
            Entry::Vacant(entry) => {
                entry.insert(forecast.clone());
                Ok(forecast)
            }
        }
    }

    fn find_by_sku(&self, sku: &str) -> Result<Option<ForecastResult>> {
        Ok(self.records.get(sku).map(|r| r.value().clone()))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ForecastResult>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.value().id == id)
            .map(|r| r.value().clone()))
    }

    fn list(&self) -> Result<Vec<ForecastResult>> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        let Some(sku) = self
            .records
            .iter()
            .find(|r| r.value().id == id)
            .map(|r| r.key().clone())
        else {
            return Ok(false);
        };

        Ok(self.records.remove_if(&sku, |_, r| r.id == id).is_some())
    }
}
