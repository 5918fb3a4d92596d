//! 外部協作介面（庫存、異動、預測儲存）

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{ForecastResult, MovementRecord, Result, StockItem};

/// 庫存系統
pub trait InventorySource: Send + Sync {
    /// 依 SKU 查詢物料，不存在時回傳 `None`
    fn find_by_sku(&self, sku: &str) -> Result<Option<StockItem>>;

    /// 列出所有物料
    fn list_items(&self) -> Result<Vec<StockItem>>;
}

/// 交易異動系統
pub trait MovementSource: Send + Sync {
    /// 查詢 SKU 在 `since` 之後的異動，依時間排序
    fn movements_since(&self, sku: &str, since: NaiveDateTime) -> Result<Vec<MovementRecord>>;
}

/// 預測儲存
///
/// `upsert` 以 SKU 為鍵：已有記錄時沿用其ID並覆寫其餘欄位；
/// 若既有記錄的生成時間晚於寫入者，保留既有記錄並回傳之。
pub trait ForecastStore: Send + Sync {
    fn upsert(&self, forecast: ForecastResult) -> Result<ForecastResult>;

    fn find_by_sku(&self, sku: &str) -> Result<Option<ForecastResult>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<ForecastResult>>;

    fn list(&self) -> Result<Vec<ForecastResult>>;

    /// 刪除記錄，回傳是否存在
    fn delete(&self, id: Uuid) -> Result<bool>;
}
