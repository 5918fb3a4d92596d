//! 庫存物料快照

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存物料（外部庫存系統提供，引擎只讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// 物料 SKU
    pub sku: String,

    /// 顯示名稱
    pub name: String,

    /// 現有庫存
    pub quantity: Decimal,

    /// 最低庫存
    pub min_stock: Decimal,

    /// 最高庫存（容量）
    pub max_stock: Decimal,
}

impl StockItem {
    /// 創建新的庫存物料快照
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: Decimal,
        min_stock: Decimal,
        max_stock: Decimal,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
            min_stock,
            max_stock,
        }
    }

    /// 檢查是否已無庫存
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }

    /// 補滿到最高庫存所需的數量
    pub fn headroom(&self) -> Decimal {
        self.max_stock - self.quantity
    }
}
