//! 庫存異動模型

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ForecastError;

/// 異動類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// 入庫
    #[serde(alias = "Stock-In")]
    StockIn,
    /// 出庫
    #[serde(alias = "Stock-Out")]
    StockOut,
    /// 銷售（舊系統標籤）
    Sale,
    /// 出貨（舊系統標籤）
    Outbound,
}

impl MovementKind {
    /// 顯示名稱
    pub fn display_name(&self) -> &'static str {
        match self {
            MovementKind::StockIn => "Stock-In",
            MovementKind::StockOut => "Stock-Out",
            MovementKind::Sale => "Sale",
            MovementKind::Outbound => "Outbound",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MovementKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "STOCK_IN" => Ok(MovementKind::StockIn),
            "STOCK_OUT" => Ok(MovementKind::StockOut),
            "SALE" => Ok(MovementKind::Sale),
            "OUTBOUND" => Ok(MovementKind::Outbound),
            _ => Err(ForecastError::InvalidMovementKind(s.to_string())),
        }
    }
}

/// 庫存異動記錄（外部交易系統提供，不可變）
///
/// SKU 或時間戳缺失的記錄視為格式錯誤，聚合時直接略過。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// 物料 SKU
    pub sku: Option<String>,

    /// 異動類型
    pub kind: MovementKind,

    /// 數量（可正可負，聚合時取絕對值）
    pub quantity: Decimal,

    /// 異動時間
    pub timestamp: Option<NaiveDateTime>,
}

impl MovementRecord {
    /// 創建新的異動記錄
    pub fn new(
        sku: impl Into<String>,
        kind: MovementKind,
        quantity: Decimal,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            sku: Some(sku.into()),
            kind,
            quantity,
            timestamp: Some(timestamp),
        }
    }

    /// 檢查 SKU 與時間戳是否齊全
    pub fn is_well_formed(&self) -> bool {
        self.sku.is_some() && self.timestamp.is_some()
    }

    /// 檢查是否屬於指定 SKU
    pub fn belongs_to(&self, sku: &str) -> bool {
        self.sku.as_deref() == Some(sku)
    }
}
