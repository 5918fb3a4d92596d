//! 預測結果模型

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ForecastError;

/// 未觀察到消耗時的缺貨天數哨兵值
pub const NO_DEPLETION_DAYS: u32 = 999;

/// 單日需求（聚合後，只包含有消耗的日期）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDemandPoint {
    pub date: NaiveDate,
    pub quantity: Decimal,
}

impl DailyDemandPoint {
    pub fn new(date: NaiveDate, quantity: Decimal) -> Self {
        Self { date, quantity }
    }
}

/// 缺貨風險等級
///
/// 排序由高風險到低風險，`Critical < High < Medium < Low`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// 已缺貨或即將缺貨
    Critical,
    /// 低於再訂購點一半或三天內缺貨
    High,
    /// 低於再訂購點或一週內缺貨
    Medium,
    /// 庫存充足
    Low,
}

impl RiskLevel {
    /// 所有等級（由高到低）
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Critical,
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(RiskLevel::Critical),
            "HIGH" => Ok(RiskLevel::High),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "LOW" => Ok(RiskLevel::Low),
            _ => Err(ForecastError::InvalidRiskLevel(s.to_string())),
        }
    }
}

/// 產生預測的演算法路徑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastAlgorithm {
    /// Holt 雙指數平滑（主路徑）
    #[serde(rename = "Exponential Smoothing + Linear Regression")]
    ExponentialSmoothing,
    /// 資料不足時的基準估計
    #[serde(rename = "Baseline (Insufficient Data)")]
    Baseline,
}

impl ForecastAlgorithm {
    pub fn label(&self) -> &'static str {
        match self {
            ForecastAlgorithm::ExponentialSmoothing => "Exponential Smoothing + Linear Regression",
            ForecastAlgorithm::Baseline => "Baseline (Insufficient Data)",
        }
    }
}

impl fmt::Display for ForecastAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 預測結果（每個 SKU 一筆，以 upsert 方式寫入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// 預測記錄ID（重新生成時保持不變）
    pub id: Uuid,

    /// 物料 SKU
    pub sku: String,

    /// 產品名稱
    pub product_name: String,

    /// 生成時的庫存快照
    pub current_stock: Decimal,

    /// 預測日需求（整數單位）
    pub predicted_demand: Decimal,

    /// 未取整的日需求估計
    pub daily_demand_rate: Decimal,

    /// 信心度（0-100）
    pub confidence_score: f64,

    /// 距離缺貨天數，`NO_DEPLETION_DAYS` 表示無消耗
    pub days_until_stockout: u32,

    /// 安全庫存（基準路徑為 0）
    pub safety_stock: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 建議訂購量
    pub suggested_order_quantity: Decimal,

    /// 風險等級
    pub risk_level: RiskLevel,

    /// 演算法
    pub algorithm: ForecastAlgorithm,

    /// 生成時間
    pub generated_at: NaiveDateTime,
}

impl ForecastResult {
    /// 建構器模式：沿用既有記錄的ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 檢查是否為基準路徑結果
    pub fn is_baseline(&self) -> bool {
        self.algorithm == ForecastAlgorithm::Baseline
    }

    /// 檢查是否觀察到消耗
    pub fn has_depletion(&self) -> bool {
        self.days_until_stockout != NO_DEPLETION_DAYS
    }

    /// 比較預測內容（忽略生成時間）
    pub fn same_forecast(&self, other: &ForecastResult) -> bool {
        ForecastResult {
            generated_at: other.generated_at,
            ..self.clone()
        } == *other
    }
}
