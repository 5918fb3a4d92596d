//! # Forecast Calculation Engine
//!
//! 需求預測計算引擎：聚合、平滑、信心度、缺貨推估、補貨與風險分級

pub mod aggregation;
pub mod baseline;
pub mod calculator;
pub mod confidence;
pub mod reorder;
pub mod risk;
pub mod smoothing;
pub mod stockout;

// Re-export 主要類型
pub use aggregation::DemandAggregator;
pub use baseline::BaselineEstimator;
pub use calculator::ForecastCalculator;
pub use confidence::ConfidenceEstimator;
pub use reorder::{ReorderPlan, ReorderPlanner};
pub use risk::RiskClassifier;
pub use smoothing::{HoltSmoother, SmoothedDemand};
pub use stockout::StockoutProjector;

use forecast_core::ForecastAlgorithm;
use rust_decimal::Decimal;

/// 日需求估計（主路徑或基準路徑的共同輸出）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandEstimate {
    /// 未取整的日需求
    pub daily_rate: Decimal,

    /// 對外呈現的整數日需求
    pub predicted_demand: Decimal,

    /// 信心度（0-100）
    pub confidence: f64,

    /// 演算法
    pub algorithm: ForecastAlgorithm,
}
