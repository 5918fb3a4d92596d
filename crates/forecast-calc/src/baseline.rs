//! 基準預測（歷史資料不足時）

use forecast_core::{ForecastAlgorithm, ForecastConfig, StockItem};
use rust_decimal::Decimal;

use crate::reorder::ReorderPlan;
use crate::DemandEstimate;

/// 基準估計器
///
/// 假設庫存約在 `turnover_days` 內週轉一次：日需求 = (最低 + 最高庫存) / 週轉天數。
#[derive(Debug, Clone, Copy)]
pub struct BaselineEstimator {
    turnover_days: Decimal,
    confidence: f64,
}

impl BaselineEstimator {
    pub fn new(turnover_days: u32, confidence: f64) -> Self {
        Self {
            turnover_days: Decimal::from(turnover_days.max(1)),
            confidence,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.baseline_turnover_days, config.baseline_confidence)
    }

    /// 估計日需求（整數需求向上取整）
    pub fn estimate(&self, item: &StockItem) -> DemandEstimate {
        let daily_rate =
            ((item.min_stock + item.max_stock) / self.turnover_days).max(Decimal::ZERO);

        DemandEstimate {
            daily_rate,
            predicted_demand: daily_rate.ceil(),
            confidence: self.confidence,
            algorithm: ForecastAlgorithm::Baseline,
        }
    }

    /// 補貨計劃：再訂購點直接取最低庫存，建議量補滿到最高庫存
    ///
    /// 庫存超過最高庫存時建議量為負值，代表超出的數量。
    pub fn plan(&self, item: &StockItem) -> ReorderPlan {
        ReorderPlan {
            safety_stock: Decimal::ZERO,
            reorder_point: item.min_stock,
            suggested_order_quantity: item.headroom(),
        }
    }
}

impl Default for BaselineEstimator {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}
