//! 補貨計劃：安全庫存、再訂購點、建議訂購量

use forecast_core::ForecastConfig;
use rust_decimal::Decimal;

/// 補貨計劃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderPlan {
    /// 安全庫存
    pub safety_stock: Decimal,
    /// 再訂購點 = 提前期需求 + 安全庫存
    pub reorder_point: Decimal,
    /// 建議訂購量
    pub suggested_order_quantity: Decimal,
}

/// 補貨計劃器
#[derive(Debug, Clone, Copy)]
pub struct ReorderPlanner {
    lead_time_days: Decimal,
    safety_stock_days: Decimal,
    order_coverage_days: Decimal,
}

impl ReorderPlanner {
    pub fn new(lead_time_days: u32, safety_stock_days: u32, order_coverage_days: u32) -> Self {
        Self {
            lead_time_days: Decimal::from(lead_time_days),
            safety_stock_days: Decimal::from(safety_stock_days),
            order_coverage_days: Decimal::from(order_coverage_days),
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(
            config.lead_time_days,
            config.safety_stock_days,
            config.order_coverage_days,
        )
    }

    /// 依日需求計算補貨計劃
    ///
    /// 建議訂購量至少補滿到最高庫存，也至少覆蓋 `order_coverage_days` 天的需求。
    pub fn plan(
        &self,
        daily_demand: Decimal,
        current_stock: Decimal,
        max_stock: Decimal,
    ) -> ReorderPlan {
        let safety_stock = (daily_demand * self.safety_stock_days).ceil();
        let reorder_point = (daily_demand * self.lead_time_days).ceil() + safety_stock;

        let refill = max_stock - current_stock;
        let coverage = (daily_demand * self.order_coverage_days).ceil();

        ReorderPlan {
            safety_stock,
            reorder_point,
            suggested_order_quantity: refill.max(coverage),
        }
    }
}

impl Default for ReorderPlanner {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}
