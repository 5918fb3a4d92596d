//! 單物料預測主計算器

use chrono::{Duration, NaiveDateTime};
use forecast_core::{
    DailyDemandPoint, ForecastAlgorithm, ForecastConfig, ForecastResult, MovementRecord,
    StockItem,
};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::aggregation::DemandAggregator;
use crate::baseline::BaselineEstimator;
use crate::confidence::ConfidenceEstimator;
use crate::reorder::{ReorderPlan, ReorderPlanner};
use crate::risk::RiskClassifier;
use crate::smoothing::HoltSmoother;
use crate::stockout::StockoutProjector;
use crate::DemandEstimate;

/// 預測計算器（無狀態，可跨執行緒共用）
#[derive(Debug, Clone)]
pub struct ForecastCalculator {
    config: ForecastConfig,
    smoother: HoltSmoother,
    confidence: ConfidenceEstimator,
    planner: ReorderPlanner,
    baseline: BaselineEstimator,
}

impl ForecastCalculator {
    /// 創建新的預測計算器
    pub fn new(config: ForecastConfig) -> forecast_core::Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// 以已驗證的配置組裝各步驟
    fn from_valid_config(config: ForecastConfig) -> Self {
        Self {
            smoother: HoltSmoother::new(config.alpha, config.beta),
            confidence: ConfidenceEstimator::new(config.confidence_sample_target),
            planner: ReorderPlanner::from_config(&config),
            baseline: BaselineEstimator::from_config(&config),
            config,
        }
    }

    /// 歷史視窗起點
    pub fn window_start(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::days(i64::from(self.config.lookback_days))
    }

    /// 主預測入口
    ///
    /// `history` 可包含任意異動，此處會再依 SKU、視窗與消耗類型篩選。
    pub fn calculate(
        &self,
        item: &StockItem,
        history: &[MovementRecord],
        now: NaiveDateTime,
    ) -> ForecastResult {
        let consumption = DemandAggregator::select_consumption(
            history,
            &item.sku,
            self.window_start(now),
            self.config.consumption_vocabulary,
        );
        let points = DemandAggregator::aggregate(consumption);

        tracing::debug!(
            "物料 {}: 異動 {} 筆，活動天數 {}",
            item.sku,
            history.len(),
            points.len()
        );

        let (estimate, plan) = match self.estimate_demand(&points) {
            Some(estimate) => {
                let plan = self
                    .planner
                    .plan(estimate.daily_rate, item.quantity, item.max_stock);
                (estimate, plan)
            }
            None => {
                tracing::debug!(
                    "物料 {} 活動天數不足 {}，使用基準預測",
                    item.sku,
                    self.config.min_data_points
                );
                (self.baseline.estimate(item), self.baseline.plan(item))
            }
        };

        self.assemble(item, estimate, plan, now)
    }

    /// 以 Holt 平滑估計日需求，活動天數不足時回傳 `None`
    pub fn estimate_demand(&self, points: &[DailyDemandPoint]) -> Option<DemandEstimate> {
        if points.len() < self.config.min_data_points {
            return None;
        }

        let values = DemandAggregator::values(points);
        let smoothed = self.smoother.smooth(&values)?;

        Some(DemandEstimate {
            daily_rate: smoothed.forecast,
            predicted_demand: smoothed
                .forecast
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            confidence: self.confidence.estimate(&values),
            algorithm: ForecastAlgorithm::ExponentialSmoothing,
        })
    }

    fn assemble(
        &self,
        item: &StockItem,
        estimate: DemandEstimate,
        plan: ReorderPlan,
        now: NaiveDateTime,
    ) -> ForecastResult {
        let days_until_stockout =
            StockoutProjector::days_until_stockout(item.quantity, estimate.daily_rate);
        let risk_level =
            RiskClassifier::classify(item, plan.reorder_point, days_until_stockout);

        tracing::debug!(
            "物料 {} 預測: 日需求 {}，缺貨天數 {}，再訂購點 {}，風險 {}",
            item.sku,
            estimate.daily_rate,
            days_until_stockout,
            plan.reorder_point,
            risk_level
        );

        ForecastResult {
            id: Uuid::new_v4(),
            sku: item.sku.clone(),
            product_name: item.name.clone(),
            current_stock: item.quantity,
            predicted_demand: estimate.predicted_demand,
            daily_demand_rate: estimate.daily_rate,
            confidence_score: estimate.confidence,
            days_until_stockout,
            safety_stock: plan.safety_stock,
            reorder_point: plan.reorder_point,
            suggested_order_quantity: plan.suggested_order_quantity,
            risk_level,
            algorithm: estimate.algorithm,
            generated_at: now,
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

impl Default for ForecastCalculator {
    fn default() -> Self {
        Self::from_valid_config(ForecastConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_core::{ConsumptionVocabulary, MovementKind, RiskLevel, NO_DEPLETION_DAYS};
    use proptest::prelude::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn daily_history(sku: &str, quantities: &[i64]) -> Vec<MovementRecord> {
        let days = quantities.len() as i64;
        quantities
            .iter()
            .enumerate()
            .map(|(i, &qty)| {
                MovementRecord::new(
                    sku,
                    MovementKind::StockOut,
                    Decimal::from(qty),
                    now() - Duration::days(days - i as i64),
                )
            })
            .collect()
    }

    fn item(quantity: i64, min: i64, max: i64) -> StockItem {
        StockItem::new(
            "SKU-001",
            "Wireless Mouse",
            Decimal::from(quantity),
            Decimal::from(min),
            Decimal::from(max),
        )
    }

    #[test]
    fn test_steady_demand() {
        let calculator = ForecastCalculator::default();
        let history = daily_history("SKU-001", &[5; 7]);

        let result = calculator.calculate(&item(20, 10, 100), &history, now());

        assert_eq!(result.algorithm, ForecastAlgorithm::ExponentialSmoothing);
        assert_eq!(result.daily_demand_rate, Decimal::from(5));
        assert_eq!(result.predicted_demand, Decimal::from(5));
        assert_eq!(result.safety_stock, Decimal::from(15));
        assert_eq!(result.reorder_point, Decimal::from(50));
        assert_eq!(result.days_until_stockout, 4);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.confidence_score, 77.0);
        assert_eq!(result.generated_at, now());
    }

    #[test]
    fn test_no_history_uses_baseline() {
        let calculator = ForecastCalculator::default();

        let result = calculator.calculate(&item(30, 50, 500), &[], now());

        assert!(result.is_baseline());
        assert_eq!(result.predicted_demand, Decimal::from(10));
        assert_eq!(result.confidence_score, 30.0);
        assert_eq!(result.reorder_point, Decimal::from(50));
        assert_eq!(result.suggested_order_quantity, Decimal::from(470));
        assert_eq!(result.days_until_stockout, 3);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_six_active_days_is_not_enough() {
        let calculator = ForecastCalculator::default();
        let history = daily_history("SKU-001", &[5; 6]);

        let result = calculator.calculate(&item(30, 50, 500), &history, now());
        assert!(result.is_baseline());
    }

    #[test]
    fn test_many_records_on_few_days_is_not_enough() {
        // 10 筆異動但只落在 2 天
        let calculator = ForecastCalculator::default();
        let history: Vec<MovementRecord> = (0..10)
            .map(|i| {
                MovementRecord::new(
                    "SKU-001",
                    MovementKind::StockOut,
                    Decimal::from(2),
                    now() - Duration::days(1 + i % 2) - Duration::hours(i),
                )
            })
            .collect();

        let result = calculator.calculate(&item(30, 50, 500), &history, now());
        assert!(result.is_baseline());
    }

    #[test]
    fn test_zero_demand_returns_sentinel() {
        let calculator = ForecastCalculator::default();
        let history = daily_history("SKU-001", &[0; 8]);

        let result = calculator.calculate(&item(40, 10, 100), &history, now());

        assert_eq!(result.algorithm, ForecastAlgorithm::ExponentialSmoothing);
        assert_eq!(result.predicted_demand, Decimal::ZERO);
        assert_eq!(result.days_until_stockout, NO_DEPLETION_DAYS);
        assert!(!result.has_depletion());
    }

    #[test]
    fn test_history_outside_window_is_ignored() {
        let calculator = ForecastCalculator::default();
        let mut history = daily_history("SKU-001", &[5; 7]);
        for record in &mut history {
            record.timestamp = record.timestamp.map(|at| at - Duration::days(120));
        }

        let result = calculator.calculate(&item(20, 10, 100), &history, now());
        assert!(result.is_baseline());
    }

    #[test]
    fn test_legacy_vocabulary_never_reaches_smoother() {
        let config = ForecastConfig::default()
            .with_consumption_vocabulary(ConsumptionVocabulary::LegacyLabels);
        let calculator = ForecastCalculator::new(config).unwrap();
        let history = daily_history("SKU-001", &[5; 14]);

        let result = calculator.calculate(&item(20, 10, 100), &history, now());
        assert!(result.is_baseline());
    }

    #[test]
    fn test_out_of_stock_is_critical() {
        let calculator = ForecastCalculator::default();
        let history = daily_history("SKU-001", &[1; 10]);

        let result = calculator.calculate(&item(0, 10, 100), &history, now());
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_tiny_demand_on_huge_stock_saturates() {
        let calculator = ForecastCalculator::default();
        let history: Vec<MovementRecord> = (1..=7)
            .map(|d| {
                MovementRecord::new(
                    "SKU-001",
                    MovementKind::StockOut,
                    Decimal::new(1, 6),
                    now() - Duration::days(d),
                )
            })
            .collect();
        let stock = StockItem::new(
            "SKU-001",
            "Wireless Mouse",
            Decimal::from_i128_with_scale(10_i128.pow(23), 0),
            Decimal::from(10),
            Decimal::from(100),
        );

        let result = calculator.calculate(&stock, &history, now());

        assert_eq!(result.algorithm, ForecastAlgorithm::ExponentialSmoothing);
        assert_eq!(result.daily_demand_rate, Decimal::new(1, 6));
        assert_eq!(result.days_until_stockout, u32::MAX);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_default_matches_validated_config() {
        let calculator = ForecastCalculator::new(ForecastConfig::default()).unwrap();
        let history = daily_history("SKU-001", &[4, 6, 5, 7, 5, 6, 4, 5]);

        let a = calculator.calculate(&item(60, 10, 120), &history, now());
        let b = ForecastCalculator::default().calculate(&item(60, 10, 120), &history, now());

        assert!(a.same_forecast(&b.with_id(a.id)));
    }

    #[test]
    fn test_rounding_half_up() {
        let calculator = ForecastCalculator::default();
        let points: Vec<DailyDemandPoint> = (1..=7)
            .map(|d| {
                DailyDemandPoint::new(
                    NaiveDate::from_ymd_opt(2025, 10, d).unwrap(),
                    Decimal::new(25, 1),
                )
            })
            .collect();

        let estimate = calculator.estimate_demand(&points).unwrap();
        assert_eq!(estimate.daily_rate, Decimal::new(25, 1));
        assert_eq!(estimate.predicted_demand, Decimal::from(3));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ForecastConfig::default().with_min_data_points(0);
        assert!(ForecastCalculator::new(config).is_err());
    }

    proptest! {
        #[test]
        fn prop_result_bounds(
            quantities in prop::collection::vec(0i64..500, 0..40),
            stock in -50i64..2_000,
            min in 0i64..200,
            extra in 0i64..1_000,
        ) {
            let calculator = ForecastCalculator::default();
            let history = daily_history("SKU-001", &quantities);
            let result = calculator.calculate(&item(stock, min, min + extra), &history, now());

            prop_assert!(result.predicted_demand >= Decimal::ZERO);
            prop_assert!(result.daily_demand_rate >= Decimal::ZERO);
            prop_assert!((0.0..=100.0).contains(&result.confidence_score));
            prop_assert!(result.suggested_order_quantity >= Decimal::ZERO);
        }
    }
}
