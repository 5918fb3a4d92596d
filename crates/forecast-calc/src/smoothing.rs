//! Holt 雙指數平滑（水準 + 趨勢）

use rust_decimal::Decimal;

/// 平滑結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothedDemand {
    /// 最終水準
    pub level: Decimal,
    /// 最終趨勢
    pub trend: Decimal,
    /// 預測日需求 = max(0, 水準 + 趨勢)
    pub forecast: Decimal,
}

/// Holt 線性趨勢平滑器
#[derive(Debug, Clone, Copy)]
pub struct HoltSmoother {
    alpha: Decimal,
    beta: Decimal,
}

impl HoltSmoother {
    pub fn new(alpha: Decimal, beta: Decimal) -> Self {
        Self { alpha, beta }
    }

    /// 對活動日序列做平滑
    ///
    /// 初始水準為第一個值，初始趨勢為前兩個值之差（只有一個值時為 0）。
    /// 序列只包含有消耗的日期，估計值會比補零的日曆序列偏高。
    pub fn smooth(&self, values: &[Decimal]) -> Option<SmoothedDemand> {
        let (&first, rest) = values.split_first()?;

        let mut level = first;
        let mut trend = rest.first().map(|&second| second - first).unwrap_or(Decimal::ZERO);

        let keep_level = Decimal::ONE - self.alpha;
        let keep_trend = Decimal::ONE - self.beta;

        for &value in rest {
            let new_level = self.alpha * value + keep_level * (level + trend);
            let new_trend = self.beta * (new_level - level) + keep_trend * trend;

            level = new_level;
            trend = new_trend;
        }

        Some(SmoothedDemand {
            level,
            trend,
            forecast: (level + trend).max(Decimal::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn smoother() -> HoltSmoother {
        HoltSmoother::new(Decimal::new(3, 1), Decimal::new(2, 1))
    }

    fn series(values: &[i64]) -> Vec<Decimal> {
        values.iter().map(|&v| Decimal::from(v)).collect()
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(smoother().smooth(&[]), None);
    }

    #[test]
    fn test_single_point() {
        let result = smoother().smooth(&series(&[8])).unwrap();

        assert_eq!(result.level, Decimal::from(8));
        assert_eq!(result.trend, Decimal::ZERO);
        assert_eq!(result.forecast, Decimal::from(8));
    }

    #[rstest]
    #[case(&[5, 5, 5, 5, 5, 5, 5], 5)]
    #[case(&[12, 12, 12, 12, 12, 12, 12, 12, 12], 12)]
    #[case(&[0, 0, 0, 0, 0, 0, 0], 0)]
    fn test_steady_series(#[case] values: &[i64], #[case] expected: i64) {
        let result = smoother().smooth(&series(values)).unwrap();

        assert_eq!(result.forecast, Decimal::from(expected));
        assert_eq!(result.trend, Decimal::ZERO);
    }

    #[test]
    fn test_two_points_recurrence() {
        // level0 = 10, trend0 = 4
        // level1 = 0.3*14 + 0.7*(10+4) = 14
        // trend1 = 0.2*(14-10) + 0.8*4 = 4
        let result = smoother().smooth(&series(&[10, 14])).unwrap();

        assert_eq!(result.level, Decimal::from(14));
        assert_eq!(result.trend, Decimal::from(4));
        assert_eq!(result.forecast, Decimal::from(18));
    }

    #[test]
    fn test_rising_trend_is_tracked() {
        let result = smoother()
            .smooth(&series(&[2, 4, 6, 8, 10, 12, 14]))
            .unwrap();

        assert!(result.trend > Decimal::ZERO);
        assert!(result.forecast > Decimal::from(14));
    }

    #[test]
    fn test_collapsing_demand_clamps_to_zero() {
        let result = smoother()
            .smooth(&series(&[100, 40, 1, 1, 1, 1, 1]))
            .unwrap();

        assert!(result.level + result.trend < Decimal::ZERO);
        assert_eq!(result.forecast, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_forecast_never_negative(values in prop::collection::vec(0i64..10_000, 1..60)) {
            let result = smoother().smooth(&series(&values)).unwrap();
            prop_assert!(result.forecast >= Decimal::ZERO);
        }
    }
}
