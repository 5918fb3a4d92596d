//! 缺貨風險分級

use forecast_core::{RiskLevel, StockItem};
use rust_decimal::Decimal;

/// 風險分級器
///
/// 規則依序比對，第一條符合者勝出。各條件範圍刻意重疊，順序本身即為規則的一部分。
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn classify(
        item: &StockItem,
        reorder_point: Decimal,
        days_until_stockout: u32,
    ) -> RiskLevel {
        let current_stock = item.quantity;
        let half_reorder_point = reorder_point * Decimal::new(5, 1);

        if item.is_out_of_stock() || days_until_stockout == 0 {
            RiskLevel::Critical
        } else if current_stock <= half_reorder_point || days_until_stockout <= 3 {
            RiskLevel::High
        } else if current_stock <= reorder_point || days_until_stockout <= 7 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::NO_DEPLETION_DAYS;
    use rstest::rstest;

    fn on_hand(stock: i64) -> StockItem {
        StockItem::new(
            "SKU-200",
            "Desk Lamp",
            Decimal::from(stock),
            Decimal::from(10),
            Decimal::from(100),
        )
    }

    #[rstest]
    // 缺貨優先於任何其他條件
    #[case(0, 10, NO_DEPLETION_DAYS, RiskLevel::Critical)]
    #[case(-3, 0, 500, RiskLevel::Critical)]
    #[case(5, 10, 0, RiskLevel::Critical)]
    #[case(20, 50, 4, RiskLevel::High)]
    #[case(100, 50, 3, RiskLevel::High)]
    #[case(25, 50, 100, RiskLevel::High)]
    #[case(26, 50, 100, RiskLevel::Medium)]
    #[case(50, 50, 100, RiskLevel::Medium)]
    #[case(200, 50, 7, RiskLevel::Medium)]
    #[case(51, 50, 8, RiskLevel::Low)]
    #[case(40, 0, NO_DEPLETION_DAYS, RiskLevel::Low)]
    fn test_rule_ladder(
        #[case] stock: i64,
        #[case] reorder_point: i64,
        #[case] days: u32,
        #[case] expected: RiskLevel,
    ) {
        assert_eq!(
            RiskClassifier::classify(&on_hand(stock), Decimal::from(reorder_point), days),
            expected
        );
    }

    #[test]
    fn test_empty_shelf_with_healthy_trend_is_critical() {
        // 再訂購點很低、沒有消耗，但庫存為 0
        let level = RiskClassifier::classify(&on_hand(0), Decimal::ZERO, NO_DEPLETION_DAYS);
        assert_eq!(level, RiskLevel::Critical);
    }

    #[test]
    fn test_odd_reorder_point_half() {
        // 再訂購點 13 → 一半為 6.5
        assert_eq!(
            RiskClassifier::classify(&on_hand(6), Decimal::from(13), 100),
            RiskLevel::High
        );
        assert_eq!(
            RiskClassifier::classify(&on_hand(7), Decimal::from(13), 100),
            RiskLevel::Medium
        );
    }
}
