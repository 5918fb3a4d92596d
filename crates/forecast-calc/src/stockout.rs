//! 缺貨天數推估

use forecast_core::NO_DEPLETION_DAYS;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 缺貨推估器
pub struct StockoutProjector;

impl StockoutProjector {
    /// 計算距離缺貨的天數
    ///
    /// 日需求為 0 時回傳 `NO_DEPLETION_DAYS`；負庫存視為 0 天；
    /// 商數超出 `Decimal` 範圍時取 `u32::MAX`。
    pub fn days_until_stockout(current_stock: Decimal, daily_demand: Decimal) -> u32 {
        if daily_demand <= Decimal::ZERO {
            return NO_DEPLETION_DAYS;
        }
        if current_stock <= Decimal::ZERO {
            return 0;
        }

        let Some(quotient) = current_stock.checked_div(daily_demand) else {
            return u32::MAX;
        };

        let days = quotient.floor();

        days.to_u32().unwrap_or(u32::MAX)
    }
}
