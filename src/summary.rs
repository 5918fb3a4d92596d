//! 風險統計

use forecast_core::{ForecastResult, RiskLevel};

/// 各風險等級的預測數量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn from_forecasts<'a>(forecasts: impl IntoIterator<Item = &'a ForecastResult>) -> Self {
        let mut summary = Self::default();
        for forecast in forecasts {
            summary.add(forecast.risk_level);
        }
        summary
    }

    pub fn add(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Critical => self.critical,
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    /// 需要補貨關注的數量（CRITICAL + HIGH）
    pub fn needs_attention(&self) -> usize {
        self.critical + self.high
    }
}
