//! 預測信心度

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 樣本不足兩個時的信心度
pub const LOW_DATA_CONFIDENCE: f64 = 50.0;

/// 信心度估計器
///
/// 變異係數（CV）越低信心度越高：`100 - 50·CV`，再依樣本數加權，
/// 樣本數達到 `sample_target` 時權重為 1，否則最低為 0.7。
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceEstimator {
    sample_target: usize,
}

impl ConfidenceEstimator {
    pub fn new(sample_target: usize) -> Self {
        Self {
            sample_target: sample_target.max(1),
        }
    }

    /// 計算信心度（0-100，已四捨五入）
    pub fn estimate(&self, values: &[Decimal]) -> f64 {
        if values.len() < 2 {
            return LOW_DATA_CONFIDENCE;
        }

        let samples: Vec<f64> = values.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect();
        let n = samples.len() as f64;

        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let cv = if mean > 0.0 { std_dev / mean } else { 1.0 };
        let base = (100.0 - cv * 50.0).clamp(0.0, 100.0);

        let sufficiency = (samples.len() as f64 / self.sample_target as f64).min(1.0);
        let confidence = base * (0.7 + 0.3 * sufficiency);

        confidence.round().clamp(0.0, 100.0)
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new(30)
    }
}
