//! 預測配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::movement::MovementKind;
use crate::{ForecastError, Result};

/// 需求預測參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 水準平滑係數 α
    pub alpha: Decimal,

    /// 趨勢平滑係數 β
    pub beta: Decimal,

    /// 啟用平滑所需的最少活動天數
    pub min_data_points: usize,

    /// 歷史回溯天數
    pub lookback_days: u32,

    /// 補貨提前期（天）
    pub lead_time_days: u32,

    /// 安全庫存覆蓋天數
    pub safety_stock_days: u32,

    /// 建議訂購量至少覆蓋的天數
    pub order_coverage_days: u32,

    /// 信心度達到完整權重所需的樣本數
    pub confidence_sample_target: usize,

    /// 基準預測假設的週轉天數（約兩個月）
    pub baseline_turnover_days: u32,

    /// 基準預測的固定信心度
    pub baseline_confidence: f64,

    /// 哪些異動類型視為消耗
    pub consumption_vocabulary: ConsumptionVocabulary,

    /// 批次預測是否並行執行
    pub parallel_batch: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            alpha: Decimal::new(3, 1),
            beta: Decimal::new(2, 1),
            min_data_points: 7,
            lookback_days: 90,
            lead_time_days: 7,
            safety_stock_days: 3,
            order_coverage_days: 30,
            confidence_sample_target: 30,
            baseline_turnover_days: 60,
            baseline_confidence: 30.0,
            consumption_vocabulary: ConsumptionVocabulary::StockMovements,
            parallel_batch: false,
        }
    }
}

impl ForecastConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ForecastError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置平滑係數
    pub fn with_smoothing(mut self, alpha: Decimal, beta: Decimal) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// 建構器模式：設置最少活動天數
    pub fn with_min_data_points(mut self, points: usize) -> Self {
        self.min_data_points = points;
        self
    }

    /// 建構器模式：設置回溯天數
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置消耗類型詞彙
    pub fn with_consumption_vocabulary(mut self, vocabulary: ConsumptionVocabulary) -> Self {
        self.consumption_vocabulary = vocabulary;
        self
    }

    /// 建構器模式：設置批次是否並行
    pub fn with_parallel_batch(mut self, parallel: bool) -> Self {
        self.parallel_batch = parallel;
        self
    }

    /// 檢查配置合法性
    pub fn validate(&self) -> Result<()> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if !unit.contains(&self.alpha) || self.alpha.is_zero() {
            return Err(ForecastError::InvalidConfig(format!(
                "alpha 必須在 (0, 1] 之間: {}",
                self.alpha
            )));
        }
        if !unit.contains(&self.beta) || self.beta.is_zero() {
            return Err(ForecastError::InvalidConfig(format!(
                "beta 必須在 (0, 1] 之間: {}",
                self.beta
            )));
        }
        if self.min_data_points < 2 {
            return Err(ForecastError::InvalidConfig(
                "平滑至少需要 2 個活動天數".to_string(),
            ));
        }
        if self.lookback_days == 0 || self.baseline_turnover_days == 0 {
            return Err(ForecastError::InvalidConfig(
                "回溯天數與週轉天數必須大於 0".to_string(),
            ));
        }
        if self.confidence_sample_target == 0 {
            return Err(ForecastError::InvalidConfig(
                "信心度樣本目標必須大於 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.baseline_confidence) {
            return Err(ForecastError::InvalidConfig(format!(
                "基準信心度必須在 0 到 100 之間: {}",
                self.baseline_confidence
            )));
        }
        Ok(())
    }
}

/// 消耗類型詞彙
///
/// 決定哪些異動類型計入需求。歷史系統只比對 `SALE`/`OUTBOUND`，
/// 但實際寫入的異動只有入庫/出庫兩種，因此預設改用出庫詞彙。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionVocabulary {
    /// 出庫類異動（`STOCK_OUT`，並相容 `SALE`/`OUTBOUND`）
    StockMovements,

    /// 僅 `SALE`/`OUTBOUND`（與歷史行為一致）
    LegacyLabels,
}

impl ConsumptionVocabulary {
    /// 檢查異動類型是否計入消耗
    pub fn is_consumption(&self, kind: MovementKind) -> bool {
        match self {
            ConsumptionVocabulary::StockMovements => matches!(
                kind,
                MovementKind::StockOut | MovementKind::Sale | MovementKind::Outbound
            ),
            ConsumptionVocabulary::LegacyLabels => {
                matches!(kind, MovementKind::Sale | MovementKind::Outbound)
            }
        }
    }
}
