//! # Forecast
//!
//! 庫存需求預測服務：從異動歷史產生補貨訊號並寫回預測儲存

pub mod service;
pub mod summary;

pub use service::ForecastService;
pub use summary::RiskSummary;

// Re-export 核心類型
pub use forecast_calc::ForecastCalculator;
pub use forecast_core::{
    Clock, ConsumptionVocabulary, FixedClock, ForecastAlgorithm, ForecastConfig, ForecastError,
    ForecastResult, ForecastStore, InventorySource, MovementKind, MovementRecord, MovementSource,
    Result, RiskLevel, StockItem, SystemClock, NO_DEPLETION_DAYS,
};
