//! # Forecast Core
//!
//! 需求預測核心資料模型、配置與外部協作介面

pub mod clock;
pub mod config;
pub mod forecast;
pub mod item;
pub mod movement;
pub mod source;

// Re-export 主要類型
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConsumptionVocabulary, ForecastConfig};
pub use forecast::{
    DailyDemandPoint, ForecastAlgorithm, ForecastResult, RiskLevel, NO_DEPLETION_DAYS,
};
pub use item::StockItem;
pub use movement::{MovementKind, MovementRecord};
pub use source::{ForecastStore, InventorySource, MovementSource};

/// 預測錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("找不到庫存物料: {0}")]
    ItemNotFound(String),

    #[error("找不到預測記錄: {0}")]
    ForecastNotFound(String),

    #[error("資料來源錯誤: {0}")]
    Source(String),

    #[error("預測儲存錯誤: {0}")]
    Store(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("無效的風險等級: {0}")]
    InvalidRiskLevel(String),

    #[error("無效的異動類型: {0}")]
    InvalidMovementKind(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
