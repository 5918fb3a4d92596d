//! # Forecast Cache
//!
//! 按 SKU 鎖定與記憶體內協作實作

pub mod key_lock;
pub mod memory;

// Re-export 主要類型
pub use key_lock::SkuLockTable;
pub use memory::{InMemoryForecastStore, InMemoryInventory, InMemoryMovements};
