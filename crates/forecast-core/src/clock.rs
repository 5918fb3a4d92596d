//! 時鐘抽象（預測生成時間與回溯視窗）

use chrono::{Local, NaiveDateTime};

/// 提供「現在」時間點
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// 系統本地時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 固定時鐘（測試與重放用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
