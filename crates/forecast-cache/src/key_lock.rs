//! 按 SKU 的互斥鎖表

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

/// SKU 鎖表
///
/// 同一 SKU 的預測生成依序執行，不同 SKU 互不阻塞。
#[derive(Debug, Default)]
pub struct SkuLockTable {
    slots: DashMap<String, Arc<Mutex<()>>>,
}

impl SkuLockTable {
    /// 創建新的鎖表
    pub fn new() -> Self {
        Self::default()
    }

    /// 持有 SKU 鎖執行 `f`
    pub fn with_lock<R>(&self, sku: &str, f: impl FnOnce() -> R) -> R {
        // 先複製 Arc 再上鎖，避免持有 DashMap 分片鎖時等待
        let slot = self.slots.entry(sku.to_string()).or_default().clone();
        let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// 檢查 SKU 是否曾被鎖定
    pub fn is_tracked(&self, sku: &str) -> bool {
        self.slots.contains_key(sku)
    }

    /// 已追蹤的 SKU 數量
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 清除閒置的鎖（沒有其他持有者）
    pub fn prune(&self) {
        self.slots.retain(|_, slot| Arc::strong_count(slot) > 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_with_lock_returns_value() {
        let table = SkuLockTable::new();

        let value = table.with_lock("SKU-001", || 42);

        assert_eq!(value, 42);
        assert!(table.is_tracked("SKU-001"));
        assert!(!table.is_tracked("SKU-002"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_sku_is_serialized() {
        let table = Arc::new(SkuLockTable::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    table.with_lock("SKU-001", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_different_skus_do_not_block() {
        let table = SkuLockTable::new();

        // 持有 SKU-001 時仍可取得 SKU-002
        let nested = table.with_lock("SKU-001", || table.with_lock("SKU-002", || "ok"));

        assert_eq!(nested, "ok");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_prune_idle_slots() {
        let table = SkuLockTable::new();
        table.with_lock("SKU-001", || ());
        table.with_lock("SKU-002", || ());

        table.prune();

        assert!(table.is_empty());
    }
}
