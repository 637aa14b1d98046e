//! 髒標記追蹤

use std::collections::HashSet;
use std::hash::Hash;

use rmc_core::PriceRequestPayload;

/// 影響定價的輸入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingInput {
    Product,
    Quantity,
    Location,
}

impl PricingInput {
    /// 比較兩個請求，回傳有變更的輸入
    pub fn changed_between(
        previous: Option<&PriceRequestPayload>,
        next: &PriceRequestPayload,
    ) -> Vec<PricingInput> {
        let Some(previous) = previous else {
            return vec![Self::Product, Self::Quantity, Self::Location];
        };

        let mut changed = Vec::new();
        if previous.product != next.product {
            changed.push(Self::Product);
        }
        if previous.qty != next.qty {
            changed.push(Self::Quantity);
        }
        if previous.location != next.location {
            changed.push(Self::Location);
        }
        changed
    }
}

/// 髒標記追蹤器
#[derive(Debug, Clone)]
pub struct DirtyTracker<K = PricingInput> {
    dirty: HashSet<K>,
}

impl<K: Eq + Hash + Clone> DirtyTracker<K> {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty: HashSet::new(),
        }
    }

    /// 標記為髒
    pub fn mark_dirty(&mut self, key: K) {
        self.dirty.insert(key);
    }

    /// 檢查是否為髒
    pub fn is_dirty(&self, key: &K) -> bool {
        self.dirty.contains(key)
    }

    /// 是否有任何髒標記
    pub fn any_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty.clear();
    }

    /// 獲取所有髒項目
    pub fn dirty_keys(&self) -> Vec<K> {
        self.dirty.iter().cloned().collect()
    }
}

impl<K: Eq + Hash + Clone> Default for DirtyTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
