//! 連動數量同步（MGQ × 月數 ↔ 專案總量 / 預計產量）

use rmc_core::{round_half_up, LinkedField, LinkedQuantity};
use rust_decimal::Decimal;

/// 連動值 = MGQ × 月數（取整到顯示小數位）
///
/// 任一值缺值或非正數時回傳 `None`，兩個欄位都應清空。
pub fn linked_value(
    monthly_quantity: Option<Decimal>,
    duration_months: Option<Decimal>,
    decimals: u32,
) -> Option<Decimal> {
    let mgq = monthly_quantity.filter(|v| *v > Decimal::ZERO)?;
    let months = duration_months.filter(|v| *v > Decimal::ZERO)?;

    mgq.checked_mul(months)
        .map(|value| round_half_up(value, decimals))
}

/// 一次連動寫入
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkedWrite {
    /// 由 MGQ 推導，寫入兩個欄位
    Derived(Option<Decimal>),
    /// 使用者手動輸入其中一個欄位，另一個欄位跟隨
    Mirror {
        source: LinkedField,
        value: Option<Decimal>,
    },
}

impl LinkedWrite {
    /// 套用寫入，回傳實際被程式寫入的欄位
    pub fn apply(self, linked: &mut LinkedQuantity) -> Vec<(LinkedField, Option<Decimal>)> {
        let (targets, value): (Vec<LinkedField>, Option<Decimal>) = match self {
            Self::Derived(value) => (
                vec![LinkedField::TotalProject, LinkedField::ExpectedProduction],
                value,
            ),
            Self::Mirror { source, value } => (vec![source.counterpart()], value),
        };

        targets
            .into_iter()
            .map(|field| {
                linked.set(field, value);
                (field, value)
            })
            .collect()
    }
}

/// 連動同步器（重入保護）
///
/// 寫入連動欄位期間，由該寫入引發的欄位編輯一律略過。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkedQuantitySynchronizer {
    syncing: bool,
    suppressed: u32,
}

impl LinkedQuantitySynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否正在寫入連動欄位
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// 被略過的重入次數
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }

    /// 開始同步；已在同步中時回傳 `false`
    pub fn begin(&mut self) -> bool {
        if self.syncing {
            self.suppressed += 1;
            tracing::debug!("連動同步進行中，略過重入寫入");
            return false;
        }
        self.syncing = true;
        true
    }

    /// 結束同步
    pub fn end(&mut self) {
        self.syncing = false;
    }

    /// 欄位編輯是否可處理（同步中引發的編輯會被略過）
    pub fn accepts_edit(&mut self) -> bool {
        if self.syncing {
            self.suppressed += 1;
            tracing::debug!("連動同步進行中，略過回彈的欄位編輯");
            return false;
        }
        true
    }
}
