//! 合約數量模型（MGQ、連動數量、運輸數量、合約期間）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::{format_plain, format_quantity};

/// 合約期間（月數優先，否則以年數換算）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractDuration {
    pub months: Option<Decimal>,
    pub years: Option<Decimal>,
}

impl ContractDuration {
    pub fn from_months(months: Decimal) -> Self {
        Self {
            months: Some(months),
            years: None,
        }
    }

    pub fn from_years(years: Decimal) -> Self {
        Self {
            months: None,
            years: Some(years),
        }
    }

    /// 有效月數；月數與年數皆缺值或非正數時回傳 `None`
    pub fn effective_months(&self) -> Option<Decimal> {
        let positive = |v: &Decimal| *v > Decimal::ZERO;

        self.months.filter(positive).or_else(|| {
            self.years
                .filter(positive)
                .and_then(|years| years.checked_mul(Decimal::from(12)))
        })
    }
}

/// 每月保證量（MGQ）欄位狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MgqState {
    /// 欄位目前的值
    pub monthly_quantity: Option<Decimal>,

    /// 使用者是否手動輸入過（自上次重設後）
    pub manually_edited: bool,

    /// 最近一次計算出的建議值
    pub suggested_quantity: Option<Decimal>,
}

impl MgqState {
    /// 建議文字狀態
    pub fn advisory(&self) -> MgqAdvisory {
        if self.manually_edited {
            MgqAdvisory::ManualOverride {
                suggested: self.suggested_quantity,
            }
        } else {
            match self.suggested_quantity {
                Some(quantity) => MgqAdvisory::Suggested(quantity),
                None => MgqAdvisory::InsufficientData,
            }
        }
    }

    /// 欄位是否為空
    pub fn is_empty(&self) -> bool {
        self.monthly_quantity.is_none()
    }
}

/// MGQ 建議文字
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MgqAdvisory {
    /// 顯示建議值
    Suggested(Decimal),
    /// 已套用手動值（仍附上最新建議值）
    ManualOverride { suggested: Option<Decimal> },
    /// 資料不足
    InsufficientData,
}

impl fmt::Display for MgqAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suggested(quantity) => {
                write!(f, "Suggested MGQ: {} m³/month", format_plain(*quantity))
            }
            Self::ManualOverride {
                suggested: Some(quantity),
            } => write!(
                f,
                "Updated MGQ applied. Suggested MGQ: {} m³/month",
                format_plain(*quantity)
            ),
            Self::ManualOverride { suggested: None } => write!(f, "Updated MGQ applied."),
            Self::InsufficientData => write!(f, "Enter values to see suggested MGQ."),
        }
    }
}

/// 連動數量欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkedField {
    /// 專案總量
    TotalProject,
    /// 預計產量
    ExpectedProduction,
}

impl LinkedField {
    /// 連動的另一個欄位
    pub fn counterpart(&self) -> Self {
        match self {
            Self::TotalProject => Self::ExpectedProduction,
            Self::ExpectedProduction => Self::TotalProject,
        }
    }
}

/// 連動數量（專案總量、預計產量）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedQuantity {
    pub total_project_quantity: Option<Decimal>,
    pub expected_production_quantity: Option<Decimal>,
}

impl LinkedQuantity {
    pub fn get(&self, field: LinkedField) -> Option<Decimal> {
        match field {
            LinkedField::TotalProject => self.total_project_quantity,
            LinkedField::ExpectedProduction => self.expected_production_quantity,
        }
    }

    pub fn set(&mut self, field: LinkedField, value: Option<Decimal>) {
        match field {
            LinkedField::TotalProject => self.total_project_quantity = value,
            LinkedField::ExpectedProduction => self.expected_production_quantity = value,
        }
    }

    /// 兩個欄位皆清空
    pub fn clear(&mut self) {
        self.total_project_quantity = None;
        self.expected_production_quantity = None;
    }

    pub fn is_empty(&self) -> bool {
        self.total_project_quantity.is_none() && self.expected_production_quantity.is_none()
    }

    /// 欄位顯示字串；缺值顯示為空字串
    pub fn display(&self, field: LinkedField, decimals: u32) -> String {
        self.get(field)
            .map(|value| format_quantity(value, decimals))
            .unwrap_or_default()
    }
}

/// 運輸選配服務狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportState {
    /// 是否勾選運輸服務
    pub enabled: bool,

    /// 運輸數量
    pub quantity: Option<Decimal>,

    /// 使用者是否手動修改過數量
    pub user_edited: bool,
}
