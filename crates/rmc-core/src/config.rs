//! 估算引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EstimatorError, Result};

/// 單位解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitPolicy {
    /// 嚴格：未知單位直接回報錯誤
    #[default]
    Strict,
    /// 寬鬆：未知長度單位視為公尺，未知厚度單位視為毫米
    Lenient,
}

/// 估算引擎參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// 單車容量（m³）
    pub truck_capacity_m3: Decimal,

    /// 最小訂購量（m³）
    pub minimum_order_m3: Decimal,

    /// 樓梯加成係數
    pub stairs_factor: Decimal,

    /// 體積小數位數
    pub volume_decimals: u32,

    /// 連動數量顯示小數位數
    pub quantity_decimals: u32,

    /// MGQ 取整步長
    pub mgq_snap_step: Decimal,

    /// 單一運輸單位涵蓋的每月保證量（m³）
    pub transport_coverage_m3: Decimal,

    /// 定價請求防抖延遲（毫秒）
    pub pricing_debounce_ms: u64,

    /// 單位解析策略
    pub unit_policy: UnitPolicy,

    /// 定價回應缺少幣別時的預設幣別
    pub default_currency: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            truck_capacity_m3: Decimal::from(7),
            minimum_order_m3: Decimal::from(3),
            stairs_factor: Decimal::new(110, 2),
            volume_decimals: 3,
            quantity_decimals: 2,
            mgq_snap_step: Decimal::from(100),
            transport_coverage_m3: Decimal::from(750),
            pricing_debounce_ms: 400,
            unit_policy: UnitPolicy::Strict,
            default_currency: "INR".to_string(),
        }
    }
}

impl EstimatorConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置單車容量
    pub fn with_truck_capacity(mut self, capacity: Decimal) -> Self {
        self.truck_capacity_m3 = capacity;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_minimum_order(mut self, minimum: Decimal) -> Self {
        self.minimum_order_m3 = minimum;
        self
    }

    /// 建構器模式：設置樓梯加成係數
    pub fn with_stairs_factor(mut self, factor: Decimal) -> Self {
        self.stairs_factor = factor;
        self
    }

    /// 建構器模式：設置 MGQ 取整步長
    pub fn with_mgq_snap_step(mut self, step: Decimal) -> Self {
        self.mgq_snap_step = step;
        self
    }

    /// 建構器模式：設置運輸涵蓋量
    pub fn with_transport_coverage(mut self, coverage: Decimal) -> Self {
        self.transport_coverage_m3 = coverage;
        self
    }

    /// 建構器模式：設置防抖延遲
    pub fn with_pricing_debounce_ms(mut self, millis: u64) -> Self {
        self.pricing_debounce_ms = millis;
        self
    }

    /// 建構器模式：設置單位解析策略
    ///
    /// # 範例
    /// ```
    /// # use rmc_core::{EstimatorConfig, UnitPolicy};
    /// let config = EstimatorConfig::new().with_unit_policy(UnitPolicy::Lenient);
    /// assert_eq!(config.unit_policy, UnitPolicy::Lenient);
    /// ```
    pub fn with_unit_policy(mut self, policy: UnitPolicy) -> Self {
        self.unit_policy = policy;
        self
    }

    /// 防抖延遲
    pub fn pricing_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.pricing_debounce_ms)
    }

    /// 檢查配置是否合理
    pub fn validate(&self) -> Result<()> {
        if self.truck_capacity_m3 <= Decimal::ZERO {
            return Err(EstimatorError::Config(format!(
                "單車容量必須大於 0: {}",
                self.truck_capacity_m3
            )));
        }
        if self.mgq_snap_step <= Decimal::ZERO {
            return Err(EstimatorError::Config(format!(
                "MGQ 取整步長必須大於 0: {}",
                self.mgq_snap_step
            )));
        }
        if self.transport_coverage_m3 <= Decimal::ZERO {
            return Err(EstimatorError::Config(format!(
                "運輸涵蓋量必須大於 0: {}",
                self.transport_coverage_m3
            )));
        }
        if self.stairs_factor < Decimal::ONE {
            return Err(EstimatorError::Config(format!(
                "樓梯加成係數不可小於 1: {}",
                self.stairs_factor
            )));
        }
        if self.minimum_order_m3 < Decimal::ZERO {
            return Err(EstimatorError::Config(format!(
                "最小訂購量不可為負: {}",
                self.minimum_order_m3
            )));
        }
        Ok(())
    }
}
