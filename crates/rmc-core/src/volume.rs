//! 體積計算結果模型

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EstimatorConfig, EstimatorError, Result};

/// 訂購狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 體積為 0，尚無訂單
    NoOrder,
    /// 低於最小訂購量
    BelowMinimum,
    /// 可下單
    Orderable,
}

/// 體積與車次估算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    /// 體積（m³，已取整到配置的小數位）
    pub cubic_meters: Decimal,

    /// 所需車次 = ceil(體積 / 單車容量)
    pub truck_count: u32,

    /// 是否低於最小訂購量（體積為 0 時不標記）
    pub below_minimum_order: bool,

    /// 訂購狀態
    pub status: OrderStatus,
}

impl VolumeResult {
    /// 由已取整的體積推導車次與訂購狀態
    pub fn from_cubic_meters(cubic_meters: Decimal, config: &EstimatorConfig) -> Result<Self> {
        let trucks = cubic_meters
            .checked_div(config.truck_capacity_m3)
            .ok_or_else(|| {
                EstimatorError::Overflow(format!(
                    "無法以單車容量 {} 計算車次",
                    config.truck_capacity_m3
                ))
            })?
            .ceil()
            .max(Decimal::ZERO);

        let truck_count = trucks
            .to_u32()
            .ok_or_else(|| EstimatorError::Overflow(format!("車次超出範圍: {}", trucks)))?;

        let status = if cubic_meters <= Decimal::ZERO {
            OrderStatus::NoOrder
        } else if cubic_meters < config.minimum_order_m3 {
            OrderStatus::BelowMinimum
        } else {
            OrderStatus::Orderable
        };

        Ok(Self {
            cubic_meters,
            truck_count,
            below_minimum_order: status == OrderStatus::BelowMinimum,
            status,
        })
    }

    /// 空結果（無訂單）
    pub fn empty() -> Self {
        Self {
            cubic_meters: Decimal::ZERO,
            truck_count: 0,
            below_minimum_order: false,
            status: OrderStatus::NoOrder,
        }
    }

    /// 是否有可顯示的結果
    pub fn has_result(&self) -> bool {
        self.status != OrderStatus::NoOrder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truck_count_and_status() {
        let config = EstimatorConfig::default();

        let small = VolumeResult::from_cubic_meters(Decimal::new(18, 1), &config).unwrap();
        assert_eq!(small.truck_count, 1);
        assert!(small.below_minimum_order);
        assert_eq!(small.status, OrderStatus::BelowMinimum);

        let exact = VolumeResult::from_cubic_meters(Decimal::from(14), &config).unwrap();
        assert_eq!(exact.truck_count, 2);
        assert!(!exact.below_minimum_order);
        assert_eq!(exact.status, OrderStatus::Orderable);

        let over = VolumeResult::from_cubic_meters(Decimal::new(14001, 3), &config).unwrap();
        assert_eq!(over.truck_count, 3);
    }

    #[test]
    fn test_zero_volume_is_no_order() {
        let config = EstimatorConfig::default();
        let result = VolumeResult::from_cubic_meters(Decimal::ZERO, &config).unwrap();

        assert_eq!(result, VolumeResult::empty());
        assert!(!result.below_minimum_order);
        assert!(!result.has_result());
    }

    #[test]
    fn test_minimum_boundary() {
        let config = EstimatorConfig::default();
        let result = VolumeResult::from_cubic_meters(Decimal::from(3), &config).unwrap();

        assert_eq!(result.status, OrderStatus::Orderable);
        assert!(!result.below_minimum_order);
    }
}
