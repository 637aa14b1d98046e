//! 體積與車次估算

use rmc_core::{
    parse_quantity, round_half_up, Dimension, EstimatorConfig, EstimatorError, ThicknessDimension,
    UnitPolicy, VolumeResult,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units::UnitConverter;

/// 體積計算輸入（長、寬、厚與是否含樓梯）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub length: Dimension,
    pub width: Dimension,
    pub thickness: ThicknessDimension,
    pub stairs: bool,
}

impl VolumeRequest {
    pub fn new(
        length: Dimension,
        width: Dimension,
        thickness: ThicknessDimension,
        stairs: bool,
    ) -> Self {
        Self {
            length,
            width,
            thickness,
            stairs,
        }
    }

    /// 由表單欄位（數值字串、單位代碼）建立；缺值數值視為 0
    pub fn from_form(
        length: (&str, &str),
        width: (&str, &str),
        thickness: (&str, &str),
        stairs: bool,
        policy: UnitPolicy,
    ) -> rmc_core::Result<Self> {
        let value = |raw: &str| parse_quantity(raw).unwrap_or(Decimal::ZERO);

        Ok(Self {
            length: Dimension::new(value(length.0), UnitConverter::length_unit(length.1, policy)?),
            width: Dimension::new(value(width.0), UnitConverter::length_unit(width.1, policy)?),
            thickness: ThicknessDimension::new(
                value(thickness.0),
                UnitConverter::thickness_unit(thickness.1, policy)?,
            ),
            stairs,
        })
    }
}

/// 體積計算器
pub struct VolumeCalculator;

impl VolumeCalculator {
    /// 以公尺為單位的尺寸計算體積
    ///
    /// 體積 = 長 × 寬 × 厚，含樓梯時乘上加成係數，取整到配置的小數位。
    pub fn compute(
        length_m: Decimal,
        width_m: Decimal,
        thickness_m: Decimal,
        stairs: bool,
        config: &EstimatorConfig,
    ) -> rmc_core::Result<VolumeResult> {
        let overflow = || {
            EstimatorError::Overflow(format!(
                "體積計算溢出: {} × {} × {}",
                length_m, width_m, thickness_m
            ))
        };

        let mut volume = length_m
            .checked_mul(width_m)
            .and_then(|area| area.checked_mul(thickness_m))
            .ok_or_else(overflow)?;

        if stairs {
            volume = volume.checked_mul(config.stairs_factor).ok_or_else(overflow)?;
        }

        let volume = round_half_up(volume, config.volume_decimals);
        let result = VolumeResult::from_cubic_meters(volume, config)?;

        tracing::debug!(
            "體積 {} m³，車次 {}，狀態 {:?}",
            result.cubic_meters,
            result.truck_count,
            result.status
        );

        Ok(result)
    }

    /// 換算單位後計算體積
    pub fn estimate(
        request: &VolumeRequest,
        config: &EstimatorConfig,
    ) -> rmc_core::Result<VolumeResult> {
        Self::compute(
            UnitConverter::dimension(&request.length),
            UnitConverter::dimension(&request.width),
            UnitConverter::thickness(&request.thickness),
            request.stairs,
            config,
        )
    }
}
