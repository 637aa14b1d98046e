//! 尺寸單位模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EstimatorError, Result, UnitPolicy};

/// 長度/寬度單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// 公尺
    Meter,
    /// 英尺
    Foot,
}

impl LengthUnit {
    /// 解析表單單位代碼（`m`, `ft` 等）
    ///
    /// 寬鬆策略下未知單位視為公尺。
    pub fn parse(token: &str, policy: UnitPolicy) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meter),
            "ft" | "foot" | "feet" => Ok(Self::Foot),
            other => match policy {
                UnitPolicy::Strict => Err(EstimatorError::UnsupportedUnit(other.to_string())),
                UnitPolicy::Lenient => Ok(Self::Meter),
            },
        }
    }

    /// 表單代碼
    pub fn code(&self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Foot => "ft",
        }
    }
}

/// 厚度單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThicknessUnit {
    /// 毫米
    Millimeter,
    /// 公分
    Centimeter,
    /// 英吋
    Inch,
    /// 公尺
    Meter,
}

impl ThicknessUnit {
    /// 解析表單單位代碼（`mm`, `cm`, `in`, `m` 等）
    ///
    /// 寬鬆策略下未知單位視為毫米。
    pub fn parse(token: &str, policy: UnitPolicy) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" | "centimetre" => Ok(Self::Centimeter),
            "in" | "inch" | "inches" => Ok(Self::Inch),
            "m" | "meter" | "meters" | "metre" => Ok(Self::Meter),
            other => match policy {
                UnitPolicy::Strict => Err(EstimatorError::UnsupportedUnit(other.to_string())),
                UnitPolicy::Lenient => Ok(Self::Millimeter),
            },
        }
    }

    /// 表單代碼
    pub fn code(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Meter => "m",
        }
    }
}

/// 長度或寬度（暫態值，不持久化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: Decimal,
    pub unit: LengthUnit,
}

impl Dimension {
    pub fn new(value: Decimal, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn meters(value: Decimal) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    pub fn feet(value: Decimal) -> Self {
        Self::new(value, LengthUnit::Foot)
    }
}

/// 厚度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessDimension {
    pub value: Decimal,
    pub unit: ThicknessUnit,
}

impl ThicknessDimension {
    pub fn new(value: Decimal, unit: ThicknessUnit) -> Self {
        Self { value, unit }
    }

    pub fn millimeters(value: Decimal) -> Self {
        Self::new(value, ThicknessUnit::Millimeter)
    }
}
