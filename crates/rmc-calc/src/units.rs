//! 單位換算（統一換算為公尺）

use rmc_core::{Dimension, LengthUnit, ThicknessDimension, ThicknessUnit, UnitPolicy};
use rust_decimal::Decimal;

/// 1 英尺 = 0.3048 公尺
const METERS_PER_FOOT: Decimal = Decimal::from_parts(3048, 0, 0, false, 4);

/// 1 英吋 = 25.4 毫米 = 0.0254 公尺
const METERS_PER_INCH: Decimal = Decimal::from_parts(254, 0, 0, false, 4);

/// 長度/寬度換算為公尺
///
/// 負值照常換算，輸入範圍由表單層限制。
pub fn to_meters(value: Decimal, unit: LengthUnit) -> Decimal {
    match unit {
        LengthUnit::Foot => value * METERS_PER_FOOT,
        LengthUnit::Meter => value,
    }
}

/// 厚度換算為公尺
pub fn thickness_to_meters(value: Decimal, unit: ThicknessUnit) -> Decimal {
    match unit {
        ThicknessUnit::Millimeter => value / Decimal::ONE_THOUSAND,
        ThicknessUnit::Centimeter => value / Decimal::ONE_HUNDRED,
        ThicknessUnit::Inch => value * METERS_PER_INCH,
        ThicknessUnit::Meter => value,
    }
}

/// 單位換算器
pub struct UnitConverter;

impl UnitConverter {
    pub fn dimension(dimension: &Dimension) -> Decimal {
        to_meters(dimension.value, dimension.unit)
    }

    pub fn thickness(thickness: &ThicknessDimension) -> Decimal {
        thickness_to_meters(thickness.value, thickness.unit)
    }

    /// 解析表單長度單位；寬鬆策略套用預設單位時記錄警告
    pub fn length_unit(token: &str, policy: UnitPolicy) -> rmc_core::Result<LengthUnit> {
        let unit = LengthUnit::parse(token, policy)?;
        if policy == UnitPolicy::Lenient && LengthUnit::parse(token, UnitPolicy::Strict).is_err() {
            tracing::warn!("未知長度單位 {:?}，視為公尺", token);
        }
        Ok(unit)
    }

    /// 解析表單厚度單位；寬鬆策略套用預設單位時記錄警告
    pub fn thickness_unit(token: &str, policy: UnitPolicy) -> rmc_core::Result<ThicknessUnit> {
        let unit = ThicknessUnit::parse(token, policy)?;
        if policy == UnitPolicy::Lenient && ThicknessUnit::parse(token, UnitPolicy::Strict).is_err() {
            tracing::warn!("未知厚度單位 {:?}，視為毫米", token);
        }
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("10", LengthUnit::Foot, "3.048")]
    #[case("10", LengthUnit::Meter, "10")]
    #[case("0", LengthUnit::Foot, "0")]
    fn test_to_meters(#[case] value: &str, #[case] unit: LengthUnit, #[case] expected: &str) {
        assert_eq!(to_meters(d(value), unit), d(expected));
    }

    #[rstest]
    #[case("1000", ThicknessUnit::Millimeter, "1")]
    #[case("150", ThicknessUnit::Millimeter, "0.15")]
    #[case("100", ThicknessUnit::Centimeter, "1")]
    #[case("1", ThicknessUnit::Inch, "0.0254")]
    #[case("0.2", ThicknessUnit::Meter, "0.2")]
    fn test_thickness_to_meters(
        #[case] value: &str,
        #[case] unit: ThicknessUnit,
        #[case] expected: &str,
    ) {
        assert_eq!(thickness_to_meters(d(value), unit), d(expected));
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert_eq!(to_meters(d("-1"), LengthUnit::Foot), d("-0.3048"));
        assert_eq!(thickness_to_meters(d("-10"), ThicknessUnit::Centimeter), d("-0.1"));
    }

    #[test]
    fn test_converter_unit_parsing() {
        assert_eq!(
            UnitConverter::length_unit("ft", UnitPolicy::Strict).unwrap(),
            LengthUnit::Foot
        );
        assert!(UnitConverter::length_unit("yard", UnitPolicy::Strict).is_err());
        assert_eq!(
            UnitConverter::thickness_unit("yard", UnitPolicy::Lenient).unwrap(),
            ThicknessUnit::Millimeter
        );
    }

    #[test]
    fn test_converter_dimensions() {
        let length = Dimension::feet(d("20"));
        let thickness = ThicknessDimension::millimeters(d("125"));

        assert_eq!(UnitConverter::dimension(&length), d("6.096"));
        assert_eq!(UnitConverter::thickness(&thickness), d("0.125"));
    }

    fn non_negative_decimal() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000_000i64, 0u32..6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    proptest! {
        #[test]
        fn prop_length_conversion(value in non_negative_decimal()) {
            prop_assert_eq!(to_meters(value, LengthUnit::Foot), value * d("0.3048"));
            prop_assert_eq!(to_meters(value, LengthUnit::Meter), value);
        }

        #[test]
        fn prop_thickness_scales(value in non_negative_decimal()) {
            prop_assert_eq!(
                thickness_to_meters(value, ThicknessUnit::Centimeter),
                thickness_to_meters(value * Decimal::TEN, ThicknessUnit::Millimeter)
            );
        }
    }
}
