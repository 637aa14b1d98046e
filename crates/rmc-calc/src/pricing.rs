//! 定價請求組裝與價格摘要格式化

use num_format::{Locale, ToFormattedString};
use rmc_core::{
    round_half_up, EstimatorConfig, EstimatorError, LocationOverrides, PriceBreakdown,
    PriceRequestPayload, ProductRef, VolumeResult,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::linked::linked_value;

/// 定價請求建構器
///
/// 只負責決定 `qty` 與產品引用，地點覆寫原樣帶入。
#[derive(Debug, Clone, Default)]
pub struct PriceRequestBuilder {
    product: Option<ProductRef>,
    location: LocationOverrides,
}

impl PriceRequestBuilder {
    pub fn new(product: Option<ProductRef>) -> Self {
        Self {
            product,
            location: LocationOverrides::default(),
        }
    }

    /// 建構器模式：設置地點覆寫
    pub fn with_location(mut self, location: LocationOverrides) -> Self {
        self.location = location;
        self
    }

    /// 以計算器體積作為數量
    pub fn for_volume(&self, volume: &VolumeResult) -> rmc_core::Result<PriceRequestPayload> {
        self.for_quantity(volume.cubic_meters)
    }

    /// 以 MGQ × 合約月數推導的專案總量作為數量
    pub fn for_contract(
        &self,
        snapped_mgq: Option<Decimal>,
        duration_months: Option<Decimal>,
        config: &EstimatorConfig,
    ) -> rmc_core::Result<PriceRequestPayload> {
        let total = linked_value(snapped_mgq, duration_months, config.quantity_decimals)
            .ok_or_else(|| {
                EstimatorError::InvalidQuantity("MGQ 或合約月數未填寫".to_string())
            })?;
        self.for_quantity(total)
    }

    /// 以指定數量
    pub fn for_quantity(&self, qty: Decimal) -> rmc_core::Result<PriceRequestPayload> {
        let product = self.product.ok_or(EstimatorError::MissingProduct)?;
        if qty <= Decimal::ZERO {
            return Err(EstimatorError::InvalidQuantity(format!(
                "定價數量必須大於 0: {}",
                qty
            )));
        }

        Ok(PriceRequestPayload::new(product, qty, self.location.clone()))
    }
}

/// 價格摘要（顯示用字串）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSummary {
    pub unit_price: String,
    pub base_total: String,
    pub estimated_total: String,
    pub discount: String,
    pub truck_count: String,
}

impl PriceSummary {
    /// 無法取得價格時的佔位摘要
    pub fn unavailable() -> Self {
        Self {
            unit_price: "Unit price: —".to_string(),
            base_total: "—".to_string(),
            estimated_total: "₹0".to_string(),
            discount: "₹0".to_string(),
            truck_count: "0".to_string(),
        }
    }

    /// 由定價回應產生摘要
    ///
    /// 總價缺值時以 `單價 × volume_hint` 補上。
    pub fn from_breakdown(breakdown: &PriceBreakdown, volume_hint: Option<Decimal>) -> Self {
        if !breakdown.success {
            return Self::unavailable();
        }

        let currency = currency_symbol(breakdown.currency.as_deref());
        let unit = breakdown.effective_unit_price().unwrap_or(Decimal::ZERO);
        let estimate = |value: Option<Decimal>| {
            value
                .filter(|v| !v.is_zero())
                .or_else(|| volume_hint.and_then(|volume| unit.checked_mul(volume)))
                .unwrap_or(Decimal::ZERO)
        };
        let base_total = estimate(breakdown.base_price);
        let computed_total = estimate(breakdown.computed_price);
        let discount = breakdown.discount_value.unwrap_or(Decimal::ZERO);
        let discount_prefix = if discount > Decimal::ZERO { "-" } else { "" };

        Self {
            unit_price: format!("Unit price: {}{}", currency, format_amount(unit)),
            base_total: format!("{}{}", currency, format_amount(base_total)),
            estimated_total: format!("{}{}", currency, format_amount(computed_total)),
            discount: format!("{}{}{}", discount_prefix, currency, format_amount(discount.abs())),
            truck_count: breakdown.truck_count.unwrap_or(0).to_string(),
        }
    }
}

/// 幣別顯示符號
pub fn currency_symbol(code: Option<&str>) -> String {
    match code.map(str::trim) {
        None | Some("") | Some("INR") => "₹".to_string(),
        Some(code) if code.chars().count() <= 3 => format!("{} ", code),
        Some(code) => code.to_string(),
    }
}

/// 金額格式：千分位、最多兩位小數
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value, 2).normalize();
    let magnitude = rounded.abs();
    let integer = magnitude
        .trunc()
        .to_u128()
        .unwrap_or_default()
        .to_formatted_string(&Locale::en);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fraction = magnitude.fract().normalize();
    if fraction.is_zero() {
        return format!("{}{}", sign, integer);
    }

    let digits = fraction.to_string();
    let digits = digits.strip_prefix("0.").unwrap_or(&digits);
    format!("{}{}.{}", sign, integer, digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("0", "0")]
    #[case("999", "999")]
    #[case("1000", "1,000")]
    #[case("1234567.891", "1,234,567.89")]
    #[case("5200.50", "5,200.5")]
    #[case("-2500", "-2,500")]
    #[case("0.005", "0.01")]
    #[case("79228162514264337593543950335", "79,228,162,514,264,337,593,543,950,335")]
    fn test_format_amount(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(format_amount(d(value)), expected);
    }

    #[rstest]
    #[case(None, "₹")]
    #[case(Some("INR"), "₹")]
    #[case(Some("USD"), "USD ")]
    #[case(Some("DIRHAM"), "DIRHAM")]
    fn test_currency_symbol(#[case] code: Option<&str>, #[case] expected: &str) {
        assert_eq!(currency_symbol(code), expected);
    }

    #[test]
    fn test_builder_prefers_volume_qty() {
        let config = EstimatorConfig::default();
        let volume = VolumeResult::from_cubic_meters(d("4.5"), &config).unwrap();
        let payload = PriceRequestBuilder::new(Some(ProductRef::Variant(3)))
            .with_location(LocationOverrides::new("Pune", ""))
            .for_volume(&volume)
            .unwrap();

        assert_eq!(payload.qty, d("4.5"));
        assert_eq!(payload.product, ProductRef::Variant(3));
        assert_eq!(payload.location.city_override.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_builder_errors() {
        let missing = PriceRequestBuilder::new(None).for_quantity(d("3"));
        assert!(matches!(missing, Err(EstimatorError::MissingProduct)));

        let zero = PriceRequestBuilder::new(Some(ProductRef::Template(1))).for_quantity(Decimal::ZERO);
        assert!(matches!(zero, Err(EstimatorError::InvalidQuantity(_))));
    }

    #[test]
    fn test_builder_for_contract_total() {
        let config = EstimatorConfig::default();
        let builder = PriceRequestBuilder::new(Some(ProductRef::Template(2)));

        let payload = builder.for_contract(Some(d("300")), Some(d("12")), &config).unwrap();
        assert_eq!(payload.qty, d("3600"));

        let missing = builder.for_contract(Some(d("300")), None, &config);
        assert!(matches!(missing, Err(EstimatorError::InvalidQuantity(_))));
    }

    #[test]
    fn test_summary_from_breakdown() {
        let breakdown = PriceBreakdown {
            success: true,
            price: Some(d("5000")),
            base_price: Some(d("20000")),
            computed_price: Some(d("19000")),
            discount_value: Some(d("1000")),
            truck_count: Some(1),
            currency: Some("INR".to_string()),
            ..PriceBreakdown::default()
        };
        let summary = PriceSummary::from_breakdown(&breakdown, Some(d("4")));

        assert_eq!(summary.unit_price, "Unit price: ₹5,000");
        assert_eq!(summary.base_total, "₹20,000");
        assert_eq!(summary.estimated_total, "₹19,000");
        assert_eq!(summary.discount, "-₹1,000");
        assert_eq!(summary.truck_count, "1");
    }

    #[test]
    fn test_summary_fills_missing_totals() {
        let breakdown = PriceBreakdown {
            success: true,
            price: Some(d("4800")),
            currency: Some("USD".to_string()),
            ..PriceBreakdown::default()
        };
        let summary = PriceSummary::from_breakdown(&breakdown, Some(d("2.5")));

        assert_eq!(summary.base_total, "USD 12,000");
        assert_eq!(summary.estimated_total, "USD 12,000");
        assert_eq!(summary.discount, "USD 0");
        assert_eq!(summary.truck_count, "0");
    }

    #[test]
    fn test_summary_reads_legacy_unit_price() {
        let breakdown = PriceBreakdown {
            success: true,
            unit_price: Some(d("5200.5")),
            ..PriceBreakdown::default()
        };
        let summary = PriceSummary::from_breakdown(&breakdown, Some(d("2")));

        assert_eq!(summary.unit_price, "Unit price: ₹5,200.5");
        assert_eq!(summary.estimated_total, "₹10,401");
    }

    #[test]
    fn test_failed_breakdown_uses_placeholders() {
        let summary = PriceSummary::from_breakdown(&PriceBreakdown::failed("invalid_qty"), None);
        assert_eq!(summary, PriceSummary::unavailable());
    }
}
