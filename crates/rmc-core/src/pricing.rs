//! 定價請求與回應模型
//!
//! 定價服務本身不在此實作；這裡只定義送出的請求與接收的回應格式。

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{EstimatorConfig, EstimatorError, Result, VolumeResult};

/// 產品引用（變體優先於範本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductRef {
    /// 產品變體
    #[serde(rename = "product_id")]
    Variant(u64),
    /// 產品範本
    #[serde(rename = "product_tmpl_id")]
    Template(u64),
}

impl ProductRef {
    /// 由表單下拉選單的值決定產品；無法解析的值視為未選擇
    pub fn from_selection(variant_id: &str, template_id: &str) -> Option<Self> {
        let parse = |raw: &str| raw.trim().parse::<u64>().ok();

        parse(variant_id)
            .map(Self::Variant)
            .or_else(|| parse(template_id).map(Self::Template))
    }
}

/// 地點覆寫（原樣傳遞給定價服務）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOverrides {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city_override: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub zip_override: Option<String>,
}

impl LocationOverrides {
    /// 空白值不送出
    pub fn new(city: &str, zip: &str) -> Self {
        let keep = |raw: &str| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            city_override: keep(city),
            zip_override: keep(zip),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city_override.is_none() && self.zip_override.is_none()
    }
}

/// 定價請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequestPayload {
    #[serde(flatten)]
    pub product: ProductRef,

    pub qty: Decimal,

    #[serde(flatten)]
    pub location: LocationOverrides,
}

impl PriceRequestPayload {
    pub fn new(product: ProductRef, qty: Decimal, location: LocationOverrides) -> Self {
        Self {
            product,
            qty,
            location,
        }
    }

    /// 轉為 JSON-RPC 參數
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// 定價服務回應
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceBreakdown {
    pub success: bool,

    /// 單價
    pub price: Option<Decimal>,

    /// 單價（舊版欄位名稱，與 `price` 同時出現）
    pub unit_price: Option<Decimal>,

    /// 折扣前總價
    pub base_price: Option<Decimal>,

    /// 折扣後總價
    pub computed_price: Option<Decimal>,

    /// 折扣金額
    pub discount_value: Option<Decimal>,

    /// 車次
    pub truck_count: Option<u32>,

    /// 幣別代碼（未設定幣別時服務端送出 `false`）
    #[serde(deserialize_with = "currency_code")]
    pub currency: Option<String>,

    pub error: Option<String>,

    pub message: Option<String>,
}

impl PriceBreakdown {
    /// 解析定價服務回應
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// 有效單價：`price` 為空或 0 時改用 `unit_price`
    pub fn effective_unit_price(&self) -> Option<Decimal> {
        self.price
            .filter(|price| !price.is_zero())
            .or(self.unit_price)
    }

    /// 失敗回應
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// 以牌價在本地估算（定價服務失敗時使用）
    pub fn fallback(list_price: Decimal, volume: Decimal, config: &EstimatorConfig) -> Result<Self> {
        let total = list_price.checked_mul(volume).ok_or_else(|| {
            EstimatorError::Overflow(format!("牌價 {} × 體積 {}", list_price, volume))
        })?;
        let trucks = VolumeResult::from_cubic_meters(volume, config)?.truck_count;

        Ok(Self {
            success: true,
            price: Some(list_price),
            unit_price: Some(list_price),
            base_price: Some(total),
            computed_price: Some(total),
            discount_value: Some(Decimal::ZERO),
            truck_count: Some(trucks),
            currency: Some(config.default_currency.clone()),
            error: None,
            message: None,
        })
    }
}

fn currency_code<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Currency {
        Code(String),
        Unset(bool),
    }

    Ok(match Option::<Currency>::deserialize(deserializer)? {
        Some(Currency::Code(code)) => Some(code),
        Some(Currency::Unset(_)) | None => None,
    })
}
