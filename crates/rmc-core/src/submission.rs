//! 報價提交模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EstimatorError, ProductRef, Result};

/// 報價提交內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSubmission {
    #[serde(flatten)]
    pub product: ProductRef,

    /// 訂購數量
    pub qty: Decimal,

    /// 計算器算出的體積（數量未填時使用）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// 交貨日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl QuoteSubmission {
    /// 創建新的報價提交
    pub fn new(product: ProductRef, qty: Decimal) -> Self {
        Self {
            product,
            qty,
            volume: None,
            location: None,
            city: None,
            postal_code: None,
            delivery_date: None,
            contact_name: None,
            contact_phone: None,
            contact_email: None,
        }
    }

    /// 建構器模式：設置體積
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    /// 建構器模式：設置地點
    pub fn with_location(mut self, location: String, city: Option<String>, postal_code: Option<String>) -> Self {
        self.location = Some(location);
        self.city = city;
        self.postal_code = postal_code;
        self
    }

    /// 建構器模式：設置交貨日期
    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    /// 建構器模式：設置聯絡人
    pub fn with_contact(mut self, name: String, phone: Option<String>, email: Option<String>) -> Self {
        self.contact_name = Some(name);
        self.contact_phone = phone;
        self.contact_email = email;
        self
    }

    /// 實際送出的數量：數量非正數時改用體積
    pub fn effective_qty(&self) -> Decimal {
        match self.volume {
            Some(volume) if self.qty <= Decimal::ZERO && volume > Decimal::ZERO => volume,
            _ => self.qty,
        }
    }

    /// 送出前檢查，回傳已套用體積回退的提交內容
    pub fn validate(mut self) -> Result<Self> {
        let qty = self.effective_qty();
        if qty <= Decimal::ZERO {
            return Err(EstimatorError::InvalidQuantity(format!(
                "數量必須大於 0: {}",
                qty
            )));
        }
        self.qty = qty;

        if let Some(email) = self.contact_email.as_deref() {
            if !is_plausible_email(email) {
                return Err(EstimatorError::InvalidContact(format!(
                    "聯絡信箱格式錯誤: {}",
                    email
                )));
            }
        }

        Ok(self)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// `local@host.tld`：不含空白，僅一個 `@`，網域中任一 `.` 兩側皆有字元
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .char_indices()
                    .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
        }
        None => false,
    }
}

/// 報價提交回應
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionResponse {
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub lead_id: Option<u64>,
    pub order_id: Option<u64>,
    /// 產生的報價單下載路徑
    pub report_url: Option<String>,
}

impl SubmissionResponse {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// 錯誤訊息（優先使用 message）
    pub fn error_text(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .or(Some("submission failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_volume_fallback() {
        let submission = QuoteSubmission::new(ProductRef::Variant(4), Decimal::ZERO)
            .with_volume(Decimal::new(45, 1))
            .validate()
            .unwrap();

        assert_eq!(submission.qty, Decimal::new(45, 1));
    }

    #[test]
    fn test_invalid_qty_rejected() {
        let err = QuoteSubmission::new(ProductRef::Template(1), Decimal::ZERO)
            .validate()
            .unwrap_err();

        assert!(matches!(err, EstimatorError::InvalidQuantity(_)));
    }

    #[test]
    fn test_email_check() {
        assert!(is_plausible_email("site@example.com"));
        assert!(!is_plausible_email("site@example"));
        assert!(!is_plausible_email("a b@example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(is_plausible_email("a@.b.com"));
        assert!(is_plausible_email("ops@mail.plant.co.in"));
        assert!(!is_plausible_email("a@b."));
        assert!(!is_plausible_email("a@.com"));
        assert!(!is_plausible_email("a@b@c.com"));

        let result = QuoteSubmission::new(ProductRef::Variant(1), Decimal::ONE)
            .with_contact("Asha".to_string(), None, Some("not-an-email".to_string()))
            .validate();
        assert!(matches!(result, Err(EstimatorError::InvalidContact(_))));
    }

    #[test]
    fn test_submission_json() {
        let submission = QuoteSubmission::new(ProductRef::Variant(9), Decimal::from(12))
            .with_delivery_date(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        let value = submission.to_json().unwrap();

        assert_eq!(value["product_id"], json!(9));
        assert_eq!(value["delivery_date"], json!("2025-11-20"));
        assert!(value.get("contact_email").is_none());
    }

    #[test]
    fn test_response_envelope() {
        let ok = SubmissionResponse::from_json(json!({
            "success": true,
            "lead_id": 31,
            "report_url": "/report/pdf/quote/31"
        }))
        .unwrap();
        assert_eq!(ok.lead_id, Some(31));
        assert_eq!(ok.error_text(), None);

        let failed =
            SubmissionResponse::from_json(json!({"success": false, "error": "product_not_found"}))
                .unwrap();
        assert_eq!(failed.error_text(), Some("product_not_found"));
    }
}
