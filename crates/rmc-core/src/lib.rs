//! # RMC Core
//!
//! 預拌混凝土估算的核心資料模型與類型定義

pub mod config;
pub mod input;
pub mod pricing;
pub mod quantity;
pub mod submission;
pub mod units;
pub mod volume;

// Re-export 主要類型
pub use config::{EstimatorConfig, UnitPolicy};
pub use input::{format_plain, format_quantity, parse_quantity, round_half_up, snap_to_step};
pub use pricing::{LocationOverrides, PriceBreakdown, PriceRequestPayload, ProductRef};
pub use quantity::{
    ContractDuration, LinkedField, LinkedQuantity, MgqAdvisory, MgqState, TransportState,
};
pub use submission::{QuoteSubmission, SubmissionResponse};
pub use units::{Dimension, LengthUnit, ThicknessDimension, ThicknessUnit};
pub use volume::{OrderStatus, VolumeResult};

/// 估算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("不支援的單位: {0}")]
    UnsupportedUnit(String),

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("聯絡資料錯誤: {0}")]
    InvalidContact(String),

    #[error("未選擇產品")]
    MissingProduct,

    #[error("數值溢出: {0}")]
    Overflow(String),

    #[error("定價請求已取消")]
    Cancelled,

    #[error("定價服務錯誤: {0}")]
    Pricing(String),

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
