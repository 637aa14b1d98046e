//! # RMC
//!
//! 預拌混凝土（RMC）體積與報價估算
//!
//! - [`model`]：資料模型、配置與錯誤類型
//! - [`calc`]：體積、MGQ、連動數量與定價摘要
//! - [`refresh`]：定價請求防抖與取消

pub use rmc_calc as calc;
pub use rmc_core as model;
pub use rmc_refresh as refresh;

/// 常用類型
pub mod prelude {
    pub use rust_decimal::Decimal;

    pub use rmc_calc::{
        EstimateReport, EstimatorContext, EstimatorEvent, FormState, PriceRequestBuilder,
        PriceSummary, QuoteCalculator, VolumeCalculator, VolumeRequest,
    };
    pub use rmc_core::{
        Dimension, EstimatorConfig, EstimatorError, LocationOverrides, PriceBreakdown,
        ProductRef, Result, ThicknessDimension, UnitPolicy, VolumeResult,
    };
    pub use rmc_refresh::{execute, CancellationToken, PricingClient, PricingScheduler};
}
