//! # RMC Calculation Engine
//!
//! 體積、MGQ 與定價估算引擎

pub mod calculator;
pub mod estimator;
pub mod linked;
pub mod mgq;
pub mod pricing;
pub mod transport;
pub mod units;
pub mod volume;

// Re-export 主要類型
pub use calculator::QuoteCalculator;
pub use estimator::{reduce, EstimatorContext, EstimatorEvent, FieldObserver, FormState, NoopObserver};
pub use linked::{linked_value, LinkedQuantitySynchronizer, LinkedWrite};
pub use mgq::{compute_suggested_mgq, MgqSuggestionEngine, SuggestionOutcome};
pub use pricing::{currency_symbol, format_amount, PriceRequestBuilder, PriceSummary};
pub use transport::{transport_quantity, TransportAutoFill};
pub use units::UnitConverter;
pub use volume::{VolumeCalculator, VolumeRequest};

/// 估算結果
#[derive(Debug, Clone)]
pub struct EstimateReport {
    /// 體積與車次
    pub volume: rmc_core::VolumeResult,

    /// 定價請求（未選擇產品或無體積時為空）
    pub price_request: Option<rmc_core::PriceRequestPayload>,

    /// 警告信息
    pub warnings: Vec<EstimatorWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl EstimateReport {
    pub fn new(volume: rmc_core::VolumeResult) -> Self {
        Self {
            volume,
            price_request: None,
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: EstimatorWarning) {
        self.warnings.push(warning);
    }

    /// 是否有指定等級的警告
    pub fn has_warnings_at(&self, severity: WarningSeverity) -> bool {
        self.warnings.iter().any(|w| w.severity == severity)
    }
}

/// 估算警告
#[derive(Debug, Clone)]
pub struct EstimatorWarning {
    pub component: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl EstimatorWarning {
    pub fn new(component: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            component,
            message,
            severity,
        }
    }

    pub fn info(component: String, message: String) -> Self {
        Self::new(component, message, WarningSeverity::Info)
    }

    pub fn warning(component: String, message: String) -> Self {
        Self::new(component, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
