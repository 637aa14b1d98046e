//! 報價估算主計算器

use rmc_core::{
    EstimatorConfig, EstimatorError, LocationOverrides, OrderStatus, ProductRef, VolumeResult,
};

use crate::pricing::PriceRequestBuilder;
use crate::volume::{VolumeCalculator, VolumeRequest};
use crate::{EstimateReport, EstimatorWarning};

/// 報價估算器
///
/// 體積計算後組裝定價請求，並收集下單相關的提示。
pub struct QuoteCalculator {
    config: EstimatorConfig,
}

impl QuoteCalculator {
    /// 創建新的估算器（配置需通過驗證）
    pub fn new(config: EstimatorConfig) -> rmc_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// 主估算入口
    pub fn estimate(
        &self,
        request: &VolumeRequest,
        product: Option<ProductRef>,
        location: LocationOverrides,
    ) -> rmc_core::Result<EstimateReport> {
        tracing::info!(
            "開始估算：長 {} {}，寬 {} {}，厚 {} {}，樓梯 {}",
            request.length.value,
            request.length.unit.code(),
            request.width.value,
            request.width.unit.code(),
            request.thickness.value,
            request.thickness.unit.code(),
            request.stairs
        );

        let start_time = std::time::Instant::now();

        // Step 1: 體積與車次
        tracing::debug!("Step 1: 體積計算");
        let volume = VolumeCalculator::estimate(request, &self.config)?;

        let mut report = EstimateReport::new(volume);
        self.check_order_status(&mut report);

        // Step 2: 定價請求
        tracing::debug!("Step 2: 組裝定價請求");
        if volume.has_result() {
            let builder = PriceRequestBuilder::new(product).with_location(location);
            match builder.for_volume(&volume) {
                Ok(payload) => report.price_request = Some(payload),
                Err(EstimatorError::MissingProduct) => {
                    report.add_warning(EstimatorWarning::info(
                        "product".to_string(),
                        "未選擇產品，略過定價".to_string(),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "估算完成：{} m³，{} 車次，警告 {} 筆，耗時 {} ms",
            report.volume.cubic_meters,
            report.volume.truck_count,
            report.warnings.len(),
            report.calculation_time_ms.unwrap_or(0)
        );

        Ok(report)
    }

    fn check_order_status(&self, report: &mut EstimateReport) {
        let volume: VolumeResult = report.volume;
        match volume.status {
            OrderStatus::NoOrder => {
                report.add_warning(EstimatorWarning::info(
                    "volume".to_string(),
                    "尺寸未填寫完整，沒有可下單的體積".to_string(),
                ));
            }
            OrderStatus::BelowMinimum => {
                tracing::warn!(
                    "體積 {} m³ 低於最低訂購量 {} m³",
                    volume.cubic_meters,
                    self.config.minimum_order_m3
                );
                report.add_warning(EstimatorWarning::warning(
                    "volume".to_string(),
                    format!(
                        "體積 {} m³ 低於最低訂購量 {} m³",
                        volume.cubic_meters, self.config.minimum_order_m3
                    ),
                ));
            }
            OrderStatus::Orderable => {}
        }
    }
}
