//! 定價服務呼叫

use rmc_core::{EstimatorConfig, EstimatorError, PriceBreakdown, PriceRequestPayload};
use rust_decimal::Decimal;

use crate::cancellation::CancellationToken;
use crate::scheduler::PricingTicket;

/// 定價服務
///
/// 實作端應在長時間操作中檢查 `token`，被取消時可提早結束。
pub trait PricingClient {
    fn price_breakdown(
        &self,
        payload: &PriceRequestPayload,
        token: &CancellationToken,
    ) -> rmc_core::Result<PriceBreakdown>;
}

/// 以牌價在本地估算的定價服務
#[derive(Debug, Clone)]
pub struct ListPriceClient {
    list_price: Decimal,
    config: EstimatorConfig,
}

impl ListPriceClient {
    pub fn new(list_price: Decimal, config: EstimatorConfig) -> Self {
        Self { list_price, config }
    }
}

impl PricingClient for ListPriceClient {
    fn price_breakdown(
        &self,
        payload: &PriceRequestPayload,
        _token: &CancellationToken,
    ) -> rmc_core::Result<PriceBreakdown> {
        if self.list_price <= Decimal::ZERO {
            return Err(EstimatorError::Pricing(format!(
                "產品未設定牌價: {}",
                self.list_price
            )));
        }
        PriceBreakdown::fallback(self.list_price, payload.qty, &self.config)
    }
}

/// 執行請求；請求在呼叫前後被取消時回傳 [`EstimatorError::Cancelled`]
pub fn execute<C: PricingClient + ?Sized>(
    client: &C,
    ticket: &PricingTicket,
) -> rmc_core::Result<PriceBreakdown> {
    if ticket.token.is_cancelled() {
        return Err(EstimatorError::Cancelled);
    }

    let breakdown = client.price_breakdown(&ticket.payload, &ticket.token)?;

    if ticket.token.is_cancelled() {
        tracing::debug!("定價請求 {} 已取消，丟棄回應", ticket.id);
        return Err(EstimatorError::Cancelled);
    }

    Ok(breakdown)
}
