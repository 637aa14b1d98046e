//! 定價請求防抖排程
//!
//! 輸入變更後等待防抖時間再發出請求；新請求發出時取消上一個，
//! 只有最新且未取消的請求回應會被採用。

use std::time::{Duration, Instant};

use rmc_core::{EstimatorConfig, PriceBreakdown, PriceRequestPayload};
use uuid::Uuid;

use crate::cancellation::CancellationToken;
use crate::dirty_tracking::{DirtyTracker, PricingInput};

/// 已發出的定價請求
#[derive(Debug, Clone)]
pub struct PricingTicket {
    pub id: Uuid,
    pub token: CancellationToken,
    pub payload: PriceRequestPayload,
    pub issued_at: Instant,
}

#[derive(Debug)]
struct PendingRequest {
    payload: PriceRequestPayload,
    due_at: Instant,
}

#[derive(Debug)]
struct InFlight {
    id: Uuid,
    token: CancellationToken,
}

/// 定價排程器
#[derive(Debug)]
pub struct PricingScheduler {
    debounce: Duration,
    pending: Option<PendingRequest>,
    in_flight: Option<InFlight>,
    last_issued: Option<PriceRequestPayload>,
    dirty: DirtyTracker<PricingInput>,
}

impl PricingScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            in_flight: None,
            last_issued: None,
            dirty: DirtyTracker::new(),
        }
    }

    /// 以配置的防抖時間建立
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.pricing_debounce())
    }

    /// 排入請求（防抖計時自 `now` 重新開始）
    ///
    /// 與上一次發出的請求相同時不排程，回傳 `false`。
    pub fn schedule(&mut self, payload: PriceRequestPayload, now: Instant) -> bool {
        self.dirty.clear();
        for input in PricingInput::changed_between(self.last_issued.as_ref(), &payload) {
            self.dirty.mark_dirty(input);
        }

        if !self.dirty.any_dirty() {
            tracing::debug!("定價輸入未變更，略過請求");
            self.pending = None;
            return false;
        }

        tracing::debug!("排入定價請求，變更輸入: {:?}", self.dirty.dirty_keys());
        self.pending = Some(PendingRequest {
            payload,
            due_at: now + self.debounce,
        });
        true
    }

    /// 下次應發出請求的時間
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 防抖時間已到則發出請求，並取消上一個進行中的請求
    pub fn poll(&mut self, now: Instant) -> Option<PricingTicket> {
        if self.pending.as_ref().map_or(true, |p| now < p.due_at) {
            return None;
        }
        let pending = self.pending.take()?;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("取消進行中的定價請求 {}", previous.id);
            previous.token.cancel();
        }

        let ticket = PricingTicket {
            id: Uuid::new_v4(),
            token: CancellationToken::new(),
            payload: pending.payload,
            issued_at: now,
        };
        tracing::info!("發出定價請求 {}：數量 {}", ticket.id, ticket.payload.qty);

        self.in_flight = Some(InFlight {
            id: ticket.id,
            token: ticket.token.clone(),
        });
        self.last_issued = Some(ticket.payload.clone());
        self.dirty.clear();

        Some(ticket)
    }

    /// 回報請求結果
    ///
    /// 只採用最新且未取消的請求；失敗回應會讓相同輸入可以重新請求。
    pub fn complete(&mut self, id: Uuid, breakdown: PriceBreakdown) -> Option<PriceBreakdown> {
        let current = match &self.in_flight {
            Some(in_flight) => in_flight.id == id && !in_flight.token.is_cancelled(),
            None => false,
        };
        if !current {
            tracing::warn!("捨棄過期的定價回應 {}", id);
            return None;
        }

        self.in_flight = None;
        if !breakdown.success {
            tracing::warn!("定價失敗: {:?}", breakdown.error);
            self.last_issued = None;
        }
        Some(breakdown)
    }

    /// 取消排程與進行中的請求（例如產品被清空）
    pub fn cancel_all(&mut self) {
        self.pending = None;
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
        self.last_issued = None;
        self.dirty.clear();
    }
}
