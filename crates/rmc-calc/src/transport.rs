//! 運輸選配數量自動帶入

use rmc_core::{round_half_up, EstimatorConfig, TransportState};
use rust_decimal::Decimal;

/// 一個運輸單位涵蓋 `coverage` m³ 的每月保證量
pub fn transport_quantity(snapped_mgq: Option<Decimal>, coverage: Decimal) -> Option<Decimal> {
    let mgq = snapped_mgq.filter(|v| *v > Decimal::ZERO)?;
    mgq.checked_div(coverage).filter(|qty| *qty > Decimal::ZERO)
}

/// 運輸數量自動帶入
pub struct TransportAutoFill;

impl TransportAutoFill {
    /// 依 MGQ 更新運輸數量
    ///
    /// 使用者手動修改過的數量只在 `force` 時覆寫。
    pub fn apply(
        state: &mut TransportState,
        snapped_mgq: Option<Decimal>,
        force: bool,
        config: &EstimatorConfig,
    ) {
        if !state.enabled {
            if force {
                state.quantity = None;
                state.user_edited = false;
            }
            return;
        }

        match transport_quantity(snapped_mgq, config.transport_coverage_m3) {
            None => {
                if !state.user_edited || force {
                    state.quantity = None;
                }
            }
            Some(_) if state.user_edited && !force => {}
            Some(qty) => {
                state.quantity = Some(round_half_up(qty, config.quantity_decimals));
            }
        }
    }

    /// 勾選/取消運輸服務
    ///
    /// 勾選時自動帶入，無建議值時預設 1；取消時清空數量與手動標記。
    pub fn toggle(
        state: &mut TransportState,
        enabled: bool,
        snapped_mgq: Option<Decimal>,
        config: &EstimatorConfig,
    ) {
        state.enabled = enabled;

        if enabled {
            Self::apply(state, snapped_mgq, false, config);
            if state.quantity.is_none() {
                state.quantity = Some(Decimal::ONE);
            }
        } else {
            state.quantity = None;
            state.user_edited = false;
        }
    }

    /// 使用者手動輸入運輸數量
    pub fn record_edit(state: &mut TransportState, raw: &str) {
        state.quantity = rmc_core::parse_quantity(raw);
        state.user_edited = true;
    }
}
