//! MGQ（每月保證量）建議引擎

use rmc_core::{parse_quantity, snap_to_step, EstimatorConfig, MgqState};
use rust_decimal::Decimal;

/// 依專案總量與合約月數計算建議 MGQ（取整到步長）
///
/// 任一輸入缺值或非正數時不提供建議。
pub fn compute_suggested_mgq(
    total_project_quantity: Option<Decimal>,
    duration_months: Option<Decimal>,
    step: Decimal,
) -> Option<Decimal> {
    let total = total_project_quantity.filter(|v| *v > Decimal::ZERO)?;
    let months = duration_months.filter(|v| *v > Decimal::ZERO)?;

    snap_to_step(total.checked_div(months)?, step)
}

/// 建議結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// 建議值已寫入欄位
    Accepted,
    /// 欄位為手動值，僅更新建議文字
    KeptManual,
    /// 資料不足，無建議
    Insufficient,
}

/// MGQ 建議引擎
pub struct MgqSuggestionEngine;

impl MgqSuggestionEngine {
    /// 重新計算建議值
    ///
    /// 欄位為空或未手動修改時以建議值覆寫並清除手動標記；
    /// 否則保留欄位值，只記錄建議值。
    pub fn refresh(
        state: &mut MgqState,
        total_project_quantity: Option<Decimal>,
        duration_months: Option<Decimal>,
        config: &EstimatorConfig,
    ) -> SuggestionOutcome {
        let suggestion = compute_suggested_mgq(
            total_project_quantity,
            duration_months,
            config.mgq_snap_step,
        );
        state.suggested_quantity = suggestion;

        let Some(suggested) = suggestion else {
            return SuggestionOutcome::Insufficient;
        };

        if state.manually_edited && !state.is_empty() {
            tracing::debug!("MGQ 為手動值 {:?}，建議值 {}", state.monthly_quantity, suggested);
            return SuggestionOutcome::KeptManual;
        }

        state.monthly_quantity = Some(suggested);
        state.manually_edited = false;
        SuggestionOutcome::Accepted
    }

    /// 使用者直接輸入 MGQ
    ///
    /// 非空輸入設置手動標記；清空欄位時重設標記。
    pub fn record_edit(state: &mut MgqState, raw: &str) {
        state.monthly_quantity = parse_quantity(raw);
        state.manually_edited = !raw.trim().is_empty();
    }

    /// 明確套用建議值（重設手動標記後重新計算）
    pub fn apply_suggestion(
        state: &mut MgqState,
        total_project_quantity: Option<Decimal>,
        duration_months: Option<Decimal>,
        config: &EstimatorConfig,
    ) -> Option<Decimal> {
        state.manually_edited = false;
        match Self::refresh(state, total_project_quantity, duration_months, config) {
            SuggestionOutcome::Accepted => state.monthly_quantity,
            _ => None,
        }
    }

    /// 欄位值取整到步長（離開欄位時）
    pub fn normalize(state: &mut MgqState, config: &EstimatorConfig) -> Option<Decimal> {
        state.monthly_quantity = Self::snapped(state, config);
        state.monthly_quantity
    }

    /// 取整後的 MGQ（不修改欄位）
    pub fn snapped(state: &MgqState, config: &EstimatorConfig) -> Option<Decimal> {
        state
            .monthly_quantity
            .and_then(|value| snap_to_step(value, config.mgq_snap_step))
    }
}
