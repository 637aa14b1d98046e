//! 數量估算狀態機
//!
//! 每個表單事件 `(state, event) -> new state`，所有原本散落的旗標
//! （MGQ 手動標記、連動同步中、運輸手動標記）都放在 [`FormState`] 上。

use rmc_core::{
    parse_quantity, ContractDuration, EstimatorConfig, LinkedField, LinkedQuantity, MgqAdvisory,
    MgqState, TransportState,
};
use rust_decimal::Decimal;

use crate::linked::{linked_value, LinkedQuantitySynchronizer, LinkedWrite};
use crate::mgq::{MgqSuggestionEngine, SuggestionOutcome};
use crate::transport::TransportAutoFill;

/// 表單事件（文字欄位保留原始字串）
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorEvent {
    TotalProjectQuantityEdited(String),
    ExpectedProductionEdited(String),
    DurationMonthsEdited(String),
    DurationYearsEdited(String),
    MgqEdited(String),
    /// MGQ 欄位失去焦點（取整到百位）
    MgqBlurred,
    /// 點擊「套用建議 MGQ」
    ApplyMgqSuggestion,
    TransportToggled(bool),
    TransportQuantityEdited(String),
}

/// 表單數量狀態
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormState {
    pub duration: ContractDuration,
    pub mgq: MgqState,
    pub linked: LinkedQuantity,
    pub transport: TransportState,
    pub sync: LinkedQuantitySynchronizer,
}

impl FormState {
    /// 有效合約月數
    pub fn duration_months(&self) -> Option<Decimal> {
        self.duration.effective_months()
    }

    /// MGQ 建議文字
    pub fn advisory(&self) -> MgqAdvisory {
        self.mgq.advisory()
    }
}

/// 連動欄位被程式寫入後的宿主回應
///
/// 例如瀏覽器在欄位值改變時觸發的 input 事件；回傳的事件會重新派發，
/// 在同步期間由重入保護略過。
pub trait FieldObserver {
    fn linked_written(&mut self, field: LinkedField, value: Option<Decimal>)
        -> Option<EstimatorEvent>;
}

/// 不回應任何寫入
pub struct NoopObserver;

impl FieldObserver for NoopObserver {
    fn linked_written(&mut self, _: LinkedField, _: Option<Decimal>) -> Option<EstimatorEvent> {
        None
    }
}

/// 純函式版本：由舊狀態與事件產生新狀態
pub fn reduce(config: &EstimatorConfig, state: &FormState, event: EstimatorEvent) -> FormState {
    let mut context = EstimatorContext::with_state(config.clone(), *state);
    context.dispatch(event);
    context.state
}

/// 估算上下文
pub struct EstimatorContext<O: FieldObserver = NoopObserver> {
    config: EstimatorConfig,
    state: FormState,
    observer: O,
}

impl EstimatorContext<NoopObserver> {
    pub fn new(config: EstimatorConfig) -> Self {
        Self::with_state(config, FormState::default())
    }

    pub fn with_state(config: EstimatorConfig, state: FormState) -> Self {
        Self {
            config,
            state,
            observer: NoopObserver,
        }
    }
}

impl<O: FieldObserver> EstimatorContext<O> {
    /// 附帶宿主觀察者
    pub fn with_observer(config: EstimatorConfig, observer: O) -> Self {
        Self {
            config,
            state: FormState::default(),
            observer,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// 處理一個表單事件
    pub fn dispatch(&mut self, event: EstimatorEvent) -> &FormState {
        tracing::debug!("處理事件: {:?}", event);

        match event {
            EstimatorEvent::TotalProjectQuantityEdited(raw) => {
                self.on_linked_edit(LinkedField::TotalProject, &raw)
            }
            EstimatorEvent::ExpectedProductionEdited(raw) => {
                self.on_linked_edit(LinkedField::ExpectedProduction, &raw)
            }
            EstimatorEvent::DurationMonthsEdited(raw) => {
                let months = parse_quantity(&raw);
                self.state.duration.months = months;
                self.state.duration.years = months
                    .filter(|m| *m > Decimal::ZERO)
                    .and_then(|m| m.checked_div(Decimal::from(12)));
                self.on_duration_changed();
            }
            EstimatorEvent::DurationYearsEdited(raw) => {
                let years = parse_quantity(&raw);
                self.state.duration.years = years;
                self.state.duration.months = years.and_then(|y| y.checked_mul(Decimal::from(12)));
                self.on_duration_changed();
            }
            EstimatorEvent::MgqEdited(raw) => {
                MgqSuggestionEngine::record_edit(&mut self.state.mgq, &raw);
                self.sync_linked_from_mgq();
                self.autofill_transport(false);
            }
            EstimatorEvent::MgqBlurred => {
                MgqSuggestionEngine::normalize(&mut self.state.mgq, &self.config);
                self.sync_linked_from_mgq();
                self.autofill_transport(false);
            }
            EstimatorEvent::ApplyMgqSuggestion => {
                let total = self.state.linked.total_project_quantity;
                let months = self.state.duration_months();
                let applied = MgqSuggestionEngine::apply_suggestion(
                    &mut self.state.mgq,
                    total,
                    months,
                    &self.config,
                );
                if applied.is_some() {
                    MgqSuggestionEngine::normalize(&mut self.state.mgq, &self.config);
                    self.sync_linked_from_mgq();
                    self.autofill_transport(true);
                }
            }
            EstimatorEvent::TransportToggled(enabled) => {
                let snapped = MgqSuggestionEngine::snapped(&self.state.mgq, &self.config);
                TransportAutoFill::toggle(&mut self.state.transport, enabled, snapped, &self.config);
            }
            EstimatorEvent::TransportQuantityEdited(raw) => {
                TransportAutoFill::record_edit(&mut self.state.transport, &raw);
            }
        }

        &self.state
    }

    /// 手動輸入專案總量或預計產量
    ///
    /// 輸入欄位為準，另一欄位跟隨；再以新的專案總量重新計算建議 MGQ。
    fn on_linked_edit(&mut self, source: LinkedField, raw: &str) {
        if !self.state.sync.accepts_edit() {
            return;
        }

        let value = parse_quantity(raw);
        self.state.linked.set(source, value);
        self.write_linked(LinkedWrite::Mirror { source, value });
        self.refresh_suggestion();
    }

    /// 合約期間變更：重新建議 MGQ，再由 MGQ 推導連動數量
    fn on_duration_changed(&mut self) {
        self.refresh_suggestion();
        self.sync_linked_from_mgq();
    }

    fn refresh_suggestion(&mut self) {
        let total = self.state.linked.total_project_quantity;
        let months = self.state.duration_months();
        let outcome = MgqSuggestionEngine::refresh(&mut self.state.mgq, total, months, &self.config);
        if outcome == SuggestionOutcome::Accepted {
            self.autofill_transport(true);
        }
    }

    fn sync_linked_from_mgq(&mut self) {
        let snapped = MgqSuggestionEngine::snapped(&self.state.mgq, &self.config);
        let value = linked_value(
            snapped,
            self.state.duration_months(),
            self.config.quantity_decimals,
        );
        self.write_linked(LinkedWrite::Derived(value));
    }

    /// 寫入連動欄位；寫入引發的回彈事件在同步期間被略過
    fn write_linked(&mut self, write: LinkedWrite) {
        if !self.state.sync.begin() {
            return;
        }

        for (field, value) in write.apply(&mut self.state.linked) {
            if let Some(echo) = self.observer.linked_written(field, value) {
                self.dispatch(echo);
            }
        }

        self.state.sync.end();
    }

    fn autofill_transport(&mut self, force: bool) {
        let snapped = MgqSuggestionEngine::snapped(&self.state.mgq, &self.config);
        TransportAutoFill::apply(&mut self.state.transport, snapped, force, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn text(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_total_then_duration_suggests_mgq() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());

        ctx.dispatch(EstimatorEvent::TotalProjectQuantityEdited(text("950")));
        assert_eq!(ctx.state().linked.expected_production_quantity, Some(d("950")));
        assert_eq!(ctx.state().advisory(), MgqAdvisory::InsufficientData);

        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("3")));
        let state = ctx.state();
        assert_eq!(state.mgq.monthly_quantity, Some(d("300")));
        assert_eq!(state.advisory().to_string(), "Suggested MGQ: 300 m³/month");
        // 期間變更後由 MGQ 推導連動數量
        assert_eq!(state.linked.display(LinkedField::TotalProject, 2), "900.00");
        assert_eq!(state.linked.display(LinkedField::ExpectedProduction, 2), "900.00");
    }

    #[test]
    fn test_manual_total_is_authoritative() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("4")));
        ctx.dispatch(EstimatorEvent::TotalProjectQuantityEdited(text("1250")));

        let state = ctx.state();
        assert_eq!(state.linked.total_project_quantity, Some(d("1250")));
        assert_eq!(state.linked.expected_production_quantity, Some(d("1250")));
        // 1250 / 4 = 312.5 → 300
        assert_eq!(state.mgq.monthly_quantity, Some(d("300")));
    }

    #[test]
    fn test_expected_production_mirrors_into_total() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("2")));
        ctx.dispatch(EstimatorEvent::ExpectedProductionEdited(text("800")));

        let state = ctx.state();
        assert_eq!(state.linked.total_project_quantity, Some(d("800")));
        assert_eq!(state.mgq.monthly_quantity, Some(d("400")));
    }

    #[test]
    fn test_manual_mgq_survives_changes() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::TotalProjectQuantityEdited(text("1200")));
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("6")));
        ctx.dispatch(EstimatorEvent::MgqEdited(text("500")));

        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("3")));
        assert_eq!(ctx.state().mgq.monthly_quantity, Some(d("500")));
        assert!(ctx.state().mgq.manually_edited);

        ctx.dispatch(EstimatorEvent::TotalProjectQuantityEdited(text("2400")));
        let state = ctx.state();
        assert_eq!(state.mgq.monthly_quantity, Some(d("500")));
        assert_eq!(state.mgq.suggested_quantity, Some(d("800")));
        assert_eq!(
            state.advisory().to_string(),
            "Updated MGQ applied. Suggested MGQ: 800 m³/month"
        );
    }

    #[test]
    fn test_mgq_drives_linked_quantities() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("4")));
        ctx.dispatch(EstimatorEvent::MgqEdited(text("300")));

        let state = ctx.state();
        assert_eq!(state.linked.display(LinkedField::TotalProject, 2), "1200.00");
        assert_eq!(state.linked.display(LinkedField::ExpectedProduction, 2), "1200.00");

        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("0")));
        assert!(ctx.state().linked.is_empty());
    }

    #[test]
    fn test_years_convert_to_months() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::DurationYearsEdited(text("2")));
        assert_eq!(ctx.state().duration.months, Some(d("24")));

        ctx.dispatch(EstimatorEvent::DurationYearsEdited(text("")));
        assert_eq!(ctx.state().duration.months, None);
        assert_eq!(ctx.state().duration_months(), None);

        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("18")));
        assert_eq!(ctx.state().duration.years, Some(d("1.5")));
    }

    #[test]
    fn test_blur_snaps_and_apply_restores_suggestion() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("3")));
        ctx.dispatch(EstimatorEvent::MgqEdited(text("437")));
        // 輸入中以取整值推導，但欄位保留原值
        assert_eq!(ctx.state().mgq.monthly_quantity, Some(d("437")));
        assert_eq!(ctx.state().linked.total_project_quantity, Some(d("1200")));

        ctx.dispatch(EstimatorEvent::MgqBlurred);
        assert_eq!(ctx.state().mgq.monthly_quantity, Some(d("400")));

        ctx.dispatch(EstimatorEvent::ApplyMgqSuggestion);
        let state = ctx.state();
        assert!(!state.mgq.manually_edited);
        assert_eq!(state.mgq.monthly_quantity, Some(d("400")));
    }

    #[test]
    fn test_transport_follows_mgq() {
        let mut ctx = EstimatorContext::new(EstimatorConfig::default());
        ctx.dispatch(EstimatorEvent::TransportToggled(true));
        assert_eq!(ctx.state().transport.quantity, Some(Decimal::ONE));

        ctx.dispatch(EstimatorEvent::TotalProjectQuantityEdited(text("4500")));
        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("3")));
        // 1500 / 750 = 2
        assert_eq!(ctx.state().transport.quantity, Some(d("2")));

        ctx.dispatch(EstimatorEvent::TransportQuantityEdited(text("5")));
        ctx.dispatch(EstimatorEvent::MgqEdited(text("3000")));
        assert_eq!(ctx.state().transport.quantity, Some(d("5")));

        // 套用建議時強制覆寫：總量已由 3000 × 3 推導為 9000 → MGQ 3000 → 4
        ctx.dispatch(EstimatorEvent::ApplyMgqSuggestion);
        assert_eq!(ctx.state().mgq.monthly_quantity, Some(d("3000")));
        assert_eq!(ctx.state().transport.quantity, Some(d("4")));
    }

    /// 模擬瀏覽器：程式寫入欄位後回彈 input 事件
    struct EchoingHost {
        writes: Vec<(LinkedField, Option<Decimal>)>,
    }

    impl FieldObserver for EchoingHost {
        fn linked_written(
            &mut self,
            field: LinkedField,
            value: Option<Decimal>,
        ) -> Option<EstimatorEvent> {
            self.writes.push((field, value));
            let raw = value.map(|v| v.to_string()).unwrap_or_default();
            Some(match field {
                LinkedField::TotalProject => EstimatorEvent::TotalProjectQuantityEdited(raw),
                LinkedField::ExpectedProduction => EstimatorEvent::ExpectedProductionEdited(raw),
            })
        }
    }

    #[test]
    fn test_echoed_writes_are_suppressed() {
        let host = EchoingHost { writes: Vec::new() };
        let mut ctx = EstimatorContext::with_observer(EstimatorConfig::default(), host);

        ctx.dispatch(EstimatorEvent::DurationMonthsEdited(text("4")));
        ctx.dispatch(EstimatorEvent::MgqEdited(text("300")));

        let state = *ctx.state();
        assert!(!state.sync.is_syncing());
        assert!(state.sync.suppressed() >= 2);
        assert_eq!(state.linked.total_project_quantity, Some(d("1200")));
        assert!(state.mgq.manually_edited);
        assert_eq!(state.mgq.monthly_quantity, Some(d("300")));

        // 每次同步只寫入一次，不會遞迴觸發
        let writes = &ctx.observer().writes;
        assert_eq!(
            writes.last(),
            Some(&(LinkedField::ExpectedProduction, Some(d("1200"))))
        );
    }

    #[test]
    fn test_reduce_is_pure_and_idempotent() {
        let config = EstimatorConfig::default();
        let start = FormState::default();
        let with_total = reduce(
            &config,
            &start,
            EstimatorEvent::TotalProjectQuantityEdited(text("950")),
        );
        let once = reduce(&config, &with_total, EstimatorEvent::DurationMonthsEdited(text("3")));
        let twice = reduce(&config, &once, EstimatorEvent::DurationMonthsEdited(text("3")));

        assert_eq!(start, FormState::default());
        assert_eq!(once.mgq, twice.mgq);
        assert_eq!(once.linked, twice.linked);
    }
}
