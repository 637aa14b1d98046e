//! 報價估算示例

use std::time::Instant;

use rmc::prelude::*;
use rmc::refresh::ListPriceClient;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== RMC 報價估算示例 ===\n");

    let config = EstimatorConfig::default();
    let calculator = QuoteCalculator::new(config.clone())?;

    // 20 ft × 12 ft 樓板，厚 150 mm，含樓梯
    let request = VolumeRequest::from_form(
        ("20", "ft"),
        ("12", "ft"),
        ("150", "mm"),
        true,
        config.unit_policy,
    )?;
    let report = calculator.estimate(
        &request,
        ProductRef::from_selection("", "12"),
        LocationOverrides::new("Pune", "411001"),
    )?;

    println!("體積: {} m³", report.volume.cubic_meters);
    println!("車次: {}", report.volume.truck_count);
    for warning in &report.warnings {
        println!("  [{:?}] {}: {}", warning.severity, warning.component, warning.message);
    }

    // 合約數量：總量 9000 m³，12 個月
    let mut context = EstimatorContext::new(config.clone());
    context.dispatch(EstimatorEvent::TotalProjectQuantityEdited("9000".to_string()));
    context.dispatch(EstimatorEvent::DurationMonthsEdited("12".to_string()));
    context.dispatch(EstimatorEvent::TransportToggled(true));

    let state = context.state();
    println!("\n{}", state.advisory());
    println!("運輸數量: {:?}", state.transport.quantity);

    let Some(payload) = report.price_request else {
        println!("\n未產生定價請求");
        return Ok(());
    };

    let mut scheduler = PricingScheduler::from_config(&config);
    let now = Instant::now();
    scheduler.schedule(payload, now);

    let client = ListPriceClient::new(Decimal::from(5200), config.clone());
    if let Some(ticket) = scheduler.poll(now + config.pricing_debounce()) {
        let breakdown = execute(&client, &ticket)?;
        let summary = scheduler
            .complete(ticket.id, breakdown)
            .map(|b| PriceSummary::from_breakdown(&b, Some(report.volume.cubic_meters)))
            .unwrap_or_else(PriceSummary::unavailable);

        println!("\n{}", summary.unit_price);
        println!("牌價總額: {}", summary.base_total);
        println!("預估總額: {}", summary.estimated_total);
        println!("折扣: {}", summary.discount);
        println!("車次: {}", summary.truck_count);
    }

    Ok(())
}
