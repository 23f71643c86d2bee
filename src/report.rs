//! Human-readable and JSON rendering of a pipeline [`Report`].

use crate::pipeline::Report;
use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use insights::Locale;
use insights::messages::category_label;
use rust_decimal::Decimal;
use serde::Serialize;

/// Placeholder shown for a value that could not be obtained or computed.
const NOT_AVAILABLE: &str = "n/a";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn show_decimal(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(2).normalize().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn show_ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Renders the report as a set of tables: market data, all-in cost, indicators,
/// insights and warnings.
pub fn render_tables(report: &Report, locale: Locale) -> String {
    let snapshot = &report.snapshot;
    let mut sections = Vec::new();

    let mut market = new_table(vec!["Market data", "Value"]);
    market.add_row(vec!["LME Cash (USD/t)".to_string(), show_decimal(snapshot.lme_cash)]);
    market.add_row(vec!["LME 3M (USD/t)".to_string(), show_decimal(snapshot.lme_3m)]);
    market.add_row(vec!["LME stock (t)".to_string(), show_decimal(snapshot.lme_stock)]);
    market.add_row(vec![
        "FX spot".to_string(),
        snapshot
            .fx_spot
            .as_ref()
            .map(|fx| format!("{} {}", fx.rate.normalize(), fx.currency))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ]);
    for (source, ok) in report.sources() {
        market.add_row(vec![
            format!("source {source}"),
            if *ok { "ok" } else { "failed" }.to_string(),
        ]);
    }
    sections.push(format!("{market}"));

    match &report.cost {
        Some(cost) => {
            let mut table = new_table(vec!["Cost line", "Component", "USD/t", cost.unit]);
            for line in &cost.lines {
                table.add_row(vec![
                    line.label.clone(),
                    line.component.to_string(),
                    show_decimal(Some(line.amount_usd)),
                    show_decimal(Some(line.amount)),
                ]);
            }
            table.add_row(vec![
                format!("All-in ({} basis)", cost.basis),
                String::new(),
                show_decimal(Some(cost.subtotal_usd)),
                format!("{} {}", show_decimal(Some(cost.total)), cost.currency),
            ]);
            if let Some(rate) = cost.fx_rate {
                table.add_row(vec![
                    "FX rate applied".to_string(),
                    String::new(),
                    String::new(),
                    rate.normalize().to_string(),
                ]);
            }
            sections.push(format!("{table}"));
        }
        None => sections.push(format!(
            "All-in cost: {}",
            report.cost_error.as_deref().unwrap_or(NOT_AVAILABLE)
        )),
    }

    let analytics = &report.analytics;
    let mut indicators = new_table(vec!["Indicator", "Value"]);
    indicators.add_row(vec![
        format!("Reference price ({})", analytics.reference_basis),
        show_decimal(analytics.reference_price),
    ]);
    indicators.add_row(vec!["Historical percentile".to_string(), show_decimal(analytics.percentile)]);
    indicators.add_row(vec![
        "Spread 3M - Cash (USD/t)".to_string(),
        show_decimal(analytics.spread.map(|s| s.absolute)),
    ]);
    indicators.add_row(vec![
        "Spread relative".to_string(),
        analytics
            .spread
            .map(|s| format!("{:.4}", s.relative))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ]);
    indicators.add_row(vec!["Curve".to_string(), analytics.curve_state.to_string()]);
    indicators.add_row(vec!["Volatility".to_string(), show_ratio(analytics.volatility)]);
    indicators.add_row(vec![
        "Volatility (annualized)".to_string(),
        show_ratio(analytics.annualized_volatility),
    ]);
    indicators.add_row(vec![
        "History points used".to_string(),
        analytics.history_points_used.to_string(),
    ]);
    sections.push(format!("{indicators}"));

    let mut statements = new_table(vec!["Category", "Insight"]);
    for insight in &report.insights {
        statements.add_row(vec![
            category_label(insight.category, locale).to_string(),
            insights::render(&insight.message, locale),
        ]);
    }
    sections.push(format!("{statements}"));

    let warnings = report.warnings();
    if !warnings.is_empty() {
        let mut table = new_table(vec!["Stage", "Warning"]);
        for (stage, warning) in warnings {
            table.add_row(vec![stage, warning]);
        }
        sections.push(format!("{table}"));
    }

    sections.join("\n")
}

#[derive(Serialize)]
struct RenderedInsight<'a> {
    #[serde(flatten)]
    insight: &'a insights::Insight,
    text: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    locale: Locale,
    #[serde(flatten)]
    report: &'a Report,
    rendered: Vec<RenderedInsight<'a>>,
}

/// Renders the full report as pretty JSON, with each insight's message also rendered in
/// `locale`.
pub fn render_json(report: &Report, locale: Locale) -> Result<String> {
    let rendered = report
        .insights
        .iter()
        .map(|insight| RenderedInsight {
            insight,
            text: insights::render(&insight.message, locale),
        })
        .collect();
    let out = JsonReport {
        locale,
        report,
        rendered,
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_pipeline;
    use configuration::load_config_from_str;
    use core_types::MarketSnapshot;
    use rust_decimal_macros::dec;

    const CONFIG: &str = r#"
[cost]
use_3m = true
local_costs = 0
premiums = [{ label = "Rotterdam duty-paid", amount_usd = 250 }]

[analytics]
curve_epsilon = 1
volatility_window = 3
annualization_periods = 252
reference_basis = "three_month"

[insights]
percentile_low = 30
percentile_high = 70
stock_high_threshold = 500000
volatility_high_threshold = 0.02

[insights.curve]
contango = "neutral"
backwardation = "caution"
"#;

    fn report() -> Report {
        let config = load_config_from_str(CONFIG).unwrap();
        let snapshot = MarketSnapshot {
            lme_cash: Some(dec!(2480)),
            lme_3m: Some(dec!(2500)),
            lme_stock: None,
            warnings: vec!["stock source timed out".to_string()],
            ..Default::default()
        };
        run_pipeline(snapshot, &config).unwrap()
    }

    #[test]
    fn tables_show_missing_values_as_not_available() {
        let text = render_tables(&report(), Locale::En);
        assert!(text.contains("LME stock (t)"));
        assert!(text.contains(NOT_AVAILABLE));
        assert!(text.contains("stock source timed out"));
        assert!(text.contains("2750"));
        assert!(text.contains("contango"));
        assert!(text.contains("premium"));
        assert!(!text.contains("Contango"));
    }

    #[test]
    fn json_carries_rendered_text_per_insight() {
        let report = report();
        let json = render_json(&report, Locale::PtBr).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["locale"], "pt-br");
        assert_eq!(value["locale"].as_str().unwrap().parse::<Locale>().unwrap(), Locale::PtBr);
        let rendered = value["rendered"].as_array().unwrap();
        assert_eq!(rendered.len(), report.insights.len());
        assert!(rendered.iter().all(|r| r["text"].is_string()));
    }
}
