use crate::insight::{Insight, Message, MessageKey, RuleId};
use crate::rules::{CurveRule, PercentileRule, StockRule, VolatilityRule};
use crate::{Rule, RuleContext};
use analytics::AnalyticsResult;
use configuration::RuleParams;
use core_types::{InsightCategory, MarketSnapshot, MetricId};
use cost_model::CostResult;

/// Runs an ordered list of rules and guarantees a non-empty result.
pub struct InsightEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl InsightEngine {
    /// The built-in rule set: percentile, stock level, curve, volatility.
    pub fn standard() -> Self {
        Self::with_rules(vec![
            Box::new(PercentileRule),
            Box::new(StockRule),
            Box::new(CurveRule),
            Box::new(VolatilityRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Evaluates every rule in order.
    ///
    /// When no rule fires, a single neutral insight is appended: "insufficient data" listing
    /// the missing metrics, or "no actionable signal" when every metric was available.
    pub fn generate(&self, ctx: &RuleContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();
        let mut missing = Vec::new();

        for rule in &self.rules {
            if let Some(metric) = rule.missing_metric(ctx) {
                tracing::debug!(rule = ?rule.id(), %metric, "rule skipped, metric absent");
                missing.push(metric);
                continue;
            }
            match rule.evaluate(ctx) {
                Some(insight) => {
                    tracing::debug!(rule = ?rule.id(), category = %insight.category, "rule fired");
                    insights.push(insight);
                }
                None => tracing::debug!(rule = ?rule.id(), "rule silent"),
            }
        }

        if insights.is_empty() {
            insights.push(fallback(missing));
        }
        insights
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs the standard rule set over the pipeline results.
///
/// `cost` is `None` when the cost computation failed; the rules still run.
pub fn generate_insights(
    snapshot: &MarketSnapshot,
    cost: Option<&CostResult>,
    analytics: &AnalyticsResult,
    params: &RuleParams,
) -> Vec<Insight> {
    let ctx = RuleContext {
        snapshot,
        cost,
        analytics,
        params,
    };
    InsightEngine::standard().generate(&ctx)
}

fn fallback(missing: Vec<MetricId>) -> Insight {
    let message = if missing.is_empty() {
        Message::new(MessageKey::NoActionableSignal)
    } else {
        let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
        Message::new(MessageKey::InsufficientData).with("missing", names.join(", "))
    };
    Insight {
        rule: RuleId::Fallback,
        category: InsightCategory::Neutral,
        message,
        metrics: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::Spread;
    use configuration::CurveMapping;
    use core_types::{Currency, CurveState, PriceBasis};
    use cost_model::{CostBreakdownLine, CostComponent};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn params() -> RuleParams {
        RuleParams {
            percentile_low: dec!(30),
            percentile_high: dec!(70),
            stock_high_threshold: dec!(500000),
            stock_low_threshold: Some(dec!(250000)),
            volatility_high_threshold: 0.02,
            curve: CurveMapping {
                contango: InsightCategory::Neutral,
                backwardation: InsightCategory::Caution,
                flat: None,
            },
        }
    }

    fn analytics() -> AnalyticsResult {
        AnalyticsResult {
            reference_basis: PriceBasis::ThreeMonth,
            reference_price: Some(dec!(2400)),
            percentile: Some(dec!(20)),
            spread: Some(Spread {
                absolute: dec!(25),
                relative: dec!(0.01),
            }),
            curve_state: CurveState::Contango,
            volatility: Some(0.031),
            annualized_volatility: Some(0.031 * 252f64.sqrt()),
            history_points_used: 250,
            warnings: vec![],
        }
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            lme_stock: Some(dec!(620000)),
            ..MarketSnapshot::default()
        }
    }

    fn cost() -> CostResult {
        CostResult {
            basis: PriceBasis::ThreeMonth,
            currency: Currency::usd(),
            unit: "t",
            fx_rate: None,
            lines: vec![CostBreakdownLine {
                component: CostComponent::Base,
                label: "LME 3M".to_string(),
                amount_usd: dec!(2400),
                amount: dec!(2400),
            }],
            subtotal_usd: dec!(2400),
            total: dec!(2400),
        }
    }

    #[test]
    fn all_rules_fire_in_fixed_order() {
        let insights = generate_insights(&snapshot(), None, &analytics(), &params());
        let rules: Vec<RuleId> = insights.iter().map(|i| i.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleId::PricePercentile,
                RuleId::StockLevel,
                RuleId::CurveStructure,
                RuleId::Volatility
            ]
        );
        let categories: Vec<InsightCategory> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::Favorable,
                InsightCategory::Favorable,
                InsightCategory::Neutral,
                InsightCategory::Caution
            ]
        );
    }

    #[test]
    fn everything_absent_yields_one_neutral_insight() {
        let analytics = AnalyticsResult::unavailable(PriceBasis::ThreeMonth);
        let insights =
            generate_insights(&MarketSnapshot::default(), None, &analytics, &params());
        assert_eq!(insights.len(), 1);
        let only = &insights[0];
        assert_eq!(only.category, InsightCategory::Neutral);
        assert_eq!(only.rule, RuleId::Fallback);
        assert_eq!(only.message.key, MessageKey::InsufficientData);
        assert_eq!(
            only.metrics,
            vec![
                MetricId::Percentile,
                MetricId::LmeStock,
                MetricId::CurveState,
                MetricId::Volatility
            ]
        );
        assert_eq!(
            only.message.param("missing"),
            Some("percentile, lme_stock, curve_state, volatility")
        );
    }

    #[test]
    fn quiet_market_yields_no_actionable_signal() {
        let analytics = AnalyticsResult {
            percentile: Some(dec!(50)),
            curve_state: CurveState::Flat,
            volatility: Some(0.005),
            ..analytics()
        };
        let snapshot = MarketSnapshot {
            lme_stock: Some(dec!(400000)),
            ..MarketSnapshot::default()
        };
        let insights = generate_insights(&snapshot, None, &analytics, &params());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].message.key, MessageKey::NoActionableSignal);
        assert!(insights[0].metrics.is_empty());
    }

    #[test]
    fn fallback_is_not_added_when_a_rule_fires() {
        let analytics = AnalyticsResult {
            percentile: Some(dec!(85)),
            ..AnalyticsResult::unavailable(PriceBasis::ThreeMonth)
        };
        let insights =
            generate_insights(&MarketSnapshot::default(), None, &analytics, &params());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::Caution);
        assert_eq!(insights[0].rule, RuleId::PricePercentile);
    }

    #[test]
    fn output_is_deterministic() {
        let cost = cost();
        let first = generate_insights(&snapshot(), Some(&cost), &analytics(), &params());
        let second = generate_insights(&snapshot(), Some(&cost), &analytics(), &params());
        assert_eq!(first, second);
    }

    #[test]
    fn percentile_insight_carries_cost_when_available() {
        let cost = cost();
        let insights = generate_insights(&snapshot(), Some(&cost), &analytics(), &params());
        let first = &insights[0];
        assert_eq!(first.message.key, MessageKey::PriceLowPercentileWithCost);
        assert_eq!(first.message.param("all_in_cost"), Some("2400"));
        assert_eq!(first.message.param("currency"), Some("USD"));
        assert_eq!(first.metrics, vec![MetricId::Percentile, MetricId::AllInCost]);
    }

    #[test]
    fn percentile_boundaries_are_inclusive() {
        for (p, expected) in [
            (dec!(30), Some(InsightCategory::Favorable)),
            (dec!(30.01), None),
            (dec!(69.99), None),
            (dec!(70), Some(InsightCategory::Caution)),
        ] {
            let analytics = AnalyticsResult {
                percentile: Some(p),
                ..analytics()
            };
            let ctx = RuleContext {
                snapshot: &snapshot(),
                cost: None,
                analytics: &analytics,
                params: &params(),
            };
            assert_eq!(PercentileRule.evaluate(&ctx).map(|i| i.category), expected, "{p}");
        }
    }

    #[test]
    fn stock_rule_thresholds_are_strict() {
        for (stock, expected) in [
            (dec!(500001), Some(MessageKey::StockHigh)),
            (dec!(500000), None),
            (dec!(250000), None),
            (dec!(249999), Some(MessageKey::StockLow)),
        ] {
            let snapshot = MarketSnapshot {
                lme_stock: Some(stock),
                ..MarketSnapshot::default()
            };
            let ctx = RuleContext {
                snapshot: &snapshot,
                cost: None,
                analytics: &analytics(),
                params: &params(),
            };
            assert_eq!(StockRule.evaluate(&ctx).map(|i| i.message.key), expected, "{stock}");
        }
    }

    #[test]
    fn stock_low_is_optional() {
        let params = RuleParams {
            stock_low_threshold: None,
            ..params()
        };
        let snapshot = MarketSnapshot {
            lme_stock: Some(Decimal::ZERO),
            ..MarketSnapshot::default()
        };
        let ctx = RuleContext {
            snapshot: &snapshot,
            cost: None,
            analytics: &analytics(),
            params: &params,
        };
        assert_eq!(StockRule.evaluate(&ctx), None);
    }

    #[test]
    fn curve_follows_configured_mapping() {
        let backwardation = AnalyticsResult {
            curve_state: CurveState::Backwardation,
            spread: Some(Spread {
                absolute: dec!(-5),
                relative: dec!(-0.002),
            }),
            ..analytics()
        };
        let ctx = RuleContext {
            snapshot: &snapshot(),
            cost: None,
            analytics: &backwardation,
            params: &params(),
        };
        let insight = CurveRule.evaluate(&ctx).unwrap();
        assert_eq!(insight.category, InsightCategory::Caution);
        assert_eq!(insight.message.key, MessageKey::CurveBackwardation);
        assert_eq!(insight.message.param("spread"), Some("-5"));
        assert_eq!(insight.message.param("spread_pct"), Some("-0.2"));
    }

    #[test]
    fn flat_curve_uses_optional_mapping() {
        let flat = AnalyticsResult {
            curve_state: CurveState::Flat,
            ..analytics()
        };
        let snapshot = snapshot();
        let silent = params();
        let ctx = RuleContext {
            snapshot: &snapshot,
            cost: None,
            analytics: &flat,
            params: &silent,
        };
        assert_eq!(CurveRule.evaluate(&ctx), None);
        assert_eq!(CurveRule.missing_metric(&ctx), None);

        let mut mapped = params();
        mapped.curve.flat = Some(InsightCategory::Neutral);
        let ctx = RuleContext {
            params: &mapped,
            ..ctx
        };
        assert_eq!(
            CurveRule.evaluate(&ctx).map(|i| i.message.key),
            Some(MessageKey::CurveFlat)
        );
    }

    #[test]
    fn volatility_rule_is_strictly_above_threshold() {
        for (vol, fires) in [(0.02, false), (0.0201, true), (0.0, false)] {
            let analytics = AnalyticsResult {
                volatility: Some(vol),
                ..analytics()
            };
            let ctx = RuleContext {
                snapshot: &snapshot(),
                cost: None,
                analytics: &analytics,
                params: &params(),
            };
            assert_eq!(VolatilityRule.evaluate(&ctx).is_some(), fires, "{vol}");
        }
    }

    #[test]
    fn custom_rule_sets_keep_their_order() {
        let engine = InsightEngine::with_rules(vec![Box::new(VolatilityRule), Box::new(StockRule)]);
        assert_eq!(engine.rule_ids(), vec![RuleId::Volatility, RuleId::StockLevel]);
        let ctx = RuleContext {
            snapshot: &snapshot(),
            cost: None,
            analytics: &analytics(),
            params: &params(),
        };
        let rules: Vec<RuleId> = engine.generate(&ctx).iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec![RuleId::Volatility, RuleId::StockLevel]);
    }
}
