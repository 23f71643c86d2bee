use crate::insight::{Insight, Message, MessageKey, RuleId};
use crate::rules::fmt_decimal;
use crate::{Rule, RuleContext};
use core_types::{InsightCategory, MetricId};

/// Low percentile → favorable window; high percentile → caution.
#[derive(Debug, Default, Clone, Copy)]
pub struct PercentileRule;

impl Rule for PercentileRule {
    fn id(&self) -> RuleId {
        RuleId::PricePercentile
    }

    fn missing_metric(&self, ctx: &RuleContext<'_>) -> Option<MetricId> {
        ctx.analytics.percentile.is_none().then_some(MetricId::Percentile)
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let percentile = ctx.analytics.percentile?;
        let params = ctx.params;

        let (category, key, key_with_cost) = if percentile <= params.percentile_low {
            (
                InsightCategory::Favorable,
                MessageKey::PriceLowPercentile,
                MessageKey::PriceLowPercentileWithCost,
            )
        } else if percentile >= params.percentile_high {
            (
                InsightCategory::Caution,
                MessageKey::PriceHighPercentile,
                MessageKey::PriceHighPercentileWithCost,
            )
        } else {
            tracing::debug!(%percentile, "percentile inside the neutral band");
            return None;
        };

        let mut metrics = vec![MetricId::Percentile];
        let basis = ctx.analytics.reference_basis.to_string();
        let price = ctx
            .analytics
            .reference_price
            .map(fmt_decimal)
            .unwrap_or_default();

        let message = match ctx.cost {
            Some(cost) => {
                metrics.push(MetricId::AllInCost);
                Message::new(key_with_cost)
                    .with("basis", basis)
                    .with("price", price)
                    .with("percentile", fmt_decimal(percentile))
                    .with("all_in_cost", fmt_decimal(cost.total))
                    .with("currency", cost.currency.code())
            }
            None => Message::new(key)
                .with("basis", basis)
                .with("price", price)
                .with("percentile", fmt_decimal(percentile)),
        };

        Some(Insight {
            rule: self.id(),
            category,
            message,
            metrics,
        })
    }
}
