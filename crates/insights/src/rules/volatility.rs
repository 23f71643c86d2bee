use crate::insight::{Insight, Message, MessageKey, RuleId};
use crate::rules::fmt_ratio;
use crate::{Rule, RuleContext};
use core_types::{InsightCategory, MetricId};

#[derive(Debug, Default, Clone, Copy)]
pub struct VolatilityRule;

impl Rule for VolatilityRule {
    fn id(&self) -> RuleId {
        RuleId::Volatility
    }

    fn missing_metric(&self, ctx: &RuleContext<'_>) -> Option<MetricId> {
        ctx.analytics.volatility.is_none().then_some(MetricId::Volatility)
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let volatility = ctx.analytics.volatility?;
        let threshold = ctx.params.volatility_high_threshold;
        if volatility <= threshold {
            return None;
        }

        let mut message = Message::new(MessageKey::VolatilityHigh)
            .with("volatility", fmt_ratio(volatility))
            .with("threshold", fmt_ratio(threshold));
        if let Some(annualized) = ctx.analytics.annualized_volatility {
            message = message.with("annualized", fmt_ratio(annualized));
        }

        Some(Insight {
            rule: self.id(),
            category: InsightCategory::Caution,
            message,
            metrics: vec![MetricId::Volatility],
        })
    }
}
