use crate::insight::{Insight, Message, MessageKey, RuleId};
use crate::rules::fmt_decimal;
use crate::{Rule, RuleContext};
use core_types::{CurveState, MetricId};

/// Maps the curve shape to the category configured for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveRule;

impl Rule for CurveRule {
    fn id(&self) -> RuleId {
        RuleId::CurveStructure
    }

    fn missing_metric(&self, ctx: &RuleContext<'_>) -> Option<MetricId> {
        (ctx.analytics.curve_state == CurveState::Unknown).then_some(MetricId::CurveState)
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let mapping = &ctx.params.curve;
        let (category, key) = match ctx.analytics.curve_state {
            CurveState::Contango => (mapping.contango, MessageKey::CurveContango),
            CurveState::Backwardation => (mapping.backwardation, MessageKey::CurveBackwardation),
            CurveState::Flat => (mapping.flat?, MessageKey::CurveFlat),
            CurveState::Unknown => return None,
        };
        // A known curve state implies the spread was computed.
        let spread = ctx.analytics.spread?;

        Some(Insight {
            rule: self.id(),
            category,
            message: Message::new(key)
                .with("spread", fmt_decimal(spread.absolute))
                .with(
                    "spread_pct",
                    fmt_decimal(spread.relative * rust_decimal::Decimal::ONE_HUNDRED),
                ),
            metrics: vec![MetricId::CurveState],
        })
    }
}
