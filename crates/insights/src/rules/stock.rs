use crate::insight::{Insight, Message, MessageKey, RuleId};
use crate::rules::fmt_decimal;
use crate::{Rule, RuleContext};
use core_types::{InsightCategory, MetricId};

/// High LME stock → comfortable supply; optionally, low stock → tight availability.
#[derive(Debug, Default, Clone, Copy)]
pub struct StockRule;

impl Rule for StockRule {
    fn id(&self) -> RuleId {
        RuleId::StockLevel
    }

    fn missing_metric(&self, ctx: &RuleContext<'_>) -> Option<MetricId> {
        ctx.snapshot.lme_stock.is_none().then_some(MetricId::LmeStock)
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let stock = ctx.snapshot.lme_stock?;
        let params = ctx.params;

        let (category, key, threshold) = if stock > params.stock_high_threshold {
            (
                InsightCategory::Favorable,
                MessageKey::StockHigh,
                params.stock_high_threshold,
            )
        } else {
            match params.stock_low_threshold {
                Some(low) if stock < low => (InsightCategory::Caution, MessageKey::StockLow, low),
                _ => return None,
            }
        };

        Some(Insight {
            rule: self.id(),
            category,
            message: Message::new(key)
                .with("stock", fmt_decimal(stock))
                .with("threshold", fmt_decimal(threshold)),
            metrics: vec![MetricId::LmeStock],
        })
    }
}
