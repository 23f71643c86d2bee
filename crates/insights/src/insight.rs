use core_types::{InsightCategory, MetricId};
use serde::Serialize;

/// Identifies the rule that produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    PricePercentile,
    StockLevel,
    CurveStructure,
    Volatility,
    /// The single neutral insight emitted when no rule fired.
    Fallback,
}

/// Template keys of the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    PriceLowPercentile,
    PriceLowPercentileWithCost,
    PriceHighPercentile,
    PriceHighPercentileWithCost,
    StockHigh,
    StockLow,
    CurveContango,
    CurveBackwardation,
    CurveFlat,
    VolatilityHigh,
    InsufficientData,
    NoActionableSignal,
}

/// A named template value, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageParam {
    pub name: &'static str,
    pub value: String,
}

/// A template key and the values to fill it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub key: MessageKey,
    pub params: Vec<MessageParam>,
}

impl Message {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push(MessageParam {
            name,
            value: value.into(),
        });
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// One decision-support statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub rule: RuleId,
    pub category: InsightCategory,
    pub message: Message,
    /// Metrics the insight was derived from (for the fallback: the missing ones).
    pub metrics: Vec<MetricId>,
}
