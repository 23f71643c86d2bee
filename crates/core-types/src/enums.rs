use serde::{Deserialize, Serialize};
use std::fmt;

/// Which LME settlement price a computation is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    Cash,
    ThreeMonth,
}

impl PriceBasis {
    /// Maps the `use_3m` flag of the cost inputs onto a basis.
    pub fn from_use_3m(use_3m: bool) -> Self {
        if use_3m {
            PriceBasis::ThreeMonth
        } else {
            PriceBasis::Cash
        }
    }

    /// Name of the snapshot field holding the quote for this basis.
    pub fn field_name(&self) -> &'static str {
        match self {
            PriceBasis::Cash => "lme_cash",
            PriceBasis::ThreeMonth => "lme_3m",
        }
    }
}

impl fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBasis::Cash => write!(f, "LME Cash"),
            PriceBasis::ThreeMonth => write!(f, "LME 3M"),
        }
    }
}

/// Shape of the forward curve between cash and 3-month settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveState {
    Contango,
    Backwardation,
    Flat,
    Unknown,
}

impl fmt::Display for CurveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CurveState::Contango => "contango",
            CurveState::Backwardation => "backwardation",
            CurveState::Flat => "flat",
            CurveState::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// How an insight should be read by the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Favorable,
    Caution,
    Neutral,
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InsightCategory::Favorable => "favorable",
            InsightCategory::Caution => "caution",
            InsightCategory::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Identifies a metric an insight was derived from (or is missing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Percentile,
    LmeStock,
    CurveState,
    Volatility,
    AllInCost,
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetricId::Percentile => "percentile",
            MetricId::LmeStock => "lme_stock",
            MetricId::CurveState => "curve_state",
            MetricId::Volatility => "volatility",
            MetricId::AllInCost => "all_in_cost",
        };
        f.write_str(label)
    }
}
