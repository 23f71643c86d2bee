use core_types::{Currency, PriceBasis};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// The kind of an additive cost line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Base,
    Premium,
    Freight,
    LocalCosts,
}

impl fmt::Display for CostComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CostComponent::Base => "base",
            CostComponent::Premium => "premium",
            CostComponent::Freight => "freight",
            CostComponent::LocalCosts => "local costs",
        };
        f.write_str(label)
    }
}

/// One additive component of the all-in cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdownLine {
    pub component: CostComponent,
    pub label: String,
    /// The amount as supplied, in USD per tonne.
    pub amount_usd: Decimal,
    /// The amount in the result currency (equal to `amount_usd` when no conversion applies).
    pub amount: Decimal,
}

/// The all-in cost of one tonne, with the lines it was composed from.
///
/// `total` always equals the sum of `lines[..].amount`, and `subtotal_usd` the sum of
/// `lines[..].amount_usd`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostResult {
    pub basis: PriceBasis,
    pub currency: Currency,
    pub unit: &'static str,
    /// The rate applied to every line, present only when a conversion took place.
    pub fx_rate: Option<Decimal>,
    pub lines: Vec<CostBreakdownLine>,
    pub subtotal_usd: Decimal,
    pub total: Decimal,
}

impl CostResult {
    /// The LME base price line, in the result currency.
    pub fn base(&self) -> Decimal {
        self.lines
            .iter()
            .find(|l| l.component == CostComponent::Base)
            .map(|l| l.amount)
            .unwrap_or_default()
    }

    /// Sum of all lines of one component, in the result currency.
    pub fn component_total(&self, component: CostComponent) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.component == component)
            .map(|l| l.amount)
            .sum()
    }

    /// Recomputes the total from the breakdown.
    pub fn sum_of_lines(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn is_converted(&self) -> bool {
        self.fx_rate.is_some()
    }
}
