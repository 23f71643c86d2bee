use core_types::{CurveState, PriceBasis};
use rust_decimal::Decimal;
use serde::Serialize;

/// A value together with the warnings produced while computing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotated<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

/// Forward minus spot, in USD/t and as a fraction of spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spread {
    pub absolute: Decimal,
    pub relative: Decimal,
}

/// Every indicator derived from one snapshot. Each metric is independently optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    /// Basis of the quote that was ranked against the history.
    pub reference_basis: PriceBasis,
    pub reference_price: Option<Decimal>,
    /// Share of history points at or below the reference price, 0-100.
    pub percentile: Option<Decimal>,
    pub spread: Option<Spread>,
    pub curve_state: CurveState,
    /// Sample standard deviation of the trailing log returns (per period).
    pub volatility: Option<f64>,
    pub annualized_volatility: Option<f64>,
    /// History points left after discarding non-numeric and duplicate entries.
    pub history_points_used: usize,
    pub warnings: Vec<String>,
}

impl AnalyticsResult {
    /// A result in which nothing could be computed.
    pub fn unavailable(reference_basis: PriceBasis) -> Self {
        Self {
            reference_basis,
            reference_price: None,
            percentile: None,
            spread: None,
            curve_state: CurveState::Unknown,
            volatility: None,
            annualized_volatility: None,
            history_points_used: 0,
            warnings: Vec::new(),
        }
    }
}
