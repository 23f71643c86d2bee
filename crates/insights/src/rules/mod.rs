//! The built-in rules, in the order the engine evaluates them.

pub mod curve;
pub mod percentile;
pub mod stock;
pub mod volatility;

pub use curve::CurveRule;
pub use percentile::PercentileRule;
pub use stock::StockRule;
pub use volatility::VolatilityRule;

use rust_decimal::Decimal;

/// Decimal values in messages are rounded to two places and never use thousands separators,
/// so the text does not depend on the host locale.
pub(crate) fn fmt_decimal(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

pub(crate) fn fmt_ratio(value: f64) -> String {
    format!("{value:.4}")
}
