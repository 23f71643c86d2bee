use crate::error::AnalyticsError;
use crate::report::{AnalyticsResult, Annotated, Spread};
use chrono::{DateTime, Utc};
use configuration::AnalyticsSettings;
use core_types::{CurveState, MarketSnapshot, PricePoint};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// A stateless calculator deriving market indicators from a snapshot.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl AnalyticsEngine {
    /// Creates a new engine after checking the parameters are usable.
    pub fn new(settings: AnalyticsSettings) -> Result<Self, AnalyticsError> {
        settings
            .validate()
            .map_err(|e| AnalyticsError::InvalidParameters(e.to_string()))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Computes every indicator the snapshot has enough data for.
    ///
    /// The percentile ranks the quote on the configured reference basis; if that quote is
    /// absent the percentile is absent too, the other basis is not used instead.
    pub fn summarize(&self, snapshot: &MarketSnapshot) -> AnalyticsResult {
        let mut result = AnalyticsResult::unavailable(self.settings.reference_basis);

        let cleaned = clean_history(snapshot.history_points());
        result.warnings.extend(cleaned.warnings);
        let series = cleaned.value;
        let prices: Vec<Decimal> = series.iter().map(|(_, p)| *p).collect();
        result.history_points_used = prices.len();

        result.reference_price = snapshot.quote(self.settings.reference_basis);
        result.percentile = percentile(result.reference_price, &prices);

        result.spread = spread(snapshot.lme_cash, snapshot.lme_3m);
        result.curve_state = curve_classification(
            result.spread.map(|s| s.absolute),
            self.settings.curve_epsilon,
        );

        let window = self.settings.volatility_window;
        result.volatility = log_return_std(&prices, window);
        if result.volatility.is_none() && snapshot.history.is_some() {
            result.warnings.push(format!(
                "volatility needs {} valid history points, {} available",
                window.saturating_add(1),
                prices.len()
            ));
        }
        result.annualized_volatility = result
            .volatility
            .map(|v| v * f64::from(self.settings.annualization_periods).sqrt());

        tracing::debug!(
            percentile = ?result.percentile,
            spread = ?result.spread,
            curve = %result.curve_state,
            volatility = ?result.volatility,
            points = result.history_points_used,
            "analytics computed"
        );

        result
    }
}

/// Share of `history` at or below `value`, scaled to 0-100.
///
/// The comparison is inclusive: ties with `value` count as "at or below".
/// Returns `None` when `value` is absent or `history` is empty.
pub fn percentile(value: Option<Decimal>, history: &[Decimal]) -> Option<Decimal> {
    let value = value?;
    if history.is_empty() {
        return None;
    }
    let at_or_below = history.iter().filter(|p| **p <= value).count();
    Some(Decimal::from(at_or_below) * Decimal::ONE_HUNDRED / Decimal::from(history.len()))
}

/// `three_month - cash`, absolute and relative to cash.
///
/// Returns `None` when either quote is absent or cash is zero.
pub fn spread(cash: Option<Decimal>, three_month: Option<Decimal>) -> Option<Spread> {
    let (cash, three_month) = (cash?, three_month?);
    if cash.is_zero() {
        return None;
    }
    let absolute = three_month.checked_sub(cash)?;
    let relative = absolute.checked_div(cash)?;
    Some(Spread { absolute, relative })
}

/// Classifies the curve from the absolute spread.
///
/// `|spread| <= epsilon` is flat; `epsilon` has no built-in value.
pub fn curve_classification(spread: Option<Decimal>, epsilon: Decimal) -> CurveState {
    match spread {
        None => CurveState::Unknown,
        Some(s) if s > epsilon => CurveState::Contango,
        Some(s) if s < -epsilon => CurveState::Backwardation,
        Some(_) => CurveState::Flat,
    }
}

/// Volatility of the trailing `window` log returns of `history`.
///
/// The history is sorted by timestamp first; entries without a positive price are dropped,
/// and for a repeated timestamp only the first occurrence is kept. `None` when fewer than
/// `window + 1` points remain or `window < 2`.
pub fn volatility(history: &[PricePoint], window: usize) -> Annotated<Option<f64>> {
    let cleaned = clean_history(history);
    let prices: Vec<Decimal> = cleaned.value.iter().map(|(_, p)| *p).collect();
    Annotated {
        value: log_return_std(&prices, window),
        warnings: cleaned.warnings,
    }
}

/// Sorts the history ascending by timestamp and discards unusable entries.
///
/// Non-numeric and non-positive prices are dropped before duplicates are resolved, so a
/// duplicate timestamp keeps its first *numeric* occurrence in input order.
pub fn clean_history(history: &[PricePoint]) -> Annotated<Vec<(DateTime<Utc>, Decimal)>> {
    let mut warnings = Vec::new();

    let mut series: Vec<(DateTime<Utc>, Decimal)> = Vec::with_capacity(history.len());
    let mut non_numeric = 0usize;
    let mut non_positive = 0usize;
    for point in history {
        match point.price {
            None => non_numeric += 1,
            Some(p) if p <= Decimal::ZERO => non_positive += 1,
            Some(p) => series.push((point.timestamp, p)),
        }
    }
    if non_numeric > 0 {
        warnings.push(format!("discarded {non_numeric} history point(s) without a numeric price"));
    }
    if non_positive > 0 {
        warnings.push(format!("discarded {non_positive} history point(s) with a non-positive price"));
    }

    // Stable sort: equal timestamps stay in input order, so dedup keeps the first one.
    series.sort_by_key(|(ts, _)| *ts);
    let before = series.len();
    let mut duplicates: Vec<DateTime<Utc>> = Vec::new();
    series.dedup_by(|later, earlier| {
        let same = later.0 == earlier.0;
        if same && duplicates.last() != Some(&later.0) {
            duplicates.push(later.0);
        }
        same
    });
    if !duplicates.is_empty() {
        let dropped = before - series.len();
        let stamps: Vec<String> = duplicates.iter().map(|ts| ts.to_rfc3339()).collect();
        warnings.push(format!(
            "discarded {dropped} duplicate history point(s), kept the first occurrence for: {}",
            stamps.join(", ")
        ));
    }

    for warning in &warnings {
        tracing::warn!(%warning, "history cleaned");
    }

    Annotated {
        value: series,
        warnings,
    }
}

/// Sample standard deviation of the last `window` log returns of an ordered price series.
fn log_return_std(prices: &[Decimal], window: usize) -> Option<f64> {
    if window < 2 || prices.len() <= window {
        return None;
    }
    let tail = &prices[prices.len() - window - 1..];

    // The ratio is taken in decimal so a flat series yields exactly 1 and a zero return.
    let returns = tail
        .windows(2)
        .map(|w| w[1].checked_div(w[0]).and_then(|r| r.to_f64()).map(f64::ln))
        .collect::<Option<Vec<f64>>>()?;

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
