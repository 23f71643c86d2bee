use crate::error::ConfigError;
use core_types::{Currency, InsightCategory, PriceBasis};
use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub cost: CostSettings,
    pub analytics: AnalyticsSettings,
    pub insights: RuleParams,
}

impl Config {
    /// Validates every section. Called by the loaders before the config is handed out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cost.validate()?;
        self.analytics.validate()?;
        self.insights.validate()?;
        Ok(())
    }
}

/// A named additive cost, in USD per tonne.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostLineSetting {
    pub label: String,
    pub amount_usd: Decimal,
}

/// The buyer's contractual cost inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct CostSettings {
    /// Price the cost on LME 3-month instead of LME cash.
    pub use_3m: bool,
    /// Currency the all-in figure should be reported in. `None` keeps USD.
    #[serde(default)]
    pub target_currency: Option<Currency>,
    /// Regional / product premiums (e.g. Rotterdam duty-paid, extrusion billet premium).
    #[serde(default)]
    pub premiums: Vec<CostLineSetting>,
    #[serde(default)]
    pub freights: Vec<CostLineSetting>,
    pub local_costs: Decimal,
}

impl CostSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for line in self.premiums.iter().chain(self.freights.iter()) {
            if line.label.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "every premium and freight line needs a non-empty label".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters of the statistical indicators.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Half-width of the band, in USD/t, inside which the curve counts as flat.
    pub curve_epsilon: Decimal,
    /// Number of trailing log returns used for volatility.
    pub volatility_window: usize,
    /// Periods per year used to annualize volatility (252 for daily closes).
    pub annualization_periods: u32,
    /// Quote compared against the history for the percentile rank.
    pub reference_basis: PriceBasis,
}

impl AnalyticsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve_epsilon.is_sign_negative() && !self.curve_epsilon.is_zero() {
            return Err(ConfigError::ValidationError(
                "analytics.curve_epsilon must be zero or positive".to_string(),
            ));
        }
        // The sample standard deviation needs at least two returns.
        if self.volatility_window < 2 {
            return Err(ConfigError::ValidationError(
                "analytics.volatility_window must be at least 2".to_string(),
            ));
        }
        if self.annualization_periods == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.annualization_periods must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Category assigned to each curve shape by the curve rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurveMapping {
    pub contango: InsightCategory,
    pub backwardation: InsightCategory,
    /// `None` means a flat curve produces no insight.
    #[serde(default)]
    pub flat: Option<InsightCategory>,
}

/// Thresholds of the purchase-timing rules.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleParams {
    /// Percentile (0-100) at or below which the price counts as historically low.
    pub percentile_low: Decimal,
    /// Percentile (0-100) at or above which the price counts as historically high.
    pub percentile_high: Decimal,
    /// LME stock in tonnes above which supply is considered comfortable.
    pub stock_high_threshold: Decimal,
    /// LME stock in tonnes below which availability is considered tight.
    #[serde(default)]
    pub stock_low_threshold: Option<Decimal>,
    /// Per-period volatility of log returns above which the market counts as unsettled.
    pub volatility_high_threshold: f64,
    pub curve: CurveMapping,
}

impl RuleParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hundred = Decimal::ONE_HUNDRED;
        for (name, value) in [
            ("percentile_low", self.percentile_low),
            ("percentile_high", self.percentile_high),
        ] {
            if value < Decimal::ZERO || value > hundred {
                return Err(ConfigError::ValidationError(format!(
                    "insights.{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if self.percentile_low >= self.percentile_high {
            return Err(ConfigError::ValidationError(
                "insights.percentile_low must be below insights.percentile_high".to_string(),
            ));
        }
        if let Some(low) = self.stock_low_threshold {
            if low >= self.stock_high_threshold {
                return Err(ConfigError::ValidationError(
                    "insights.stock_low_threshold must be below insights.stock_high_threshold"
                        .to_string(),
                ));
            }
        }
        if !self.volatility_high_threshold.is_finite() || self.volatility_high_threshold < 0.0 {
            return Err(ConfigError::ValidationError(
                "insights.volatility_high_threshold must be a finite, non-negative number"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
