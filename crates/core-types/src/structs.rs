use crate::enums::PriceBasis;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An ISO-4217 style currency code, always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self, CoreError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidInput(
                "currency".to_string(),
                format!("'{code}' is not a three-letter currency code"),
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The currency every LME quote and cost line is expressed in.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn is_usd(&self) -> bool {
        self.0 == "USD"
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Currency {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A spot exchange rate: `rate` units of `currency` buy one US dollar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxQuote {
    pub currency: Currency,
    pub rate: Decimal,
}

/// A single observation of the historical price series.
///
/// `price` is `None` when the feed delivered a non-numeric value for that timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Option<Decimal>,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            timestamp,
            price: Some(price),
        }
    }
}

/// The reconciled market state handed over by the ingestion layer for one run.
///
/// Quotes are in USD per tonne, stock in tonnes. A field is `None` when its source failed;
/// such an absence must be explained by at least one entry in `warnings`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// When the ingestor assembled the snapshot. Informational only.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lme_cash: Option<Decimal>,
    #[serde(default)]
    pub lme_3m: Option<Decimal>,
    #[serde(default)]
    pub lme_stock: Option<Decimal>,
    #[serde(default)]
    pub fx_spot: Option<FxQuote>,
    /// Not necessarily sorted.
    #[serde(default)]
    pub history: Option<Vec<PricePoint>>,
    #[serde(default)]
    pub sources_used: BTreeMap<String, bool>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl MarketSnapshot {
    /// The LME quote for the given settlement basis, if the source delivered one.
    pub fn quote(&self, basis: PriceBasis) -> Option<Decimal> {
        match basis {
            PriceBasis::Cash => self.lme_cash,
            PriceBasis::ThreeMonth => self.lme_3m,
        }
    }

    /// The history series, or an empty slice when it is absent.
    pub fn history_points(&self) -> &[PricePoint] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Names of the fields (and failed sources) that carry no value.
    pub fn absent_fields(&self) -> Vec<String> {
        let mut absent = Vec::new();
        if self.lme_cash.is_none() {
            absent.push("lme_cash".to_string());
        }
        if self.lme_3m.is_none() {
            absent.push("lme_3m".to_string());
        }
        if self.lme_stock.is_none() {
            absent.push("lme_stock".to_string());
        }
        if self.fx_spot.is_none() {
            absent.push("fx_spot".to_string());
        }
        if self.history.is_none() {
            absent.push("history".to_string());
        }
        absent.extend(
            self.sources_used
                .iter()
                .filter(|(_, ok)| !**ok)
                .map(|(source, _)| format!("source:{source}")),
        );
        absent
    }

    /// Checks the ingestion contract: quotes are positive, and every absence is reported.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [("lme_cash", self.lme_cash), ("lme_3m", self.lme_3m)] {
            if let Some(v) = value {
                if v <= Decimal::ZERO {
                    return Err(CoreError::InvalidInput(
                        name.to_string(),
                        format!("quote must be positive, got {v}"),
                    ));
                }
            }
        }
        if let Some(stock) = self.lme_stock {
            if stock.is_sign_negative() && !stock.is_zero() {
                return Err(CoreError::InvalidInput(
                    "lme_stock".to_string(),
                    format!("stock cannot be negative, got {stock}"),
                ));
            }
        }
        if let Some(fx) = &self.fx_spot {
            if fx.rate <= Decimal::ZERO {
                return Err(CoreError::InvalidInput(
                    "fx_spot".to_string(),
                    format!("exchange rate must be positive, got {}", fx.rate),
                ));
            }
        }

        let absent = self.absent_fields();
        if !absent.is_empty() && self.warnings.is_empty() {
            return Err(CoreError::UnreportedAbsence(absent));
        }
        Ok(())
    }
}
