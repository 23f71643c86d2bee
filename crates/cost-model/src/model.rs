use crate::error::CostError;
use crate::result::{CostBreakdownLine, CostComponent, CostResult};
use configuration::{CostLineSetting, CostSettings};
use core_types::{Currency, MarketSnapshot, PriceBasis};
use rust_decimal::Decimal;

/// A named additive cost, in USD per tonne.
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    pub label: String,
    pub amount_usd: Decimal,
}

impl CostLine {
    pub fn new(label: impl Into<String>, amount_usd: Decimal) -> Self {
        Self {
            label: label.into(),
            amount_usd,
        }
    }
}

impl From<&CostLineSetting> for CostLine {
    fn from(setting: &CostLineSetting) -> Self {
        Self::new(setting.label.clone(), setting.amount_usd)
    }
}

/// Explicit cost inputs supplied by the buyer. Nothing here has a default amount.
#[derive(Debug, Clone, PartialEq)]
pub struct CostInputs {
    pub use_3m: bool,
    pub target_currency: Option<Currency>,
    pub premiums: Vec<CostLine>,
    pub freights: Vec<CostLine>,
    pub local_costs: Decimal,
}

impl From<&CostSettings> for CostInputs {
    fn from(settings: &CostSettings) -> Self {
        Self {
            use_3m: settings.use_3m,
            target_currency: settings.target_currency.clone(),
            premiums: settings.premiums.iter().map(CostLine::from).collect(),
            freights: settings.freights.iter().map(CostLine::from).collect(),
            local_costs: settings.local_costs,
        }
    }
}

/// Computes the all-in cost per tonne.
///
/// `total = base + Σ premiums + Σ freights + local_costs`, in USD, then multiplied by the
/// snapshot's FX rate when a non-USD target currency is requested.
///
/// # Errors
///
/// * `CostError::MissingData` - the quote for the selected basis is absent.
/// * `CostError::Conversion` - a conversion is requested but the snapshot has no rate for
///   the target currency.
pub fn calculate_cost(
    snapshot: &MarketSnapshot,
    inputs: &CostInputs,
) -> Result<CostResult, CostError> {
    let basis = PriceBasis::from_use_3m(inputs.use_3m);
    let base = snapshot.quote(basis).ok_or_else(|| CostError::MissingData {
        field: basis.field_name().to_string(),
    })?;

    let (currency, fx_rate) = resolve_currency(snapshot, inputs.target_currency.as_ref())?;
    let rate = fx_rate.unwrap_or(Decimal::ONE);

    let mut usd_lines = Vec::with_capacity(inputs.premiums.len() + inputs.freights.len() + 2);
    usd_lines.push((CostComponent::Base, basis.to_string(), base));
    usd_lines.extend(
        inputs
            .premiums
            .iter()
            .map(|p| (CostComponent::Premium, p.label.clone(), p.amount_usd)),
    );
    usd_lines.extend(
        inputs
            .freights
            .iter()
            .map(|f| (CostComponent::Freight, f.label.clone(), f.amount_usd)),
    );
    usd_lines.push((
        CostComponent::LocalCosts,
        "local costs".to_string(),
        inputs.local_costs,
    ));

    let mut lines = Vec::with_capacity(usd_lines.len());
    let mut subtotal_usd = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    for (component, label, amount_usd) in usd_lines {
        let amount = amount_usd
            .checked_mul(rate)
            .ok_or_else(|| overflow(&label))?;
        subtotal_usd = subtotal_usd
            .checked_add(amount_usd)
            .ok_or_else(|| overflow(&label))?;
        total = total.checked_add(amount).ok_or_else(|| overflow(&label))?;
        lines.push(CostBreakdownLine {
            component,
            label,
            amount_usd,
            amount,
        });
    }

    tracing::debug!(
        %basis,
        %currency,
        %subtotal_usd,
        %total,
        lines = lines.len(),
        "all-in cost computed"
    );

    Ok(CostResult {
        basis,
        currency,
        unit: "t",
        fx_rate,
        lines,
        subtotal_usd,
        total,
    })
}

/// Decides the result currency and the rate to apply (`None` when staying in USD).
fn resolve_currency(
    snapshot: &MarketSnapshot,
    target: Option<&Currency>,
) -> Result<(Currency, Option<Decimal>), CostError> {
    let target = match target {
        Some(t) if !t.is_usd() => t,
        _ => return Ok((Currency::usd(), None)),
    };

    let quote = snapshot.fx_spot.as_ref().ok_or_else(|| CostError::Conversion {
        target: target.to_string(),
        reason: "the snapshot carries no exchange rate".to_string(),
    })?;
    if &quote.currency != target {
        return Err(CostError::Conversion {
            target: target.to_string(),
            reason: format!("the snapshot rate is quoted in {}", quote.currency),
        });
    }
    if quote.rate <= Decimal::ZERO {
        return Err(CostError::Conversion {
            target: target.to_string(),
            reason: format!("exchange rate {} is not positive", quote.rate),
        });
    }
    Ok((target.clone(), Some(quote.rate)))
}

fn overflow(label: &str) -> CostError {
    CostError::Calculation(format!("decimal overflow while adding '{label}'"))
}
