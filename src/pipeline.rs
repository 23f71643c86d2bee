use analytics::{AnalyticsEngine, AnalyticsResult};
use anyhow::{Context, Result};
use configuration::Config;
use core_types::MarketSnapshot;
use cost_model::{CostInputs, CostResult, calculate_cost};
use insights::{Insight, generate_insights};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything one run produced, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub snapshot: MarketSnapshot,
    pub cost: Option<CostResult>,
    /// Why `cost` is absent, if it is.
    pub cost_error: Option<String>,
    pub analytics: AnalyticsResult,
    pub insights: Vec<Insight>,
}

impl Report {
    /// Ingestion warnings first, then the analytics diagnostics, each tagged with its stage.
    pub fn warnings(&self) -> Vec<(&'static str, &str)> {
        let mut all: Vec<(&'static str, &str)> = self
            .snapshot
            .warnings
            .iter()
            .map(|w| ("data", w.as_str()))
            .collect();
        if let Some(err) = &self.cost_error {
            all.push(("cost", err.as_str()));
        }
        all.extend(self.analytics.warnings.iter().map(|w| ("analytics", w.as_str())));
        all
    }

    pub fn sources(&self) -> &BTreeMap<String, bool> {
        &self.snapshot.sources_used
    }
}

/// Reads a snapshot written by the ingestion layer and checks its contract.
pub fn load_snapshot(path: &Path) -> Result<MarketSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: MarketSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    snapshot
        .validate()
        .with_context(|| format!("snapshot {} violates the ingestion contract", path.display()))?;
    tracing::info!(
        path = %path.display(),
        warnings = snapshot.warnings.len(),
        history = snapshot.history_points().len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Runs cost, analytics and insights once over the snapshot.
///
/// A failed cost computation is recorded in the report and does not stop the run; only
/// unusable analytics parameters are an error.
pub fn run_pipeline(snapshot: MarketSnapshot, config: &Config) -> Result<Report> {
    let inputs = CostInputs::from(&config.cost);
    let (cost, cost_error) = match calculate_cost(&snapshot, &inputs) {
        Ok(cost) => (Some(cost), None),
        Err(e) => {
            tracing::warn!(error = %e, "all-in cost unavailable");
            (None, Some(e.to_string()))
        }
    };

    let engine = AnalyticsEngine::new(config.analytics.clone())
        .context("invalid analytics settings")?;
    let analytics = engine.summarize(&snapshot);

    let insights = generate_insights(&snapshot, cost.as_ref(), &analytics, &config.insights);
    tracing::info!(
        insights = insights.len(),
        cost_available = cost.is_some(),
        "pipeline finished"
    );

    Ok(Report {
        snapshot,
        cost,
        cost_error,
        analytics,
        insights,
    })
}
