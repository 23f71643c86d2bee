//! # Purchase-timing insights
//!
//! Turns the cost and analytics results into a short, ordered list of decision-support
//! insights. Nothing here predicts prices: every message describes where current data sits
//! relative to configured thresholds.
//!
//! ## Architectural Principles
//!
//! - **Independent rules:** each rule implements the `Rule` trait, looks at exactly one axis
//!   (price percentile, stock level, curve shape, volatility) and returns at most one insight.
//!   Rules share no state, so they can be tested one by one.
//! - **Fixed order, never empty:** `InsightEngine` runs the rules in a fixed order. If none of
//!   them fires, it emits a single neutral fallback insight naming the missing metrics.
//! - **Never fails:** a missing metric silences its rule; it is not an error.
//! - **Presentation-free:** an `Insight` carries a template key plus pre-formatted values;
//!   `messages::render` turns it into text for a given `Locale`.

pub mod engine;
pub mod error;
pub mod insight;
pub mod messages;
pub mod rules;

pub use engine::{InsightEngine, generate_insights};
pub use error::InsightError;
pub use insight::{Insight, Message, MessageKey, MessageParam, RuleId};
pub use messages::{Locale, render};

use analytics::AnalyticsResult;
use configuration::RuleParams;
use core_types::{MarketSnapshot, MetricId};
use cost_model::CostResult;

/// Everything a rule may look at. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub snapshot: &'a MarketSnapshot,
    /// `None` when the cost computation failed upstream.
    pub cost: Option<&'a CostResult>,
    pub analytics: &'a AnalyticsResult,
    pub params: &'a RuleParams,
}

/// The core trait all purchase-timing rules implement.
///
/// The `Send + Sync` bounds allow an `InsightEngine` to be shared between threads.
pub trait Rule: Send + Sync {
    fn id(&self) -> RuleId;

    /// The metric this rule needs, if it is absent from the context.
    fn missing_metric(&self, ctx: &RuleContext<'_>) -> Option<MetricId>;

    /// * `Some(Insight)` - the rule's condition is met.
    /// * `None` - the condition is not met, or the required metric is absent.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight>;
}
