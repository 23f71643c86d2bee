//! # Market analytics
//!
//! Statistical context for a purchase decision: where the current LME price sits in its
//! history, the cash/3-month spread and the curve shape it implies, and the volatility of
//! recent log returns.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no clock, no randomness. The same snapshot and settings always
//!   yield the same `AnalyticsResult`.
//! - **Total functions:** `percentile`, `spread`, `curve_classification` and `volatility`
//!   return `None` (or `CurveState::Unknown`) when the data is insufficient; they never fail.
//!   Deciding what to do about a missing metric is the insight layer's job.
//! - **Explicit diagnostics:** discarded history points are reported as warnings returned
//!   with the value, not logged into shared state.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{
    AnalyticsEngine, clean_history, curve_classification, percentile, spread, volatility,
};
pub use error::AnalyticsError;
pub use report::{AnalyticsResult, Annotated, Spread};
