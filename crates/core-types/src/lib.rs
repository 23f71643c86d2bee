//! # Shared domain types
//!
//! Layer 0 of the workspace. Every other crate speaks in terms of the types defined here:
//! the `MarketSnapshot` handed over by the ingestion collaborator, and the small enums that
//! the analytics and insight layers use to label their outputs.
//!
//! Absence is modelled with `Option` on every snapshot field, so a consumer cannot read a
//! quote without deciding what to do when the upstream source failed.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CurveState, InsightCategory, MetricId, PriceBasis};
pub use error::CoreError;
pub use structs::{Currency, FxQuote, MarketSnapshot, PricePoint};
