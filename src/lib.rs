//! # alu-intel
//!
//! Orchestration shell around the procurement-intelligence crates. It owns everything the
//! core deliberately does not: reading configuration and snapshot files, wiring the
//! pipeline together, logging, and rendering a report.

pub mod logging;
pub mod pipeline;
pub mod report;

pub use pipeline::{Report, load_snapshot, run_pipeline};
