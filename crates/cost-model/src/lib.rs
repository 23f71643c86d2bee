//! # All-in cost model
//!
//! Composes the landed cost of one tonne of aluminum from the LME base price and the buyer's
//! explicit premiums, freights and local costs, optionally converted into a target currency.
//!
//! - **Pure:** `calculate_cost` reads its two arguments and nothing else.
//! - **No fallbacks:** a missing base price or exchange rate is an error, never a substitute
//!   value. The other settlement basis is not tried.
//! - **Auditable:** the `CostResult` lists every additive line, and its `total` is by
//!   construction the exact sum of those lines.

pub mod error;
pub mod model;
pub mod result;

pub use error::CostError;
pub use model::{CostInputs, CostLine, calculate_cost};
pub use result::{CostBreakdownLine, CostComponent, CostResult};
