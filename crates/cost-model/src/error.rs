use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CostError {
    #[error("Missing data: '{field}' is required to compute the all-in cost")]
    MissingData { field: String },

    #[error("Currency conversion to {target} failed: {reason}")]
    Conversion { target: String, reason: String },

    #[error("Calculation error: {0}")]
    Calculation(String),
}
