use thiserror::Error;

/// Errors raised when the engine is built. Insufficient data is never an error: the
/// metric functions return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Analytics received invalid parameters: {0}")]
    InvalidParameters(String),
}
