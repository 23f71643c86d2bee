use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Snapshot fields are absent without any ingestion warning: {}", .0.join(", "))]
    UnreportedAbsence(Vec<String>),
}
