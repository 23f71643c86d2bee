use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("Unknown locale '{0}', expected one of: en, pt-br")]
    UnknownLocale(String),
}
