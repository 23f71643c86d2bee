use thiserror::Error;

/// Either the sources could not be read and deserialized, or the values were read but
/// violate a threshold constraint.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration from the TOML source or ALU_ environment: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),
}
