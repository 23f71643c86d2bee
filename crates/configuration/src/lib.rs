use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AnalyticsSettings, Config, CostLineSetting, CostSettings, CurveMapping, RuleParams,
};

/// Prefix of the environment variables that override file values,
/// e.g. `ALU_INSIGHTS__PERCENTILE_LOW=25`.
pub const ENV_PREFIX: &str = "ALU";

/// Loads the application configuration from a TOML file, overlaid by `ALU_` environment
/// variables, and validates it.
///
/// There are no built-in fallbacks: every threshold and cost line must come from the file
/// or the environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml))
        .add_source(env_source())
        .build()?;

    finish(builder)
}

/// Reads and validates a TOML document held in memory.
///
/// Unlike [`load_config`], no `ALU_` environment overrides are applied, so the result
/// depends on `toml` alone.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    const MINIMAL: &str = r#"
        [cost]
        use_3m = false
        local_costs = 0

        [analytics]
        curve_epsilon = 1
        volatility_window = 20
        annualization_periods = 252
        reference_basis = "cash"

        [insights]
        percentile_low = 30
        percentile_high = 70
        stock_high_threshold = 500000
        volatility_high_threshold = 0.02

        [insights.curve]
        contango = "neutral"
        backwardation = "caution"
    "#;

    #[test]
    fn environment_overrides_file_values() {
        let dir = std::env::temp_dir().join(format!("alu-config-env-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, MINIMAL).unwrap();

        // SAFETY: no other test in this crate reads the process environment.
        unsafe {
            std::env::set_var("ALU_INSIGHTS__PERCENTILE_LOW", "25");
            std::env::set_var("ALU_ANALYTICS__CURVE_EPSILON", "0.5");
        }
        let loaded = load_config(&path);
        unsafe {
            std::env::remove_var("ALU_INSIGHTS__PERCENTILE_LOW");
            std::env::remove_var("ALU_ANALYTICS__CURVE_EPSILON");
        }
        fs::remove_dir_all(&dir).ok();

        let config = loaded.unwrap();
        assert_eq!(config.insights.percentile_low, dec!(25));
        assert_eq!(config.analytics.curve_epsilon, dec!(0.5));
        assert_eq!(config.insights.percentile_high, dec!(70));

        let from_memory = load_config_from_str(MINIMAL).unwrap();
        assert_eq!(from_memory.insights.percentile_low, dec!(30));
    }
}
