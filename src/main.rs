use alu_intel::logging::init_logging;
use alu_intel::report::{render_json, render_tables};
use alu_intel::{load_snapshot, run_pipeline};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::load_config;
use insights::Locale;
use std::path::PathBuf;

/// The main entry point for the aluminum procurement intelligence tool.
fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, variables may come from the real environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref());

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::CheckConfig { config } => handle_check_config(config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Decision support for aluminum purchasing: all-in cost, market indicators and insights.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also write logs to a daily rolling file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute cost, analytics and insights for a market snapshot.
    Report(ReportArgs),
    /// Load and validate a configuration file without running anything.
    CheckConfig {
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
}

#[derive(Parser)]
struct ReportArgs {
    /// JSON snapshot produced by the ingestion layer.
    #[arg(long)]
    snapshot: PathBuf,

    /// TOML configuration with cost lines and rule thresholds.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Language of the rendered insights (en, pt-br).
    #[arg(long, default_value = "en")]
    locale: Locale,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let snapshot = load_snapshot(&args.snapshot)?;

    let report = run_pipeline(snapshot, &config)?;
    let output = match args.format {
        OutputFormat::Table => render_tables(&report, args.locale),
        OutputFormat::Json => render_json(&report, args.locale)?,
    };
    println!("{output}");
    Ok(())
}

fn handle_check_config(path: PathBuf) -> anyhow::Result<()> {
    let config = load_config(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        premiums = config.cost.premiums.len(),
        freights = config.cost.freights.len(),
        reference_basis = %config.analytics.reference_basis,
        "configuration is valid"
    );
    println!("{} is valid", path.display());
    println!(
        "  cost: {} basis, {} premium(s), {} freight(s), local costs {} USD/t, reported in {}",
        if config.cost.use_3m { "LME 3M" } else { "LME Cash" },
        config.cost.premiums.len(),
        config.cost.freights.len(),
        config.cost.local_costs,
        config
            .cost
            .target_currency
            .as_ref()
            .map(|c| c.code().to_string())
            .unwrap_or_else(|| "USD".to_string()),
    );
    println!(
        "  analytics: epsilon {} USD/t, volatility window {}, {} periods/year, percentile on {}",
        config.analytics.curve_epsilon,
        config.analytics.volatility_window,
        config.analytics.annualization_periods,
        config.analytics.reference_basis,
    );
    println!(
        "  insights: percentile {}/{}, stock high {} t, volatility high {}",
        config.insights.percentile_low,
        config.insights.percentile_high,
        config.insights.stock_high_threshold,
        config.insights.volatility_high_threshold,
    );
    Ok(())
}
