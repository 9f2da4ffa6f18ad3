//! Hull Advisor - hull-cleaning recommendations from voyage telemetry
//!
//! # Usage
//!
//! ```bash
//! # Train on the CSV exports and print the run summary
//! hull-advisor --data-dir ./data train
//!
//! # Cleaning recommendation for one vessel
//! hull-advisor suggest --vessel "Cartola" --today 2025-12-01
//!
//! # Recommendations for every vessel with a known docking date
//! hull-advisor fleet
//!
//! # Keep retraining on an interval until Ctrl+C
//! HULL_RETRAIN_INTERVAL_SECS=600 hull-advisor watch
//! ```
//!
//! # Environment Variables
//!
//! - `HULL_CONFIG`: Path to the TOML config (default: `./hull_config.toml`)
//! - `HULL_RETRAIN_INTERVAL_SECS`: Retrain interval for `watch`
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use hull_advisor::config::{self, HullConfig};
use hull_advisor::ml_engine::RetrainScheduler;
use hull_advisor::pipeline::HullAdvisor;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hull-advisor")]
#[command(about = "Hull Performance Index estimation and cleaning recommendations")]
#[command(version)]
struct CliArgs {
    /// Path to the TOML config file (overrides HULL_CONFIG and ./hull_config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the CSV exports (overrides data.dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Train the model and print the run summary
    Train {
        /// Reference date for the run (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Train, then print the cleaning suggestion for one vessel as JSON
    Suggest {
        /// Vessel name (matched case- and accent-insensitively)
        #[arg(long)]
        vessel: String,
        /// Projection start date (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
    },

    /// Train, then print suggestions for every known vessel as JSON
    Fleet {
        /// Projection start date (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
        /// Only list vessels due for cleaning within this many days
        #[arg(long)]
        due_within: Option<i64>,
    },

    /// Retrain periodically until Ctrl+C
    Watch,

    /// Print the effective configuration as TOML
    Config,
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(args: &CliArgs) -> Result<HullConfig> {
    let mut config = match &args.config {
        Some(path) => HullConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => HullConfig::load(),
    };
    if let Some(dir) = &args.data_dir {
        config.data.dir.clone_from(dir);
    }
    config.validate().context("Invalid hull configuration")?;
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn run_train(advisor: &HullAdvisor, as_of: NaiveDate) -> Result<()> {
    let summary = advisor
        .train_model_as_of(as_of)
        .context("Training run failed")?;
    let snapshot = advisor.snapshot();
    print_json(&serde_json::json!({
        "as_of": as_of,
        "summary": summary,
        "model": snapshot.model,
        "fleet_cfi_average": snapshot.baseline.fleet_average(),
    }))
}

async fn run_watch(advisor: Arc<HullAdvisor>) -> Result<()> {
    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let scheduler = RetrainScheduler::new(advisor);
    let runs = scheduler.run(cancel_token).await;
    info!(runs, "Retrain loop stopped");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let hull_config = load_config(&args)?;
    info!(
        fleet = %hull_config.fleet.name,
        data_dir = %hull_config.data.dir.display(),
        "Hull advisor starting"
    );
    config::init(hull_config.clone());

    let today = Local::now().date_naive();
    let advisor = Arc::new(HullAdvisor::from_config(hull_config));

    match args.command {
        SubCommand::Train { as_of } => run_train(&advisor, as_of.unwrap_or(today)),
        SubCommand::Suggest { vessel, today: on } => {
            let on = on.unwrap_or(today);
            advisor
                .train_model_as_of(on)
                .context("Training run failed")?;
            print_json(&advisor.suggest_cleaning_date_on(&vessel, on))
        }
        SubCommand::Fleet { today: on, due_within } => {
            let on = on.unwrap_or(today);
            advisor
                .train_model_as_of(on)
                .context("Training run failed")?;
            let mut report = advisor.fleet_report(on);
            if let Some(days) = due_within {
                let due: Vec<_> = report.due_within(days).cloned().collect();
                report.suggestions = due;
            }
            print_json(&report)
        }
        SubCommand::Watch => run_watch(advisor).await,
        SubCommand::Config => {
            let toml = config::get().to_toml().context("Failed to render config")?;
            print!("{toml}");
            Ok(())
        }
    }
}
