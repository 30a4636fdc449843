//! SplitLedger CLI
//!
//! Nets expense and settlement files into a debt ledger, and replays
//! built-in trip scenarios.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_service::ServiceConfig;

mod compute;
mod controller;
mod scenario;

use compute::{compute_file, ComputeOptions};
use controller::ScenarioController;
use scenario::Scenario;

/// SplitLedger CLI
#[derive(Parser, Debug)]
#[command(name = "splitledger")]
#[command(about = "Net group expenses and settlements into who-owes-whom")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the ledger for a JSON array of expense and settlement events
    Compute {
        /// Path to the events file
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Print the full report instead of just the edges
        #[arg(long)]
        report: bool,
    },

    /// Replay a trip scenario and check its expected ledger
    Scenario {
        /// Built-in scenario name
        name: Option<String>,

        /// Load the scenario from a JSON file instead
        #[arg(long, conflicts_with = "name")]
        file: Option<PathBuf>,

        /// List built-in scenarios
        #[arg(long)]
        list: bool,
    },
}

fn init_tracing(config: &ServiceConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
    );

    // Logs go to stderr so stdout stays parseable JSON.
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ServiceConfig::from_env();
    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    match args.command {
        Command::Compute {
            input,
            pretty,
            report,
        } => {
            let output = compute_file(&config.netting, &input, ComputeOptions { pretty, report })?;
            println!("{}", output);
            Ok(())
        }
        Command::Scenario { name, file, list } => {
            if list {
                for name in Scenario::BUILT_IN {
                    let scenario = Scenario::load(name)?;
                    println!("{:<22} {}", scenario.name, scenario.description);
                }
                return Ok(());
            }

            let scenario = match (name, file) {
                (_, Some(path)) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("parsing scenario {}", path.display()))?
                }
                (Some(name), None) => Scenario::load(&name)?,
                (None, None) => anyhow::bail!("give a scenario name, --file or --list"),
            };

            let outcome = ScenarioController::new(config)
                .run_scenario(&scenario)
                .await?;

            info!(
                scenario = %scenario.name,
                steps = outcome.steps_run,
                assertions = outcome.assertions_passed,
                "Scenario passed"
            );
            println!("{}", serde_json::to_string_pretty(&outcome.final_ledger)?);
            Ok(())
        }
    }
}
