//! `splitledger compute`: net a JSON array of tagged events.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use splitledger_common::LedgerEvent;
use splitledger_ledger::{LedgerEngine, NettingPolicy};

/// Output options for a compute run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeOptions {
    pub pretty: bool,
    /// Emit the full report instead of the bare edge list.
    pub report: bool,
}

/// Read `input` and render its ledger as JSON.
pub fn compute_file(
    policy: &NettingPolicy,
    input: &Path,
    options: ComputeOptions,
) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    render_ledger(policy, &raw, options)
        .with_context(|| format!("computing ledger from {}", input.display()))
}

/// Net the events in `raw` and render the result as JSON.
pub fn render_ledger(
    policy: &NettingPolicy,
    raw: &str,
    options: ComputeOptions,
) -> anyhow::Result<String> {
    let events: Vec<LedgerEvent> = serde_json::from_str(raw).context("parsing events")?;
    info!(events = events.len(), "Loaded events");

    let ledger = LedgerEngine::with_policy(policy.clone()).compute(&events)?;

    let output = match (options.report, options.pretty) {
        (true, true) => serde_json::to_string_pretty(&ledger)?,
        (true, false) => serde_json::to_string(&ledger)?,
        (false, true) => serde_json::to_string_pretty(&ledger.edges)?,
        (false, false) => serde_json::to_string(&ledger.edges)?,
    };
    Ok(output)
}
