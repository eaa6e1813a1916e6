//! chief-index - replay governance events
//!
//! Reads a JSON-lines file of governance events, applies them in order to an
//! in-memory entity store with ledger reads answered by a JSON fixture, and
//! prints the resulting aggregate and processing statistics as JSON.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use chief_indexer::{
    aggregate, FixtureLedger, GovernanceIndexer, IndexerStats, RecordingTracker, TrackingRequest,
};
use chief_storage::{InMemoryEntityStore, StoredEntity};
use chief_types::{GovernanceEvent, GovernanceInfo, Wad};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::AppConfig;

/// Chief indexer CLI
#[derive(Parser)]
#[command(name = "chief-index")]
#[command(about = "Replay governance events into the chief entity model", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CHIEF_CONFIG")]
    config: Option<String>,

    /// JSON-lines events file
    #[arg(short, long, env = "CHIEF_EVENTS")]
    events: Option<String>,

    /// Ledger fixture file
    #[arg(short, long, env = "CHIEF_LEDGER")]
    ledger: Option<String>,

    /// Include every stored entity in the report
    #[arg(long)]
    dump: bool,

    /// Log level
    #[arg(long, env = "CHIEF_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "CHIEF_LOG_JSON")]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    governance: GovernanceInfo,
    stats: IndexerStats,
    voter_locked_total: Wad,
    tracked: Vec<TrackingRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<Vec<StoredEntity>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    // Override with CLI args
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;
    config.replay.dump |= cli.dump;
    if let Some(events) = cli.events {
        config.replay.events = Some(events.into());
    }
    if let Some(ledger) = cli.ledger {
        config.replay.ledger = Some(ledger.into());
    }

    // Logs go to stderr; stdout carries the report
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());
    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let Some(events_path) = config.replay.events.clone() else {
        bail!("no events file given (use --events or CHIEF_REPLAY__EVENTS)");
    };
    let events = read_events(&events_path)?;
    let ledger = match &config.replay.ledger {
        Some(path) => read_ledger(path)?,
        None => {
            warn!("no ledger fixture given, every ledger read will revert");
            FixtureLedger::default()
        }
    };

    let store = Arc::new(InMemoryEntityStore::new());
    let tracker = Arc::new(RecordingTracker::new());
    let mut indexer = GovernanceIndexer::new(
        config.indexer.clone(),
        store.clone(),
        Arc::new(ledger),
        tracker.clone(),
    );

    info!(events = events.len(), path = %events_path.display(), "replaying events");
    indexer
        .process_all(&events)
        .context("applying governance events")?;

    let governance = indexer.governance_info()?;
    let voter_locked_total = aggregate::voter_locked_total(store.as_ref())?;
    if voter_locked_total != governance.locked {
        warn!(
            aggregate = %governance.locked,
            voters = %voter_locked_total,
            "aggregate locked amount disagrees with voter records"
        );
    }

    let stats = indexer.stats().clone();
    info!(
        applied = stats.applied,
        skipped = stats.skipped,
        replayed = stats.replayed,
        "replay finished"
    );

    let report = Report {
        governance,
        stats,
        voter_locked_total,
        tracked: tracker.requests(),
        entities: if config.replay.dump {
            Some(store.dump()?)
        } else {
            None
        },
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_events(path: &Path) -> anyhow::Result<Vec<GovernanceEvent>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut events = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event: GovernanceEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("{}:{}: invalid event", path.display(), number + 1))?;
        events.push(event);
    }
    Ok(events)
}

fn read_ledger(path: &Path) -> anyhow::Result<FixtureLedger> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{}: invalid ledger fixture", path.display()))
}
