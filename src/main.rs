//! CLI entry point.
//!
//! Subcommands:
//! - `reconcile`: feed candidate JSON files (one candidate or an array per
//!   file) into the store under a source tag.
//! - `lifecycle`: reclassify every stored record against today's date.
//! - `list`: print the stored records, optionally filtered by status.
//!
//! The store defaults to the JSON-file backend in the configured data
//! directory; `--db` switches to SQLite.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hackscout::config::Config;
use hackscout::reconcile::run_batch;
use hackscout::store::{JsonStore, RecordStore, SqliteStore};
use hackscout::types::{Candidate, HackathonStatus};

#[derive(Parser)]
#[command(name = "hackscout", about = "Hackathon listing aggregator", version)]
struct Cli {
    /// Path to a config file (default: ~/.hackscout/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record directory for the JSON-file store (overrides config)
    #[arg(long, global = true, env = "HACKSCOUT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Use the SQLite store at this path instead of JSON files
    #[arg(long, global = true, env = "HACKSCOUT_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile candidate files into the record store
    Reconcile {
        /// Source tag recorded on created records (e.g. "devpost")
        #[arg(long)]
        source: String,

        /// Candidate JSON files: a single candidate object or an array
        files: Vec<PathBuf>,

        /// Skip candidates below this confidence (overrides config)
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// Recompute every record's lifecycle status against today
    Lifecycle,

    /// Print stored records
    List {
        /// Only records with this status (e.g. "registration_open")
        #[arg(long)]
        status: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).map_err(|e| anyhow::anyhow!(e))?,
        None => Config::load().map_err(|e| anyhow::anyhow!(e))?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.display().to_string();
    }

    let store: Box<dyn RecordStore> = match &cli.db {
        Some(path) => Box::new(SqliteStore::open_at(path)?),
        None => Box::new(JsonStore::new(&config.data_dir)),
    };

    match cli.command {
        Commands::Reconcile {
            source,
            files,
            min_confidence,
        } => {
            if let Some(gate) = min_confidence {
                config.min_confidence = gate;
            }
            cmd_reconcile(store.as_ref(), &config, &source, &files)
        }
        Commands::Lifecycle => cmd_lifecycle(store.as_ref(), &config),
        Commands::List { status } => cmd_list(store.as_ref(), status.as_deref()),
    }
}

fn cmd_reconcile(
    store: &dyn RecordStore,
    config: &Config,
    source: &str,
    files: &[PathBuf],
) -> Result<()> {
    let mut candidates = Vec::new();
    for path in files {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut batch = parse_candidates(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        candidates.append(&mut batch);
    }

    let report = run_batch(store, &candidates, source, config)?;
    println!(
        "Reconcile complete. {} candidates: {} created, {} merged, {} skipped, {} failed.",
        report.total, report.created, report.merged, report.skipped, report.failed
    );
    Ok(())
}

/// Accept either a single candidate object or an array of candidates.
fn parse_candidates(raw: &str) -> Result<Vec<Candidate>, serde_json::Error> {
    match serde_json::from_str::<Vec<Candidate>>(raw) {
        Ok(batch) => Ok(batch),
        Err(_) => serde_json::from_str::<Candidate>(raw).map(|c| vec![c]),
    }
}

fn cmd_lifecycle(store: &dyn RecordStore, config: &Config) -> Result<()> {
    let summary = hackscout::lifecycle::run_lifecycle_pass(store, config.judging_window_days)?;
    println!(
        "Lifecycle update complete. {}/{} hackathons updated.",
        summary.updated, summary.total
    );
    Ok(())
}

fn cmd_list(store: &dyn RecordStore, status: Option<&str>) -> Result<()> {
    let filter = status
        .map(|s| s.parse::<HackathonStatus>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let records = store.load_all()?;
    let mut shown = 0usize;
    for record in &records {
        if let Some(want) = filter {
            if record.status != want {
                continue;
            }
        }
        println!(
            "{:<40} {:<18} {}",
            truncate(&record.id, 40),
            record.status,
            record.name
        );
        shown += 1;
    }
    println!("{} of {} records.", shown, records.len());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
