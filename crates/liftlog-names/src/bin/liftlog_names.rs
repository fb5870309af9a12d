//! liftlog-names - command-line front end for exercise name matching
//!
//! Records are read from a JSON array of `{"id", "name", "payload"}` objects.
//! Results are printed as JSON on stdout; logs go to stderr (`RUST_LOG`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use liftlog_names::{
    edit_distance, normalize, similarity, ConfigError, DedupConfig, NameEngine, NameError,
    NameRecord,
};

/// Exercise name normalization, duplicate clustering, and merge planning.
#[derive(Parser, Debug)]
#[command(name = "liftlog-names")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file (thresholds, extra autocorrect entries)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical comparison key of a name
    Normalize { name: String },

    /// Apply the autocorrect dictionary to a name
    Autocorrect { name: String },

    /// Score two names (normalized first)
    Similarity { a: String, b: String },

    /// Group likely duplicate names for review
    Clusters {
        /// JSON file with the record snapshot
        records: PathBuf,

        /// Override the configured cluster threshold
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Check a proposed name against existing records
    Validate {
        name: String,

        /// JSON file with existing records
        records: PathBuf,

        /// JSON file with additional external candidates
        #[arg(long)]
        external: Option<PathBuf>,
    },

    /// Plan renaming the selected records to a target name
    Merge {
        /// JSON file with the record snapshot
        records: PathBuf,

        /// Record ids to rename (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,

        /// New name for every selected record
        #[arg(long)]
        target: String,
    },

    /// Plan merges that need no confirmation
    AutoMerge {
        /// JSON file with the record snapshot
        records: PathBuf,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid records in {path}: {source}")]
    Records {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Score {
    a: String,
    b: String,
    distance: usize,
    similarity: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let engine = NameEngine::new(config)?;
    let compact = cli.compact;

    match cli.command {
        Command::Normalize { name } => print(&normalize(&name), compact),
        Command::Autocorrect { name } => print(&engine.autocorrect(&name), compact),
        Command::Similarity { a, b } => {
            let (key_a, key_b) = (normalize(&a), normalize(&b));
            let score = Score {
                distance: edit_distance(&key_a, &key_b),
                similarity: similarity(&key_a, &key_b),
                a: key_a,
                b: key_b,
            };
            print(&score, compact)
        }
        Command::Clusters { records, threshold } => {
            let records = read_records(&records)?;
            let clusters = match threshold {
                Some(t) => liftlog_names::build_clusters(&records, t),
                None => engine.clusters(&records),
            };
            print(&clusters, compact)
        }
        Command::Validate {
            name,
            records,
            external,
        } => {
            let existing = read_records(&records)?;
            let external = match external {
                Some(path) => read_records(&path)?,
                None => vec![],
            };
            print(&engine.validate(&name, &existing, &external), compact)
        }
        Command::Merge {
            records,
            ids,
            target,
        } => {
            let records = read_records(&records)?;
            let selected: Vec<NameRecord> = records
                .into_iter()
                .filter(|r| ids.contains(&r.id))
                .collect();
            if selected.len() < ids.len() {
                tracing::warn!(
                    requested = ids.len(),
                    found = selected.len(),
                    "some record ids were not found"
                );
            }
            let plan = engine.plan_merge(&selected, &target)?;
            print(&plan, compact)
        }
        Command::AutoMerge { records } => {
            let records = read_records(&records)?;
            let clusters = engine.clusters(&records);
            print(&engine.plan_auto_merge(&clusters), compact)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DedupConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(DedupConfig::from_toml(&text)?)
        }
        None => Ok(DedupConfig::default()),
    }
}

fn read_records(path: &Path) -> Result<Vec<NameRecord>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records: Vec<NameRecord> =
        serde_json::from_str(&text).map_err(|source| CliError::Records {
            path: path.display().to_string(),
            source,
        })?;
    tracing::debug!(count = records.len(), "read records from {:?}", path);
    Ok(records)
}

fn print<T: Serialize>(data: &T, compact: bool) -> Result<(), CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    println!("{}", out);
    Ok(())
}
