//! Configuration management

mod resolve;

pub use resolve::resolve_path;

use crate::hash::HashAlgorithm;
use crate::logging::LogSettings;
use crate::types::SyncError;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command line arguments
///
/// Positionals follow the classic `source replica interval count log_file`
/// order. Any of them may instead come from `--config`; command line values
/// win.
#[derive(Debug, Default, Parser)]
#[command(name = "replika", version, about = "Keep a replica directory in one-way sync with a source")]
pub struct Cli {
    /// Directory to mirror from (never modified)
    pub source: Option<PathBuf>,

    /// Directory to mirror into (created if missing, fully managed)
    pub replica: Option<PathBuf>,

    /// Seconds to wait between passes
    pub interval: Option<u64>,

    /// Number of passes to run
    pub count: Option<u64>,

    /// File every log line is appended to
    pub log_file: Option<PathBuf>,

    /// TOML file supplying any of the settings above
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Content digest used to compare files
    #[arg(long, value_enum)]
    pub hash: Option<HashAlgorithm>,

    /// Log to the file only, not the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Settings read from a `--config` file
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub interval: Option<u64>,
    pub count: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub hash: Option<HashAlgorithm>,
    pub quiet: Option<bool>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Cannot read config file {:?}: {}", path, e))
        })?;
        Self::parse(&text)
            .map_err(|e| SyncError::Config(format!("Invalid config file {:?}: {}", path, e)))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Validated settings for a replika run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Replica directory
    pub replica: PathBuf,

    /// Pause between consecutive passes
    pub interval: Duration,

    /// Number of passes
    pub count: u64,

    /// Log file
    pub log_file: PathBuf,

    /// Digest used by the comparator
    pub hash: HashAlgorithm,

    /// Mirror log lines to stdout
    pub console: bool,

    /// Log filter directive
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            replica: PathBuf::new(),
            interval: Duration::from_secs(60),
            count: 1,
            log_file: PathBuf::from("replika.log"),
            hash: HashAlgorithm::default(),
            console: true,
            log_level: "info".to_string(),
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    /// Merge the config file (if any) under the command line, then validate.
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let config = Config {
            source: required(cli.source.or(file.source), "source")?,
            replica: required(cli.replica.or(file.replica), "replica")?,
            interval: Duration::from_secs(required(cli.interval.or(file.interval), "interval")?),
            count: required(cli.count.or(file.count), "count")?,
            log_file: required(cli.log_file.or(file.log_file), "log_file")?,
            hash: cli.hash.or(file.hash).unwrap_or_default(),
            console: !(cli.quiet || file.quiet.unwrap_or(false)),
            log_level: cli
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, SyncError> {
    value.ok_or_else(|| {
        SyncError::Config(format!(
            "Missing {name}: pass it on the command line or set it in --config"
        ))
    })
}

impl Config {
    /// Validate configuration
    ///
    /// Runs before any pass. The sync core trusts these checks and never
    /// repeats them.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.interval.is_zero() || self.count == 0 {
            return Err(SyncError::Validation(
                "Interval and count must be positive integers".to_string(),
            ));
        }

        let source = resolve_path(&self.source)?;
        let replica = resolve_path(&self.replica)?;

        if source.parent().is_none() || replica.parent().is_none() {
            return Err(SyncError::Validation(
                "Source and replica must not be the root directory".to_string(),
            ));
        }

        if source == replica {
            return Err(SyncError::Validation(
                "Source and replica must not be the same path".to_string(),
            ));
        }

        if replica.starts_with(&source) {
            return Err(SyncError::Validation(
                "Replica cannot be a subdirectory of the source".to_string(),
            ));
        }

        if source.starts_with(&replica) {
            return Err(SyncError::Validation(
                "Source cannot be a subdirectory of the replica".to_string(),
            ));
        }

        // Prune would delete it mid-run.
        if resolve_path(&self.log_file)?.starts_with(&replica) {
            return Err(SyncError::Validation(
                "Log file cannot be inside the replica".to_string(),
            ));
        }

        if !self.source.is_dir() {
            return Err(SyncError::Validation(format!(
                "Source path {:?} does not exist or is not a directory",
                self.source
            )));
        }

        if self.replica.exists() && !self.replica.is_dir() {
            return Err(SyncError::Validation(format!(
                "Replica path {:?} exists but is not a directory",
                self.replica
            )));
        }

        Ok(())
    }

    /// Create the replica directory if it does not exist yet
    pub fn prepare(&self) -> Result<(), SyncError> {
        fs::create_dir_all(&self.replica)?;
        Ok(())
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            log_file: self.log_file.clone(),
            console: self.console,
            level: self.log_level.clone(),
        }
    }
}
