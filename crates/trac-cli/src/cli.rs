//! CLI argument definitions for the migration tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use trac_submit::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(
    name = "trac-migrate",
    version,
    about = "Migrate legacy tracker tickets into stories",
    long_about = "Migrate tickets from a legacy tracker's SQLite database into stories.\n\n\
                  Export writes importable CSV batches of 100 stories each; push submits\n\
                  every story to the tracking service API one at a time."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// TOML file extending the built-in state, type and user mappings.
    #[arg(long = "mapping", value_name = "PATH", global = true)]
    pub mapping: Option<PathBuf>,

    /// Calendar used to render ticket dates.
    #[arg(long = "timezone", value_enum, default_value = "local", global = true)]
    pub timezone: TimeZoneArg,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write all tickets to numbered CSV batch files.
    Export(ExportArgs),

    /// Submit every ticket to the tracking service as a story.
    Push(PushArgs),

    /// Print the active state and type mappings.
    Mappings,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Legacy tracker SQLite database.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output name; batches are written as <OUTPUT without extension>-<n>.csv.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Skip this many tickets, in id order, before exporting.
    #[arg(long = "skip", value_name = "N", default_value_t = 0)]
    pub skip: usize,
}

#[derive(Parser)]
pub struct PushArgs {
    /// Legacy tracker SQLite database.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// API token of the tracking service.
    #[arg(value_name = "API_TOKEN")]
    pub api_token: String,

    /// Target project id.
    #[arg(value_name = "PROJECT_ID")]
    pub project_id: u64,

    /// Build payloads and log them without contacting the service.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Base URL of the service API.
    #[arg(long = "endpoint", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Skip this many tickets, in id order, before submitting.
    #[arg(long = "skip", value_name = "N", default_value_t = 0)]
    pub skip: usize,
}

/// CLI time zone choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TimeZoneArg {
    Local,
    Utc,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
