//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Parcelscan - extract delivery records from a mail export.
#[derive(Debug, Parser)]
#[command(name = "parcelscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (message IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a mail export and extract delivery records
    Run(RunArgs),

    /// Show stored delivery records
    History(HistoryArgs),

    /// Show aggregate delivery statistics
    Stats(StatsArgs),

    /// Delete stored records
    Clear(ClearArgs),

    /// Delete records older than a cutoff
    Cleanup(CleanupArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Path to a JSON mail export (array of raw messages)
    pub input: String,

    /// Owner identity to tag records with
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Maximum messages to scan, overriding the configured limit
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Extraction service API key, overriding the configured key
    #[arg(long, env = "PARCELSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Only show records for this owner
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Maximum number of records to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Only count records for this owner
    #[arg(short, long)]
    pub owner: Option<String>,
}

/// Arguments for the clear command.
#[derive(Debug, Parser)]
pub struct ClearArgs {
    /// Delete every record
    #[arg(long, conflicts_with = "owner")]
    pub all: bool,

    /// Delete only this owner's records
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the cleanup command.
#[derive(Debug, Parser)]
pub struct CleanupArgs {
    /// Delete records inserted more than this many days ago
    #[arg(short, long, default_value = "90")]
    pub days: u32,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
