//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "course-sync")]
#[command(about = "Synchronize scraped course schedules into a local database", long_about = None)]
pub(crate) struct Cli {
    /// Database path (overrides config file and $COURSE_SYNC_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where course descriptions come from.
#[derive(Args, Clone, Default)]
pub(crate) struct SourceArgs {
    /// Description URL template with {subject} and {number} placeholders
    #[arg(long)]
    pub description_url: Option<String>,

    /// JSON file of descriptions to use instead of fetching
    #[arg(long, conflicts_with = "description_url")]
    pub descriptions: Option<PathBuf>,

    /// Number of concurrent description fetches
    #[arg(short, long)]
    pub workers: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch descriptions and reconcile a schedule feed into the database
    Sync {
        /// Schedule feed: a JSON file or a directory of JSON files
        feed: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Do not record the run in the sync log
        #[arg(long)]
        no_log: bool,
    },

    /// Compute course blueprints for a schedule feed
    Blueprints {
        /// Schedule feed: a JSON file or a directory of JSON files
        feed: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Write blueprints to this CSV file instead of printing them
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show row counts for the synchronized tables
    Stats,

    /// Show recent sync passes
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: u32,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where they came from
    Show,

    /// Print the config file path
    Path,
}
