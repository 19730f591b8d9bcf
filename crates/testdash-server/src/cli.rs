//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use testdash_core::{CaseId, ExecutionId, SuiteId};

/// Testdash cache administration
///
/// Inspects and invalidates the shared dashboard cache.
#[derive(Parser, Debug, Clone)]
#[command(name = "testdash-cache")]
#[command(version)]
#[command(about = "Inspect and invalidate the Testdash cache", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding default.toml and per-environment overrides
    #[arg(short = 'c', long, global = true, env = "TESTDASH_CONFIG_DIR")]
    pub config_dir: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "human")]
    pub output: OutputFormat,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Human,
    /// One JSON document per command
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that the cache store answers
    Ping,

    /// Print the cached value stored under a key
    Get {
        /// Full cache key, e.g. `suite:42`
        key: String,
    },

    /// Run an invalidation recipe
    #[command(subcommand)]
    Invalidate(InvalidateTarget),

    /// Delete every key matching a glob pattern
    #[command(name = "delete-pattern")]
    DeletePattern {
        /// Glob pattern, e.g. `suites:list:*`
        pattern: String,
    },
}

/// What to invalidate.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum InvalidateTarget {
    /// A suite, its lists and the dashboard
    Suite {
        id: SuiteId,
    },
    /// A case, the lists it appears in and the dashboard
    Case {
        id: CaseId,
        /// Suite the case belongs to
        #[arg(long)]
        suite_id: SuiteId,
    },
    /// An execution, execution lists and the dashboard
    Execution {
        id: ExecutionId,
    },
    /// Every dashboard aggregate
    Dashboard,
    /// Every Testdash namespace
    All,
}
