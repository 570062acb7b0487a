//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::format::Format;

/// systags - Machine tag resolution and persistence.
#[derive(Debug, Parser)]
#[command(name = "systags")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding *.json config fragments
    #[arg(
        long,
        global = true,
        env = "SYSTAGS_CONFIG_DIR",
        default_value = "/etc/systags.d"
    )]
    pub config_dir: PathBuf,

    /// Directory holding the persisted remote and system tiers
    #[arg(
        long,
        global = true,
        env = "SYSTAGS_SYSTEM_DIR",
        default_value = "/var/lib/systags"
    )]
    pub system_dir: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true, env = "SYSTAGS_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or normalize the persisted tier files
    Init(InitArgs),

    /// Print one tier as JSON
    Dump(DumpArgs),

    /// Refresh the remote tier from the cloud provider
    Update(UpdateArgs),

    /// List merged tags, filtered and formatted
    Ls(LsArgs),

    /// Look up a single tag
    Get(GetArgs),

    /// Set a tag in the system tier
    Set(SetArgs),

    /// Remove a tag from the system tier
    Rm(RmArgs),

    /// Print the systags version
    Version,
}

/// One of the three tag tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierKind {
    Config,
    Remote,
    System,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Clear all tiers instead of keeping current content
    #[arg(short, long)]
    pub reset: bool,
}

/// Arguments for the `dump` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DumpArgs {
    /// Which tier to print
    #[arg(short, long, value_enum)]
    pub kind: TierKind,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UpdateArgs {
    /// Per-attempt fetch timeout (e.g. 5s, 500ms)
    #[arg(short, long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Keep retrying empty results for this long
    #[arg(short, long, default_value = "0s", value_parser = parse_duration)]
    pub retry: Duration,
}

/// Arguments for the `ls` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LsArgs {
    /// Treat pick/omit as raw regular expressions
    #[arg(short, long)]
    pub regex: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: Format,

    /// Keys to include (comma-separated, or regex with --regex)
    #[arg(short, long, default_value = "")]
    pub pick: String,

    /// Keys to exclude (comma-separated, or regex with --regex)
    #[arg(short, long, default_value = "")]
    pub omit: String,

    /// Prefix prepended to every output key
    #[arg(short = 'e', long, default_value = "")]
    pub prefix: String,

    /// Suffix appended to every output key
    #[arg(short = 'u', long, default_value = "")]
    pub suffix: String,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Tag key to look up
    #[arg(short, long)]
    pub key: String,

    /// Value returned when the key is in no tier
    #[arg(short, long, default_value = "")]
    pub default: String,
}

/// Arguments for the `set` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetArgs {
    /// Tag key to set
    #[arg(short, long)]
    pub key: String,

    /// Tag value
    #[arg(short, long)]
    pub value: String,
}

/// Arguments for the `rm` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RmArgs {
    /// Tag key to remove
    #[arg(short, long)]
    pub key: String,
}

/// Largest duration the flag parser accepts. Timeouts and retry windows
/// beyond a day are configuration mistakes, not workloads.
const MAX_FLAG_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Parse a Go-style duration: a bare number means seconds, otherwise one
/// of the `ms`, `s`, `m`, or `h` suffixes applies.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();

    let (number, unit) = match value.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(index) => value.split_at(index),
        None => (value, "s"),
    };

    let number: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration: {value}"))?;

    let seconds = match unit {
        "ms" => number / 1000.0,
        "s" => number,
        "m" => number * 60.0,
        "h" => number * 3600.0,
        _ => return Err(format!("invalid duration unit: {unit}")),
    };

    // try_from rejects negative, NaN, and values too large for Duration.
    let duration = Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("invalid duration: {value}"))?;

    if duration > MAX_FLAG_DURATION {
        return Err(format!("duration too large: {value} (max 24h)"));
    }

    Ok(duration)
}
