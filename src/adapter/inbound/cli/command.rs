//! Command-line interface definitions.
//!
//! Defines the `ridebook` CLI using `clap`. Every subcommand reads the same
//! ledger snapshot; global flags pick the config, the snapshot, the output
//! mode, and optionally pin "now" for reproducible reports.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::snapshot::parse_instant;
use crate::domain::{Attendance, CalendarMonth, RideStatus};
use crate::infrastructure::config::settings::DEFAULT_CONFIG_PATH;

/// Ride, attendance, and monthly billing ledger
#[derive(Parser, Debug)]
#[command(name = "ridebook")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Path to the ledger snapshot (overrides config and RIDEBOOK_SNAPSHOT)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Evaluate as if it were this instant (RFC 3339; no offset means ledger time)
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<String>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the ridebook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show earnings for today, this week, and this month
    Earnings,

    /// Show the attendance grid of regular clients
    Grid(MonthArgs),

    /// Show the monthly billing statement
    Statement(StatementArgs),

    /// Print the shareable monthly bill for one client
    Bill(BillArgs),

    /// List rides in a window
    Rides(RidesArgs),

    /// Validate configuration and snapshot
    Check,
}

/// Month selector shared by monthly reports.
#[derive(Args, Debug, Clone, Default)]
pub struct MonthArgs {
    /// Target month as YYYY-MM (default: current month)
    #[arg(long)]
    pub month: Option<CalendarMonth>,
}

/// Arguments for `ridebook statement`.
#[derive(Args, Debug)]
pub struct StatementArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Write the statement as CSV to this file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for `ridebook bill`.
#[derive(Args, Debug)]
pub struct BillArgs {
    /// Passenger id or client name (case-insensitive)
    pub client: String,

    #[command(flatten)]
    pub month: MonthArgs,
}

/// Arguments for `ridebook rides`.
#[derive(Args, Debug)]
pub struct RidesArgs {
    /// Time window to list
    #[arg(long, value_enum, default_value_t = WindowArg::All)]
    pub window: WindowArg,

    /// Only rides with this status
    #[arg(long)]
    pub status: Option<RideStatus>,

    /// Only rides with this attendance
    #[arg(long)]
    pub attendance: Option<Attendance>,

    /// Only rides linked to this passenger id
    #[arg(long)]
    pub passenger: Option<String>,
}

/// Ride list windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    /// Today only
    Today,
    /// Sunday to Saturday of the current week
    Week,
    /// The current calendar month
    Month,
    /// The last 7 days up to today
    #[value(name = "last7")]
    Last7,
    /// The last 30 days up to today
    #[value(name = "last30")]
    Last30,
    /// Every ride
    #[default]
    All,
}

/// Check the shape of `--now`; it is resolved once the ledger timezone is known.
fn parse_now(raw: &str) -> Result<String, String> {
    parse_instant(raw, &Utc)
        .map(|_| raw.trim().to_string())
        .ok_or_else(|| format!("'{raw}' is not an RFC 3339 instant"))
}
