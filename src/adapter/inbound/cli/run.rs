//! Command dispatch.

use std::fmt::Display;

use chrono::{Local, TimeZone, Utc};

use crate::adapter::inbound::cli::command::{Cli, Commands, MonthArgs};
use crate::adapter::inbound::cli::ledger::Ledger;
use crate::adapter::inbound::cli::{check, earnings, grid, rides, statement};
use crate::domain::snapshot::parse_instant;
use crate::domain::CalendarMonth;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Run the parsed command against the loaded configuration.
///
/// Calendar boundaries use the configured UTC offset when one is set and the
/// machine's local timezone otherwise. Timestamps without an offset, in the
/// snapshot or in `--now`, are read on that same clock.
pub fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match config.utc_offset() {
        Some(offset) => dispatch(cli, config, &offset),
        None => dispatch(cli, config, &Local),
    }
}

fn dispatch<Tz>(cli: &Cli, config: &Config, tz: &Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let now = match cli.now.as_deref() {
        Some(raw) => parse_instant(raw, tz).ok_or_else(|| Error::InvalidNow(raw.to_string()))?,
        None => Utc::now(),
    }
    .with_timezone(tz);
    let month = |args: &MonthArgs| args.month.unwrap_or_else(|| CalendarMonth::current(&now));

    match &cli.command {
        Commands::Earnings => earnings::execute(&Ledger::open(config, tz)?, &now),
        Commands::Grid(args) => grid::execute(&Ledger::open(config, tz)?, month(args), tz),
        Commands::Statement(args) => statement::execute_statement(
            &Ledger::open(config, tz)?,
            month(&args.month),
            tz,
            args.csv.as_deref(),
        ),
        Commands::Bill(args) => {
            statement::execute_bill(&Ledger::open(config, tz)?, month(&args.month), tz, &args.client)
        }
        Commands::Rides(args) => rides::execute(&Ledger::open(config, tz)?, args, &now),
        Commands::Check => check::execute(&cli.config, config, tz),
    }
}
