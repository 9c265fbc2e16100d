//! `ridebook earnings`.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde_json::json;

use crate::adapter::inbound::cli::{ledger::Ledger, output};
use crate::domain::{earnings, format_sar, Windows};
use crate::error::Result;

/// Execute `earnings`.
pub fn execute<Tz>(ledger: &Ledger, now: &DateTime<Tz>) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let snapshot = earnings(&ledger.snapshot.rides, now);
    let windows = Windows::around(now);

    if output::is_json() {
        output::json_output(json!({
            "command": "earnings",
            "now": now.to_rfc3339(),
            "windows": windows,
            "earnings": snapshot,
        }));
        return Ok(());
    }

    let d = ledger.decimals;
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Earnings");
    output::field(&windows.today.label, output::positive(format_sar(snapshot.today, d)));
    output::field(&windows.week.label, output::positive(format_sar(snapshot.week, d)));
    output::field(&windows.month.label, output::positive(format_sar(snapshot.month, d)));
    output::note(&format!(
        "week {} to {}, completed rides only",
        windows.week.start, windows.week.end
    ));

    Ok(())
}
