//! `ridebook grid`: the monthly attendance grid.

use chrono::{Datelike, TimeZone};
use serde_json::json;
use tabled::builder::Builder;

use crate::adapter::inbound::cli::{ledger::Ledger, output};
use crate::domain::{build_grid, format_sar, AttendanceGrid, CalendarMonth, CellState};
use crate::error::Result;

fn mark(state: CellState) -> &'static str {
    match state {
        CellState::Present => "✓",
        CellState::Absent => "✗",
        CellState::NoRide => "·",
    }
}

fn render_table(grid: &AttendanceGrid, decimals: u32) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Client".to_string()];
    header.extend(grid.days.iter().map(|d| d.day().to_string()));
    header.extend(["P".to_string(), "A".to_string(), "Earned".to_string()]);
    builder.push_record(header);

    for row in &grid.rows {
        let mut record = vec![row.name.clone()];
        record.extend(row.cells.iter().map(|c| mark(c.state).to_string()));
        record.push(row.present_count.to_string());
        record.push(row.absent_count.to_string());
        record.push(format_sar(row.earnings, decimals));
        builder.push_record(record);
    }

    builder.build().to_string()
}

/// Execute `grid [--month YYYY-MM]`.
pub fn execute<Tz: TimeZone>(ledger: &Ledger, month: CalendarMonth, tz: &Tz) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let snapshot = &ledger.snapshot;
    let grid = build_grid(&snapshot.passengers, &snapshot.rides, month, tz);

    if output::is_json() {
        output::json_output(json!({
            "command": "grid",
            "month": month,
            "grid": grid,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Attendance {month}"));

    if grid.rows.is_empty() {
        output::note("No regular clients.");
        output::hint("mark a passenger as regular to track attendance");
        return Ok(());
    }

    output::lines(&render_table(&grid, ledger.decimals));

    output::section("Totals");
    output::field("Present", output::highlight(grid.totals.present_count));
    output::field("Absent", grid.totals.absent_count);
    output::field(
        "Earnings",
        output::positive(format_sar(grid.totals.earnings, ledger.decimals)),
    );
    output::note("✓ present  ✗ absent  · no ride");

    Ok(())
}
