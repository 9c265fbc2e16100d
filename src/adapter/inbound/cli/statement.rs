//! `ridebook statement` and `ridebook bill`.

use std::path::Path;

use chrono::TimeZone;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::{ledger::Ledger, output};
use crate::domain::{
    build_statement, format_sar, render_bill_message, render_csv, CalendarMonth, ClientBill,
    StatementTotals,
};
use crate::error::{Error, Result};

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Rides")]
    rides: u32,
    #[tabled(rename = "Present")]
    present: u32,
    #[tabled(rename = "Absent")]
    absent: u32,
    #[tabled(rename = "Total")]
    total: String,
}

impl BillRow {
    fn from_bill(bill: &ClientBill, decimals: u32) -> Self {
        Self {
            name: if bill.is_regular {
                format!("{} ★", bill.name)
            } else {
                bill.name.clone()
            },
            phone: if bill.phone.is_empty() {
                "-".to_string()
            } else {
                bill.phone.clone()
            },
            rides: bill.ride_count,
            present: bill.present_count,
            absent: bill.absent_count,
            total: format_sar(bill.total, decimals),
        }
    }
}

/// Execute `statement [--month YYYY-MM] [--csv PATH]`.
pub fn execute_statement<Tz: TimeZone>(
    ledger: &Ledger,
    month: CalendarMonth,
    tz: &Tz,
    csv_path: Option<&Path>,
) -> Result<()> {
    let snapshot = &ledger.snapshot;
    let bills = build_statement(&snapshot.rides, &snapshot.passengers, month, tz);
    let totals = StatementTotals::from_bills(&bills);

    if let Some(path) = csv_path {
        return execute_export(ledger, month, &bills, &totals, path);
    }

    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "statement",
            "month": month,
            "bills": bills,
            "totals": totals,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Statement {month}"));

    if bills.is_empty() {
        output::note("No completed rides");
    } else {
        let rows: Vec<BillRow> = bills
            .iter()
            .map(|b| BillRow::from_bill(b, ledger.decimals))
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Monthly Summary");
    output::field("Total Rides", totals.rides);
    output::field("Passengers", totals.clients);
    output::field(
        "Earnings",
        output::positive(format_sar(totals.earnings, ledger.decimals)),
    );

    Ok(())
}

fn execute_export(
    ledger: &Ledger,
    month: CalendarMonth,
    bills: &[ClientBill],
    totals: &StatementTotals,
    path: &Path,
) -> Result<()> {
    let csv = render_csv(month, bills, totals, ledger.decimals);
    std::fs::write(path, &csv)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "statement.export",
            "status": "written",
            "month": month,
            "path": path.display().to_string(),
            "bytes": csv.len(),
        }));
        return Ok(());
    }

    output::success("Statement export complete");
    output::field("Month", month);
    output::field("Path", path.display());
    Ok(())
}

/// Execute `bill <client> [--month YYYY-MM]`.
///
/// The bill text is the command's product, so it is printed even in quiet
/// mode.
pub fn execute_bill<Tz: TimeZone>(
    ledger: &Ledger,
    month: CalendarMonth,
    tz: &Tz,
    client: &str,
) -> Result<()> {
    let snapshot = &ledger.snapshot;
    let bills = build_statement(&snapshot.rides, &snapshot.passengers, month, tz);
    let bill = bills
        .iter()
        .find(|b| b.matches(client))
        .ok_or_else(|| Error::NotFound(format!("no completed rides for '{client}' in {month}")))?;

    let message = render_bill_message(month, bill, ledger.decimals);

    if output::is_json() {
        output::json_output(json!({
            "command": "bill",
            "month": month,
            "bill": bill,
            "message": message,
        }));
        return Ok(());
    }

    print!("{message}");
    Ok(())
}
