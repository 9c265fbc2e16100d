//! Text renderings of a monthly statement: the billing CSV and the bill
//! message shared with a client.

use rust_decimal::RoundingStrategy;

use super::billing::{ClientBill, StatementTotals};
use super::money::{format_sar_text, Amount};
use super::window::CalendarMonth;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━";

/// Render the monthly billing report as CSV.
///
/// Amounts in rows are written as plain numbers so spreadsheets can sum
/// them; the summary lines use `SAR` text formatting.
#[must_use]
pub fn render_csv(
    month: CalendarMonth,
    bills: &[ClientBill],
    totals: &StatementTotals,
    decimals: u32,
) -> String {
    let mut csv = format!("Monthly Billing Report - {month}\n\n");
    csv.push_str("Passenger,Rides,Total (SAR)\n");

    for bill in bills {
        csv.push_str(&format!(
            "{},{},{}\n",
            csv_field(&bill.name),
            bill.ride_count,
            plain(bill.total, decimals)
        ));
    }

    csv.push('\n');
    csv.push_str(&format!(
        "Total Earnings: {}\n",
        format_sar_text(totals.earnings, decimals)
    ));
    csv.push_str(&format!("Total Rides: {}\n", totals.rides));
    csv
}

/// Render the plain-text monthly bill for one client.
///
/// Present days are listed with their fare, absent days by date only. The
/// ride count reported is the number of present days.
#[must_use]
pub fn render_bill_message(month: CalendarMonth, bill: &ClientBill, decimals: u32) -> String {
    let mut msg = format!("{RULE}\n🚗 *MONTHLY BILL*\n📆 {month}\n{RULE}\n\n");
    msg.push_str(&format!("👤 *{}*\n\n📋 *Ride Details:*\n", bill.name));

    for line in bill.present_lines() {
        msg.push_str(&format!(
            "   📅 {} → {}\n",
            line.date.format("%d %b"),
            format_sar_text(line.fare, decimals)
        ));
    }

    let mut absent = bill.absent_lines().peekable();
    if absent.peek().is_some() {
        msg.push_str("\n❌ Absent Days:\n");
        for line in absent {
            msg.push_str(&format!("   {}\n", line.date.format("%d %b")));
        }
    }

    msg.push_str(&format!("\n{RULE}\n"));
    msg.push_str(&format!("✅ Total Rides: {}\n", bill.present_count));
    msg.push_str(&format!(
        "💰 *Total Amount: {}*\n",
        format_sar_text(bill.total, decimals)
    ));
    msg.push_str(&format!("{RULE}\n\nThank you for choosing us! 🙏\n_Pick & Drop Service_ 🚙\n"));
    msg
}

fn plain(amount: Amount, decimals: u32) -> String {
    let prec = decimals as usize;
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
