//! `ridebook rides`: filtered ride list.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{RidesArgs, WindowArg};
use crate::adapter::inbound::cli::{ledger::Ledger, output};
use crate::domain::{format_sar, select, DateWindow, PassengerId, Ride, RideFilter};
use crate::error::Result;

#[derive(Tabled)]
struct RideRow {
    #[tabled(rename = "Pickup")]
    pickup: String,
    #[tabled(rename = "Passenger")]
    passenger: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Attendance")]
    attendance: String,
    #[tabled(rename = "Fare")]
    fare: String,
}

impl RideRow {
    fn from_ride<Tz>(ride: &Ride, tz: &Tz, decimals: u32) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            pickup: ride
                .pickup_time
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            passenger: ride.passenger_name.clone(),
            route: format!("{} → {}", ride.pickup_location, ride.drop_location),
            status: ride.status.to_string(),
            attendance: ride.attendance.to_string(),
            fare: if ride.attendance.is_absent() {
                "-".to_string()
            } else {
                format_sar(ride.fare, decimals)
            },
        }
    }
}

/// Resolve a window argument against the local date of `now`.
#[must_use]
pub fn resolve_window<Tz: TimeZone>(window: WindowArg, now: &DateTime<Tz>) -> Option<DateWindow> {
    let today = now.date_naive();
    match window {
        WindowArg::Today => Some(DateWindow::today(today)),
        WindowArg::Week => Some(DateWindow::week_of(today)),
        WindowArg::Month => Some(DateWindow::month_of(today)),
        WindowArg::Last7 => Some(DateWindow::trailing_days(today, 7)),
        WindowArg::Last30 => Some(DateWindow::trailing_days(today, 30)),
        WindowArg::All => None,
    }
}

fn build_filter<Tz: TimeZone>(args: &RidesArgs, now: &DateTime<Tz>) -> RideFilter {
    let mut filter = RideFilter::new();
    if let Some(window) = resolve_window(args.window, now) {
        filter = filter.within(window);
    }
    if let Some(status) = args.status {
        filter = filter.with_status(status);
    }
    if let Some(attendance) = args.attendance {
        filter = filter.with_attendance(attendance);
    }
    if let Some(id) = &args.passenger {
        filter = filter.for_passenger(PassengerId::new(id.as_str()));
    }
    filter
}

/// Execute `rides [--window W] [--status S] [--attendance A]`.
pub fn execute<Tz>(ledger: &Ledger, args: &RidesArgs, now: &DateTime<Tz>) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let tz = now.timezone();
    let filter = build_filter(args, now);
    let rides: Vec<&Ride> = select(&ledger.snapshot.rides, &filter, &tz).collect();
    let earned: Decimal = rides
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.earned())
        .sum();

    if output::is_json() {
        output::json_output(json!({
            "command": "rides",
            "window": filter.window,
            "count": rides.len(),
            "earned": earned,
            "rides": rides,
        }));
        return Ok(());
    }

    let label = filter
        .window
        .as_ref()
        .map_or_else(|| "All Rides".to_string(), |w| w.label.clone());

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&label);

    if rides.is_empty() {
        output::note("No rides found.");
        return Ok(());
    }

    let rows: Vec<RideRow> = rides
        .iter()
        .map(|r| RideRow::from_ride(r, &tz, ledger.decimals))
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::field("Rides", rides.len());
    output::field("Earned", output::positive(format_sar(earned, ledger.decimals)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn windows_resolve_against_now() {
        let now = Utc.with_ymd_and_hms(2025, 5, 7, 9, 0, 0).unwrap();

        let today = resolve_window(WindowArg::Today, &now).unwrap();
        assert_eq!((today.start, today.end), (date(7), date(7)));

        let week = resolve_window(WindowArg::Week, &now).unwrap();
        assert_eq!((week.start, week.end), (date(4), date(10)));

        let last7 = resolve_window(WindowArg::Last7, &now).unwrap();
        assert_eq!((last7.start, last7.end), (NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(), date(7)));

        assert!(resolve_window(WindowArg::All, &now).is_none());
    }

    #[test]
    fn absent_fare_is_hidden_in_row() {
        let pickup = Utc.with_ymd_and_hms(2025, 5, 7, 6, 0, 0).unwrap();
        let mut ride = Ride::schedule("r1".into(), "Sara", "Home", "School", pickup);
        ride.fare = Decimal::from(25);
        ride.attendance = crate::domain::Attendance::Absent;

        let row = RideRow::from_ride(&ride, &Utc, 0);
        assert_eq!(row.fare, "-");
        assert_eq!(row.route, "Home → School");
    }
}
