//! Earnings totals for today, this week, and this month.

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::money::Amount;
use super::ride::Ride;
use super::window::Windows;

/// Completed-ride earnings for the three standard windows.
///
/// The windows are not exclusive: a ride earned today also counts towards
/// the week and the month that contain today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EarningsSnapshot {
    pub today: Amount,
    pub week: Amount,
    pub month: Amount,
}

/// Sum completed fares per window, evaluated on `now`'s wall clock.
///
/// Absent rides contribute zero even when a completed record carries a fare.
#[must_use]
pub fn earnings<Tz: TimeZone>(rides: &[Ride], now: &DateTime<Tz>) -> EarningsSnapshot {
    let tz = now.timezone();
    let windows = Windows::around(now);
    let mut snapshot = EarningsSnapshot::default();
    let mut counted = 0usize;

    for ride in rides.iter().filter(|r| r.is_completed()) {
        let m = windows.membership(ride.pickup_date(&tz));
        let earned = ride.earned();
        if m.in_today {
            snapshot.today += earned;
        }
        if m.in_this_week {
            snapshot.week += earned;
        }
        if m.in_this_month {
            snapshot.month += earned;
        }
        if m.in_today || m.in_this_week || m.in_this_month {
            counted += 1;
        }
    }

    debug!(
        rides = rides.len(),
        counted,
        today = %snapshot.today,
        week = %snapshot.week,
        month = %snapshot.month,
        "earnings computed"
    );
    snapshot
}

impl EarningsSnapshot {
    /// True when nothing was earned in any window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.today == Decimal::ZERO && self.week == Decimal::ZERO && self.month == Decimal::ZERO
    }
}
