//! Ride selection by window, status, attendance, and passenger.
//!
//! Predicates compose by logical AND. Selection never mutates or re-sorts its
//! input: rides come back lazily, in input order.

use chrono::TimeZone;

use super::id::PassengerId;
use super::ride::{Attendance, Ride, RideStatus};
use super::window::{CalendarMonth, DateWindow};

/// Conjunction of optional ride predicates. An empty filter matches all rides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RideFilter {
    pub window: Option<DateWindow>,
    pub status: Option<RideStatus>,
    pub attendance: Option<Attendance>,
    pub passenger: Option<PassengerId>,
}

impl RideFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rides whose local pickup date falls in `window`.
    #[must_use]
    pub fn within(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Keep rides picked up during `month`.
    #[must_use]
    pub fn within_month(self, month: CalendarMonth) -> Self {
        self.within(DateWindow::month_of(month.first_day()))
    }

    #[must_use]
    pub fn with_status(mut self, status: RideStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_attendance(mut self, attendance: Attendance) -> Self {
        self.attendance = Some(attendance);
        self
    }

    #[must_use]
    pub fn for_passenger(mut self, id: PassengerId) -> Self {
        self.passenger = Some(id);
        self
    }

    /// Whether `ride` satisfies every set predicate, with dates taken in `tz`.
    #[must_use]
    pub fn matches<Tz: TimeZone>(&self, ride: &Ride, tz: &Tz) -> bool {
        if self.status.is_some_and(|s| s != ride.status) {
            return false;
        }
        if self.attendance.is_some_and(|a| a != ride.attendance) {
            return false;
        }
        if let Some(id) = &self.passenger {
            if ride.passenger_id.as_ref() != Some(id) {
                return false;
            }
        }
        match &self.window {
            Some(window) => window.contains(ride.pickup_date(tz)),
            None => true,
        }
    }
}

/// Lazily select the rides matching `filter`, preserving input order.
pub fn select<'a, Tz: TimeZone>(
    rides: &'a [Ride],
    filter: &'a RideFilter,
    tz: &'a Tz,
) -> impl Iterator<Item = &'a Ride> + 'a {
    rides.iter().filter(move |ride| filter.matches(ride, tz))
}
