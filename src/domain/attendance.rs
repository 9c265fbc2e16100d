//! Monthly attendance grid for regular clients.
//!
//! One row per regular passenger, one cell per calendar day of the target
//! month. A cell is decided by the first ride in input order, for that
//! passenger and local day, that carries an attendance outcome:
//!
//! - a ride marked absent gives [`CellState::Absent`], whatever its status;
//! - a completed ride marked present gives [`CellState::Present`];
//! - otherwise the cell is [`CellState::NoRide`].
//!
//! Duplicate same-day rides are a data anomaly; the first-match rule keeps
//! the outcome deterministic.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::id::PassengerId;
use super::money::Amount;
use super::passenger::Passenger;
use super::ride::{Ride, RideStatus};
use super::window::CalendarMonth;

/// Attendance outcome for one passenger on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Present,
    Absent,
    #[serde(rename = "none")]
    NoRide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: NaiveDate,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub passenger_id: PassengerId,
    pub name: String,
    pub cells: Vec<GridCell>,
    pub present_count: u32,
    pub absent_count: u32,
    /// Fares of the passenger's completed, present rides in the month.
    pub earnings: Amount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GridTotals {
    pub present_count: u32,
    pub absent_count: u32,
    pub earnings: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceGrid {
    pub month: CalendarMonth,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    pub totals: GridTotals,
}

impl AttendanceGrid {
    /// Row for a passenger, if they are tracked in this grid.
    #[must_use]
    pub fn row(&self, id: &PassengerId) -> Option<&GridRow> {
        self.rows.iter().find(|r| &r.passenger_id == id)
    }
}

fn cell_outcome(ride: &Ride) -> Option<CellState> {
    if ride.attendance.is_absent() {
        Some(CellState::Absent)
    } else if ride.status == RideStatus::Completed {
        Some(CellState::Present)
    } else {
        None
    }
}

/// Build the attendance grid for `month`, with local days taken in `tz`.
///
/// Non-regular passengers are skipped; passing the full passenger list and a
/// pre-filtered regular list give the same grid.
#[must_use]
pub fn build_grid<Tz: TimeZone>(
    passengers: &[Passenger],
    rides: &[Ride],
    month: CalendarMonth,
    tz: &Tz,
) -> AttendanceGrid {
    let days: Vec<NaiveDate> = month.days().collect();

    let mut cells: HashMap<(&PassengerId, NaiveDate), CellState> = HashMap::new();
    let mut earned: HashMap<&PassengerId, Amount> = HashMap::new();

    for ride in rides {
        let Some(id) = ride.passenger_id.as_ref() else {
            continue;
        };
        let day = ride.pickup_date(tz);
        if !month.contains(day) {
            continue;
        }
        if let Some(state) = cell_outcome(ride) {
            cells.entry((id, day)).or_insert(state);
        }
        if ride.is_completed() {
            *earned.entry(id).or_insert(Decimal::ZERO) += ride.earned();
        }
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    let mut totals = GridTotals::default();

    for passenger in passengers.iter().filter(|p| p.is_regular) {
        if !seen.insert(&passenger.id) {
            continue;
        }

        let row_cells: Vec<GridCell> = days
            .iter()
            .map(|&day| GridCell {
                day,
                state: cells
                    .get(&(&passenger.id, day))
                    .copied()
                    .unwrap_or(CellState::NoRide),
            })
            .collect();

        let present_count = count(&row_cells, CellState::Present);
        let absent_count = count(&row_cells, CellState::Absent);
        let earnings = earned.get(&passenger.id).copied().unwrap_or(Decimal::ZERO);

        totals.present_count += present_count;
        totals.absent_count += absent_count;
        totals.earnings += earnings;

        rows.push(GridRow {
            passenger_id: passenger.id.clone(),
            name: passenger.name.clone(),
            cells: row_cells,
            present_count,
            absent_count,
            earnings,
        });
    }

    debug!(
        month = %month.key(),
        rows = rows.len(),
        present = totals.present_count,
        absent = totals.absent_count,
        earnings = %totals.earnings,
        "attendance grid built"
    );

    AttendanceGrid {
        month,
        days,
        rows,
        totals,
    }
}

fn count(cells: &[GridCell], state: CellState) -> u32 {
    cells.iter().filter(|c| c.state == state).count() as u32
}
