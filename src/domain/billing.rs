//! Monthly client statements.
//!
//! Completed rides picked up in the target month are grouped per client.
//! The group key is the linked passenger identity when the ride has one and
//! the ride's passenger name otherwise, so one-off clients and rides whose
//! passenger was deleted still bill under their name.
//!
//! A bill is titled with the name snapshot on the client's first ride in the
//! month, not the current passenger record, so renaming a passenger later
//! does not rewrite past statements. The phone is looked up from the record.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::id::{PassengerId, RideId};
use super::money::Amount;
use super::passenger::{self, Passenger};
use super::ride::{Attendance, Ride};
use super::window::CalendarMonth;

/// Identity a bill is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ClientKey {
    Passenger(PassengerId),
    Name(String),
}

impl ClientKey {
    fn of(ride: &Ride) -> Self {
        match &ride.passenger_id {
            Some(id) => Self::Passenger(id.clone()),
            None => Self::Name(ride.passenger_name.clone()),
        }
    }

    #[must_use]
    pub fn passenger_id(&self) -> Option<&PassengerId> {
        match self {
            Self::Passenger(id) => Some(id),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passenger(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// One billed ride, present or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillLine {
    pub ride_id: RideId,
    pub date: NaiveDate,
    /// Stored fare, shown for reference. Absent lines never reach the total.
    pub fare: Amount,
    pub attendance: Attendance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientBill {
    pub key: ClientKey,
    pub name: String,
    /// Empty when the client has no stored passenger record.
    pub phone: String,
    pub ride_count: u32,
    pub present_count: u32,
    pub absent_count: u32,
    pub total: Amount,
    pub is_regular: bool,
    pub details: Vec<BillLine>,
}

impl ClientBill {
    fn open(key: ClientKey, first: &Ride, record: Option<&Passenger>) -> Self {
        Self {
            name: first.passenger_name.clone(),
            phone: record.map(|p| p.phone.clone()).unwrap_or_default(),
            is_regular: record.is_some_and(|p| p.is_regular),
            key,
            ride_count: 0,
            present_count: 0,
            absent_count: 0,
            total: Decimal::ZERO,
            details: Vec::new(),
        }
    }

    fn add<Tz: TimeZone>(&mut self, ride: &Ride, tz: &Tz) {
        self.ride_count += 1;
        if ride.attendance.is_absent() {
            self.absent_count += 1;
        } else {
            self.present_count += 1;
        }
        self.total += ride.earned();
        self.details.push(BillLine {
            ride_id: ride.id.clone(),
            date: ride.pickup_date(tz),
            fare: ride.fare,
            attendance: ride.attendance,
        });
    }

    /// Lines for days the client rode.
    pub fn present_lines(&self) -> impl Iterator<Item = &BillLine> {
        self.details.iter().filter(|l| !l.attendance.is_absent())
    }

    /// Lines for days the client was absent.
    pub fn absent_lines(&self) -> impl Iterator<Item = &BillLine> {
        self.details.iter().filter(|l| l.attendance.is_absent())
    }

    /// Whether `query` names this client, by passenger id or by name
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.key.passenger_id().is_some_and(|id| id.as_str() == query)
            || self.name.to_lowercase() == query.to_lowercase()
    }
}

/// Build the statement for `month`, sorted by total, highest first.
///
/// Clients with equal totals keep the order in which their first ride
/// appears in `rides`.
#[must_use]
pub fn build_statement<Tz: TimeZone>(
    rides: &[Ride],
    passengers: &[Passenger],
    month: CalendarMonth,
    tz: &Tz,
) -> Vec<ClientBill> {
    let mut bills: Vec<ClientBill> = Vec::new();
    let mut index: HashMap<ClientKey, usize> = HashMap::new();

    for ride in rides.iter().filter(|r| r.is_completed()) {
        if !month.contains(ride.pickup_date(tz)) {
            continue;
        }
        let key = ClientKey::of(ride);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let record = key.passenger_id().and_then(|id| passenger::find(passengers, id));
                bills.push(ClientBill::open(key.clone(), ride, record));
                index.insert(key, bills.len() - 1);
                bills.len() - 1
            }
        };
        bills[slot].add(ride, tz);
    }

    // Stable sort keeps first-appearance order among equal totals.
    bills.sort_by(|a, b| b.total.cmp(&a.total));

    debug!(
        month = %month.key(),
        clients = bills.len(),
        rides = bills.iter().map(|b| b.ride_count).sum::<u32>(),
        "statement built"
    );
    bills
}

/// Monthly summary across all bills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatementTotals {
    pub rides: u32,
    pub clients: u32,
    pub earnings: Amount,
}

impl StatementTotals {
    #[must_use]
    pub fn from_bills(bills: &[ClientBill]) -> Self {
        bills.iter().fold(Self::default(), |acc, bill| Self {
            rides: acc.rides + bill.ride_count,
            clients: acc.clients + 1,
            earnings: acc.earnings + bill.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn june() -> CalendarMonth {
        CalendarMonth::new(2025, 6).unwrap()
    }

    fn completed(id: &str, name: &str, passenger: Option<&str>, day: u32, fare: Decimal) -> Ride {
        let pickup = Utc.with_ymd_and_hms(2025, 6, day, 7, 0, 0).unwrap();
        let mut ride = Ride::schedule(RideId::new(id), name, "Home", "Office", pickup);
        ride.passenger_id = passenger.map(PassengerId::new);
        ride.complete(fare, pickup).unwrap();
        ride
    }

    #[test]
    fn empty_input_gives_empty_statement() {
        assert!(build_statement(&[], &[], june(), &Utc).is_empty());
        assert_eq!(StatementTotals::from_bills(&[]), StatementTotals::default());
    }

    #[test]
    fn unlinked_ride_bills_under_name() {
        let rides = vec![completed("r1", "Ahmed", None, 3, dec!(40))];
        let bills = build_statement(&rides, &[], june(), &Utc);

        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].key, ClientKey::Name("Ahmed".into()));
        assert_eq!(bills[0].name, "Ahmed");
        assert_eq!(bills[0].phone, "");
        assert_eq!(bills[0].total, dec!(40));
        assert!(!bills[0].is_regular);
    }

    #[test]
    fn linked_rides_resolve_phone_and_keep_ride_name() {
        let passengers = vec![Passenger::regular(PassengerId::new("p-1"), "Sara K.", "0501234567")];
        let rides = vec![
            completed("r1", "Sara", Some("p-1"), 2, dec!(25)),
            completed("r2", "Sara Khalid", Some("p-1"), 3, dec!(25)),
        ];
        let bills = build_statement(&rides, &passengers, june(), &Utc);

        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].name, "Sara");
        assert_eq!(bills[0].phone, "0501234567");
        assert_eq!(bills[0].ride_count, 2);
        assert!(bills[0].is_regular);
    }

    #[test]
    fn missing_passenger_record_degrades_to_empty_phone() {
        let rides = vec![completed("r1", "Omar", Some("gone"), 2, dec!(30))];
        let bills = build_statement(&rides, &[], june(), &Utc);
        assert_eq!(bills[0].key, ClientKey::Passenger(PassengerId::new("gone")));
        assert_eq!(bills[0].name, "Omar");
        assert_eq!(bills[0].phone, "");
    }

    #[test]
    fn absent_lines_are_listed_but_not_totalled() {
        let mut legacy = completed("r2", "Sara", Some("p-1"), 4, dec!(25));
        legacy.attendance = Attendance::Absent;
        let rides = vec![completed("r1", "Sara", Some("p-1"), 3, dec!(25)), legacy];

        let bill = &build_statement(&rides, &[], june(), &Utc)[0];
        assert_eq!(bill.ride_count, 2);
        assert_eq!(bill.present_count, 1);
        assert_eq!(bill.absent_count, 1);
        assert_eq!(bill.total, dec!(25));
        assert_eq!(bill.details.len(), 2);
        assert_eq!(bill.absent_lines().count(), 1);
        assert_eq!(bill.absent_lines().next().unwrap().fare, dec!(25));
    }

    #[test]
    fn only_completed_rides_in_month_are_grouped() {
        let pickup = Utc.with_ymd_and_hms(2025, 6, 5, 7, 0, 0).unwrap();
        let scheduled = Ride::schedule(RideId::new("s"), "Ali", "A", "B", pickup);
        let mut may = completed("m", "Ali", None, 1, dec!(10));
        may.pickup_time = Utc.with_ymd_and_hms(2025, 5, 31, 7, 0, 0).unwrap();

        assert!(build_statement(&[scheduled, may], &[], june(), &Utc).is_empty());
    }

    #[test]
    fn sorted_by_total_with_stable_ties() {
        let rides = vec![
            completed("r1", "Low", None, 1, dec!(10)),
            completed("r2", "First", None, 2, dec!(100)),
            completed("r3", "Second", None, 3, dec!(60)),
            completed("r4", "Second", None, 4, dec!(40)),
        ];
        let bills = build_statement(&rides, &[], june(), &Utc);
        let names: Vec<&str> = bills.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Low"]);
    }

    #[test]
    fn totals_summarize_bills() {
        let rides = vec![
            completed("r1", "A", None, 1, dec!(10)),
            completed("r2", "B", None, 2, dec!(15.5)),
            completed("r3", "B", None, 3, dec!(15.5)),
        ];
        let totals = StatementTotals::from_bills(&build_statement(&rides, &[], june(), &Utc));
        assert_eq!(totals.rides, 3);
        assert_eq!(totals.clients, 2);
        assert_eq!(totals.earnings, dec!(41));
    }

    #[test]
    fn bill_matches_id_or_name() {
        let rides = vec![completed("r1", "Sara", Some("p-1"), 1, dec!(10))];
        let bill = &build_statement(&rides, &[], june(), &Utc)[0];
        assert!(bill.matches("p-1"));
        assert!(bill.matches("  sara "));
        assert!(!bill.matches("omar"));
    }
}
