use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;

use ridebook::domain::{Attendance, Passenger, PassengerId, Ride, RideId, RideStatus};

/// UTC+3, the offset the fixtures are written in.
pub fn riyadh() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

/// An instant given in Riyadh wall-clock time.
pub fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    riyadh()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Wednesday 7 May 2025, 09:00 in Riyadh.
pub fn now() -> DateTime<FixedOffset> {
    riyadh().with_ymd_and_hms(2025, 5, 7, 9, 0, 0).unwrap()
}

pub fn regular(id: &str, name: &str, phone: &str) -> Passenger {
    Passenger::regular(PassengerId::new(id), name, phone)
}

pub fn occasional(id: &str, name: &str, phone: &str) -> Passenger {
    Passenger::new(PassengerId::new(id), name, phone)
}

/// A scheduled ride, optionally linked to a passenger.
pub fn scheduled(id: &str, passenger: Option<&str>, name: &str, at: DateTime<Utc>) -> Ride {
    let mut ride = Ride::schedule(RideId::new(id), name, "Home", "School", at);
    ride.passenger_id = passenger.map(PassengerId::new);
    ride
}

/// A ride completed through the lifecycle with `fare`.
pub fn completed(
    id: &str,
    passenger: Option<&str>,
    name: &str,
    at: DateTime<Utc>,
    fare: Decimal,
) -> Ride {
    let mut ride = scheduled(id, passenger, name, at);
    ride.complete(fare, at).unwrap();
    ride
}

/// A ride marked absent before completion, with a stored fare.
pub fn absent(id: &str, passenger: Option<&str>, name: &str, at: DateTime<Utc>, fare: Decimal) -> Ride {
    let mut ride = scheduled(id, passenger, name, at);
    ride.fare = fare;
    ride.mark_attendance(Attendance::Absent).unwrap();
    ride
}

/// A completed record carrying absent attendance, as legacy data may.
pub fn completed_absent(
    id: &str,
    passenger: Option<&str>,
    name: &str,
    at: DateTime<Utc>,
    fare: Decimal,
) -> Ride {
    let mut ride = completed(id, passenger, name, at, fare);
    ride.attendance = Attendance::Absent;
    ride
}

pub fn cancelled(id: &str, passenger: Option<&str>, name: &str, at: DateTime<Utc>) -> Ride {
    let mut ride = scheduled(id, passenger, name, at);
    ride.cancel().unwrap();
    assert_eq!(ride.status, RideStatus::Cancelled);
    ride
}
