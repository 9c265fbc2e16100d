//! Conversion of raw store rows into ledger values.
//!
//! The external store hands over loosely typed JSON rows. Conversion never
//! fails as a whole: a fare that is missing or garbled reads as zero, and a
//! ride that cannot be placed in time is left out and reported as an
//! [`Omission`] instead of silently vanishing.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::id::{PassengerId, RideId};
use super::money::{parse_fare, FareIssue};
use super::passenger::Passenger;
use super::ride::{Attendance, Ride, RideStatus};

/// Ride row as exported by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideRecord {
    pub id: String,
    pub passenger_id: Option<String>,
    pub passenger_name: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup_time: Option<String>,
    pub drop_time: Option<String>,
    pub fare: Option<Value>,
    pub status: Option<String>,
    pub attendance: Option<String>,
    pub notes: Option<String>,
}

/// Passenger row as exported by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub profession: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub school_office_info: Option<String>,
    pub is_regular: Option<bool>,
}

/// A ride left out of the snapshot, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Omission {
    pub ride_id: String,
    pub reason: String,
}

/// Consistent view of the ledger handed to the builders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub rides: Vec<Ride>,
    pub passengers: Vec<Passenger>,
    pub omissions: Vec<Omission>,
}

impl Snapshot {
    /// Convert raw rows, keeping input order.
    ///
    /// Timestamps without an offset are wall-clock times in `tz`.
    #[must_use]
    pub fn from_records<Tz: TimeZone>(
        rides: Vec<RideRecord>,
        passengers: Vec<PassengerRecord>,
        tz: &Tz,
    ) -> Self {
        let passengers: Vec<Passenger> = passengers.into_iter().map(Passenger::from).collect();

        let mut accepted = Vec::with_capacity(rides.len());
        let mut omissions = Vec::new();
        for record in rides {
            let ride_id = record.id.clone();
            match record.into_ride(tz) {
                Ok(ride) => accepted.push(ride),
                Err(reason) => {
                    warn!(ride_id = %ride_id, reason = %reason, "ride omitted from snapshot");
                    omissions.push(Omission { ride_id, reason });
                }
            }
        }

        debug!(
            rides = accepted.len(),
            passengers = passengers.len(),
            omitted = omissions.len(),
            "snapshot assembled"
        );
        Self {
            rides: accepted,
            passengers,
            omissions,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.omissions.is_empty()
    }
}

impl RideRecord {
    /// Convert the row into a [`Ride`], reading offset-less timestamps in `tz`.
    ///
    /// Returns the omission reason when the ride cannot be placed in time or
    /// carries an unknown status or attendance.
    pub fn into_ride<Tz: TimeZone>(self, tz: &Tz) -> Result<Ride, String> {
        let pickup_time = match self.pickup_time.as_deref() {
            Some(raw) => {
                parse_instant(raw, tz).ok_or_else(|| format!("unparsable pickup_time '{raw}'"))?
            }
            None => return Err("missing pickup_time".to_string()),
        };

        let status = match non_blank(self.status.as_deref()) {
            Some(raw) => raw.parse::<RideStatus>()?,
            None => RideStatus::Scheduled,
        };
        let attendance = match non_blank(self.attendance.as_deref()) {
            Some(raw) => raw.parse::<Attendance>()?,
            None => Attendance::Present,
        };

        let drop_time = self.drop_time.as_deref().and_then(|raw| {
            let parsed = parse_instant(raw, tz);
            if parsed.is_none() {
                warn!(ride_id = %self.id, drop_time = raw, "ignoring unparsable drop_time");
            }
            parsed
        });

        let fare = match parse_fare(self.fare.as_ref()) {
            Ok(fare) => fare,
            Err(FareIssue::Missing) => Decimal::ZERO,
            Err(issue) => {
                warn!(ride_id = %self.id, issue = issue.as_str(), "fare read as zero");
                Decimal::ZERO
            }
        };

        Ok(Ride {
            id: RideId::new(self.id),
            passenger_id: non_blank(self.passenger_id.as_deref()).map(PassengerId::new),
            passenger_name: self.passenger_name,
            pickup_location: self.pickup_location,
            drop_location: self.drop_location,
            pickup_time,
            drop_time,
            fare,
            status,
            attendance,
            notes: self.notes,
        })
    }
}

impl From<PassengerRecord> for Passenger {
    fn from(record: PassengerRecord) -> Self {
        Self {
            id: PassengerId::new(record.id),
            name: record.name,
            phone: record.phone,
            profession: owned_non_blank(record.profession),
            pickup_location: owned_non_blank(record.pickup_location),
            drop_location: owned_non_blank(record.drop_location),
            school_office_info: owned_non_blank(record.school_office_info),
            is_regular: record.is_regular.unwrap_or(false),
        }
    }
}

/// Parse an instant in RFC 3339 or the Postgres text form
/// (`2025-05-04 08:00:00+03`).
///
/// A timestamp without an offset is a wall-clock time in `tz`. When that
/// local time is ambiguous the earlier instant wins; a time skipped by a DST
/// jump does not parse.
#[must_use]
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(t) = DateTime::parse_from_str(raw, fmt) {
            return Some(t.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
            return tz
                .from_local_datetime(&t)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }
    None
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn owned_non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
