//! Rides and their lifecycle.
//!
//! A ride starts `scheduled` with attendance `present`. It can be marked
//! present or absent, started, completed with a fixed fare, or cancelled.
//! Completion and presence are linked: an absent ride never completes, which
//! is what keeps absent rides out of every earnings figure.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DomainError;
use super::id::{PassengerId, RideId};
use super::money::Amount;
use super::passenger::Passenger;

/// Where a ride is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled rides accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown ride status '{other}'")),
        }
    }
}

/// Whether the scheduled pickup actually happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
    #[default]
    Present,
    Absent,
}

impl Attendance {
    /// Wire name of the attendance marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(format!("unknown attendance '{other}'")),
        }
    }
}

/// A scheduled or completed transport event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    /// Absent for one-off passengers entered by free text.
    pub passenger_id: Option<PassengerId>,
    /// Name snapshot taken when the ride was created.
    pub passenger_name: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup_time: DateTime<Utc>,
    pub drop_time: Option<DateTime<Utc>>,
    /// Stored fare. Read it through [`Ride::earned`] for any aggregate.
    pub fare: Amount,
    pub status: RideStatus,
    pub attendance: Attendance,
    pub notes: Option<String>,
}

impl Ride {
    /// Schedule a ride for a free-text passenger.
    pub fn schedule(
        id: RideId,
        passenger_name: impl Into<String>,
        pickup_location: impl Into<String>,
        drop_location: impl Into<String>,
        pickup_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            passenger_id: None,
            passenger_name: passenger_name.into(),
            pickup_location: pickup_location.into(),
            drop_location: drop_location.into(),
            pickup_time,
            drop_time: None,
            fare: Decimal::ZERO,
            status: RideStatus::Scheduled,
            attendance: Attendance::Present,
            notes: None,
        }
    }

    /// Schedule a ride for a stored passenger, reusing their route defaults.
    pub fn for_passenger(id: RideId, passenger: &Passenger, pickup_time: DateTime<Utc>) -> Self {
        let mut ride = Self::schedule(
            id,
            passenger.name.clone(),
            passenger.pickup_location.clone().unwrap_or_default(),
            passenger.drop_location.clone().unwrap_or_default(),
            pickup_time,
        );
        ride.passenger_id = Some(passenger.id.clone());
        ride
    }

    /// The fare this ride contributes to any total.
    ///
    /// Absent rides contribute zero whatever their stored fare.
    #[must_use]
    pub fn earned(&self) -> Amount {
        if self.attendance.is_absent() {
            Decimal::ZERO
        } else {
            self.fare
        }
    }

    /// Local calendar date of the pickup in the evaluator's timezone.
    #[must_use]
    pub fn pickup_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.pickup_time.with_timezone(tz).date_naive()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == RideStatus::Completed
    }

    /// Mark the ride present or absent.
    ///
    /// Only open rides accept a new marker; attendance is fixed once the
    /// ride is completed or cancelled.
    pub fn mark_attendance(&mut self, attendance: Attendance) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            debug!(ride_id = %self.id, status = %self.status, "attendance change rejected");
            return Err(DomainError::AttendanceLocked {
                ride_id: self.id.to_string(),
                status: self.status,
            });
        }
        self.attendance = attendance;
        Ok(())
    }

    /// Pick the passenger up.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.ensure_present("started")?;
        if self.status != RideStatus::Scheduled {
            return Err(self.invalid_transition(RideStatus::InProgress));
        }
        self.status = RideStatus::InProgress;
        Ok(())
    }

    /// Complete the ride, fixing its fare and drop time.
    pub fn complete(&mut self, fare: Amount, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid_transition(RideStatus::Completed));
        }
        self.ensure_present("completed")?;
        if fare.is_sign_negative() && !fare.is_zero() {
            return Err(DomainError::NegativeFare { fare });
        }

        self.status = RideStatus::Completed;
        self.drop_time = Some(at);
        self.fare = fare;
        Ok(())
    }

    /// Cancel an open ride.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid_transition(RideStatus::Cancelled));
        }
        self.status = RideStatus::Cancelled;
        Ok(())
    }

    fn ensure_present(&self, action: &'static str) -> Result<(), DomainError> {
        if self.attendance.is_absent() {
            debug!(ride_id = %self.id, action, "absent ride rejected");
            return Err(DomainError::AbsentRide {
                ride_id: self.id.to_string(),
                action,
            });
        }
        Ok(())
    }

    fn invalid_transition(&self, to: RideStatus) -> DomainError {
        debug!(ride_id = %self.id, from = %self.status, to = %to, "transition rejected");
        DomainError::InvalidTransition {
            ride_id: self.id.to_string(),
            from: self.status,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rust_decimal_macros::dec;

    fn pickup() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 4, 5, 30, 0).unwrap()
    }

    fn ride() -> Ride {
        Ride::schedule(RideId::new("r-1"), "Sara", "Home", "School", pickup())
    }

    #[test]
    fn scheduled_ride_defaults() {
        let ride = ride();
        assert_eq!(ride.status, RideStatus::Scheduled);
        assert_eq!(ride.attendance, Attendance::Present);
        assert_eq!(ride.fare, Decimal::ZERO);
        assert!(ride.drop_time.is_none());
        assert!(ride.passenger_id.is_none());
    }

    #[test]
    fn for_passenger_copies_defaults() {
        let mut passenger = Passenger::new(PassengerId::new("p-1"), "Omar", "0500000000");
        passenger.pickup_location = Some("Villa 12".into());

        let ride = Ride::for_passenger(RideId::new("r-2"), &passenger, pickup());
        assert_eq!(ride.passenger_id, Some(PassengerId::new("p-1")));
        assert_eq!(ride.passenger_name, "Omar");
        assert_eq!(ride.pickup_location, "Villa 12");
        assert_eq!(ride.drop_location, "");
    }

    #[test]
    fn complete_fixes_fare_and_drop_time() {
        let mut ride = ride();
        let at = pickup() + chrono::Duration::minutes(25);
        ride.complete(dec!(25), at).unwrap();

        assert_eq!(ride.status, RideStatus::Completed);
        assert_eq!(ride.fare, dec!(25));
        assert_eq!(ride.drop_time, Some(at));
        assert_eq!(ride.earned(), dec!(25));
    }

    #[test]
    fn absent_ride_cannot_complete() {
        let mut ride = ride();
        ride.mark_attendance(Attendance::Absent).unwrap();

        let err = ride.complete(dec!(25), pickup()).unwrap_err();
        assert!(matches!(err, DomainError::AbsentRide { action: "completed", .. }));
        assert_eq!(ride.status, RideStatus::Scheduled);
        assert_eq!(ride.fare, Decimal::ZERO);
    }

    #[test]
    fn absent_ride_cannot_start() {
        let mut ride = ride();
        ride.mark_attendance(Attendance::Absent).unwrap();
        assert!(matches!(ride.start(), Err(DomainError::AbsentRide { .. })));
    }

    #[test]
    fn marking_present_again_allows_completion() {
        let mut ride = ride();
        ride.mark_attendance(Attendance::Absent).unwrap();
        ride.mark_attendance(Attendance::Present).unwrap();
        ride.start().unwrap();
        ride.complete(dec!(30), pickup()).unwrap();
        assert!(ride.is_completed());
    }

    #[test]
    fn negative_fare_is_rejected() {
        let mut ride = ride();
        let err = ride.complete(dec!(-1), pickup()).unwrap_err();
        assert_eq!(err, DomainError::NegativeFare { fare: dec!(-1) });
        assert_eq!(ride.status, RideStatus::Scheduled);
    }

    #[test]
    fn terminal_rides_reject_transitions() {
        let mut ride = ride();
        ride.cancel().unwrap();

        assert!(matches!(
            ride.complete(dec!(10), pickup()),
            Err(DomainError::InvalidTransition {
                from: RideStatus::Cancelled,
                to: RideStatus::Completed,
                ..
            })
        ));
        assert!(matches!(ride.cancel(), Err(DomainError::InvalidTransition { .. })));
        assert!(matches!(
            ride.mark_attendance(Attendance::Absent),
            Err(DomainError::AttendanceLocked { .. })
        ));
    }

    #[test]
    fn start_only_from_scheduled() {
        let mut ride = ride();
        ride.start().unwrap();
        assert_eq!(ride.status, RideStatus::InProgress);
        assert!(matches!(ride.start(), Err(DomainError::InvalidTransition { .. })));
    }

    #[test]
    fn earned_is_zero_for_absent_even_with_stored_fare() {
        let mut ride = ride();
        ride.fare = dec!(99);
        ride.status = RideStatus::Completed;
        ride.attendance = Attendance::Absent;
        assert_eq!(ride.earned(), Decimal::ZERO);
    }

    #[test]
    fn pickup_date_follows_evaluator_timezone() {
        let mut ride = ride();
        ride.pickup_time = Utc.with_ymd_and_hms(2025, 5, 31, 22, 0, 0).unwrap();

        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(ride.pickup_date(&Utc), NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
        assert_eq!(ride.pickup_date(&riyadh), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn status_and_attendance_parse_wire_names() {
        assert_eq!("in_progress".parse::<RideStatus>(), Ok(RideStatus::InProgress));
        assert_eq!("Completed".parse::<RideStatus>(), Ok(RideStatus::Completed));
        assert!("done".parse::<RideStatus>().is_err());
        assert_eq!("absent".parse::<Attendance>(), Ok(Attendance::Absent));
        assert!("late".parse::<Attendance>().is_err());
    }
}
