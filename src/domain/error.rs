//! Domain errors for the ride ledger.
//!
//! Lifecycle operations on [`Ride`](super::ride::Ride) return these when a
//! requested transition would break a ledger invariant. The ride is left
//! untouched whenever an error is returned.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ridebook::domain::error::DomainError;
//! use ridebook::domain::{Attendance, Ride, RideId};
//! use rust_decimal_macros::dec;
//!
//! let pickup = Utc.with_ymd_and_hms(2025, 5, 4, 6, 0, 0).unwrap();
//! let mut ride = Ride::schedule(RideId::new("r-1"), "Sara", "Home", "School", pickup);
//! ride.mark_attendance(Attendance::Absent).unwrap();
//!
//! let result = ride.complete(dec!(25), pickup);
//! assert!(matches!(result, Err(DomainError::AbsentRide { .. })));
//! ```

use thiserror::Error;

use super::ride::RideStatus;

/// Errors that occur when ledger invariants would be violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The ride is marked absent, so it cannot be started or completed.
    #[error("ride {ride_id} is marked absent and cannot be {action}")]
    AbsentRide {
        /// The ride that was rejected.
        ride_id: String,
        /// The attempted action, e.g. "completed".
        action: &'static str,
    },

    /// The status change is not part of the ride lifecycle.
    #[error("ride {ride_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The ride that was rejected.
        ride_id: String,
        /// Current status.
        from: RideStatus,
        /// Requested status.
        to: RideStatus,
    },

    /// Attendance can no longer change once a ride is completed or cancelled.
    #[error("attendance of ride {ride_id} is locked while {status}")]
    AttendanceLocked {
        /// The ride that was rejected.
        ride_id: String,
        /// The terminal status the ride is in.
        status: RideStatus,
    },

    /// Fares must not be negative.
    #[error("fare must not be negative, got {fare}")]
    NegativeFare {
        /// The invalid fare that was provided.
        fare: rust_decimal::Decimal,
    },

    /// A month selector was not a valid `YYYY-MM` month.
    #[error("invalid month '{input}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },
}
