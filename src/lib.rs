//! Ridebook - ride, attendance, and monthly billing ledger.
//!
//! This crate turns a flat collection of ride and passenger records into the
//! figures an independent driver bills from: windowed earnings, a per-day
//! attendance grid for regular clients, and per-client monthly statements.
//!
//! # Architecture
//!
//! - **`domain`** - Pure ledger core; no I/O, no hidden clock
//!   - `earnings` - Today / this week / this month totals
//!   - `build_grid` - Attendance grid of regular clients
//!   - `build_statement` - Client bills sorted by total
//!   - `Ride` lifecycle - Completion is refused while a ride is marked absent
//!
//! - **`adapter::outbound`** - Snapshot file loading
//! - **`adapter::inbound::cli`** - The `ridebook` command-line surface
//!
//! # Modules
//!
//! - [`domain`] - Rides, passengers, windows, and the report builders
//! - [`infrastructure`] - Configuration loading and logging
//! - [`adapter`] - Snapshot loading and the CLI
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ridebook::domain::{earnings, Ride, RideId};
//! use rust_decimal_macros::dec;
//!
//! let pickup = Utc.with_ymd_and_hms(2025, 5, 7, 6, 0, 0).unwrap();
//! let mut ride = Ride::schedule(RideId::new("r-1"), "Sara", "Home", "School", pickup);
//! ride.complete(dec!(25), pickup).unwrap();
//!
//! let now = Utc.with_ymd_and_hms(2025, 5, 7, 12, 0, 0).unwrap();
//! let totals = earnings(&[ride], &now);
//! assert_eq!(totals.today, dec!(25));
//! assert_eq!(totals.month, dec!(25));
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
