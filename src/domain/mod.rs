//! Ride ledger core: pure functions over immutable ride and passenger
//! snapshots. Nothing in here performs I/O or reads the system clock.

pub mod attendance;
pub mod billing;
pub mod earnings;
pub mod error;
pub mod export;
pub mod filter;
pub mod id;
pub mod money;
pub mod passenger;
pub mod ride;
pub mod snapshot;
pub mod window;

// Core ledger types
pub use id::{PassengerId, RideId};
pub use money::{format_sar, format_sar_text, Amount};
pub use passenger::Passenger;
pub use ride::{Attendance, Ride, RideStatus};
pub use snapshot::{Omission, PassengerRecord, RideRecord, Snapshot};

// Windows and selection
pub use filter::{select, RideFilter};
pub use window::{classify, CalendarMonth, DateWindow, WindowMembership, Windows};

// Builders
pub use attendance::{build_grid, AttendanceGrid, CellState, GridCell, GridRow, GridTotals};
pub use billing::{build_statement, BillLine, ClientBill, ClientKey, StatementTotals};
pub use earnings::{earnings, EarningsSnapshot};
pub use export::{render_bill_message, render_csv};
