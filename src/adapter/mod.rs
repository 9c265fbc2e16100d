//! Adapters around the ledger core.
//!
//! - [`inbound`] - The `ridebook` command-line surface
//! - [`outbound`] - Snapshot file loading

pub mod inbound;
pub mod outbound;
