//! Outbound adapters (driven side).

pub mod snapshot;
