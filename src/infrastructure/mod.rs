//! Infrastructure layer.
//!
//! Provides technical concerns that support the ledger without containing
//! business logic: configuration loading and logging initialization.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation

pub mod config;
