//! The loaded ledger a command operates on.

use std::path::PathBuf;

use chrono::TimeZone;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::snapshot::load_snapshot;
use crate::domain::Snapshot;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Snapshot plus the display settings every report needs.
#[derive(Debug)]
pub struct Ledger {
    pub snapshot: Snapshot,
    pub source: PathBuf,
    pub decimals: u32,
}

impl Ledger {
    /// Load the configured snapshot, reading offset-less timestamps in `tz`.
    ///
    /// Omitted rides are announced on stderr unless output is quiet, since
    /// every total below silently excludes them.
    pub fn open<Tz: TimeZone>(config: &Config, tz: &Tz) -> Result<Self> {
        let source = PathBuf::from(&config.store.snapshot);
        let snapshot = load_snapshot(&source, tz)?;

        let omitted = snapshot.omissions.len();
        if omitted > 0 && !output::is_quiet() {
            output::warning(&format!(
                "{omitted} ride(s) omitted from {}; run `ridebook check` for details",
                source.display()
            ));
        }

        Ok(Self {
            snapshot,
            source,
            decimals: config.ledger.currency_decimals,
        })
    }
}
