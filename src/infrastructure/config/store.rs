//! Location of the exported ledger snapshot.

use serde::Deserialize;

/// Environment variable that overrides [`StoreConfig::snapshot`].
pub const SNAPSHOT_ENV: &str = "RIDEBOOK_SNAPSHOT";

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON snapshot of rides and passengers.
    #[serde(default = "default_snapshot_path")]
    pub snapshot: String,
}

fn default_snapshot_path() -> String {
    "ledger.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot_path(),
        }
    }
}
