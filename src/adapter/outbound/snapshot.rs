//! Snapshot file reader.
//!
//! The store exports its tables as one JSON document:
//!
//! ```json
//! { "rides": [ ... ], "passengers": [ ... ] }
//! ```
//!
//! Either key may be missing. Rows are converted with
//! [`Snapshot::from_records`], so bad rows become omissions rather than
//! load failures.

use std::path::Path;

use chrono::TimeZone;
use serde::Deserialize;
use tracing::info;

use crate::domain::{PassengerRecord, RideRecord, Snapshot};
use crate::error::SnapshotError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotFile {
    rides: Vec<RideRecord>,
    passengers: Vec<PassengerRecord>,
}

/// Parse snapshot JSON text, reading offset-less timestamps in `tz`.
pub fn parse_snapshot<Tz: TimeZone>(
    content: &str,
    path: &Path,
    tz: &Tz,
) -> Result<Snapshot, SnapshotError> {
    let file: SnapshotFile =
        serde_json::from_str(content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Snapshot::from_records(file.rides, file.passengers, tz))
}

/// Load and convert the snapshot at `path`.
pub fn load_snapshot<Tz: TimeZone>(path: &Path, tz: &Tz) -> Result<Snapshot, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&content, path, tz)?;

    info!(
        path = %path.display(),
        rides = snapshot.rides.len(),
        passengers = snapshot.passengers.len(),
        omitted = snapshot.omissions.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
