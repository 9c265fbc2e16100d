//! `ridebook check`: validate configuration and snapshot.

use std::path::Path;

use chrono::TimeZone;
use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::snapshot::load_snapshot;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `check`.
///
/// The config has already been loaded and validated by the time this runs;
/// a snapshot that cannot be read fails the command, omitted rides only warn.
pub fn execute<Tz: TimeZone>(config_path: &Path, config: &Config, tz: &Tz) -> Result<()> {
    let snapshot_path = Path::new(&config.store.snapshot);
    let snapshot = load_snapshot(snapshot_path, tz)?;
    let regular = snapshot.passengers.iter().filter(|p| p.is_regular).count();
    let timezone = config
        .utc_offset()
        .map_or_else(|| "local".to_string(), |o| o.to_string());

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "status": if snapshot.is_complete() { "ok" } else { "degraded" },
            "config": {
                "path": config_path.display().to_string(),
                "found": config_path.exists(),
                "timezone": timezone,
                "currency_decimals": config.ledger.currency_decimals,
            },
            "snapshot": {
                "path": snapshot_path.display().to_string(),
                "rides": snapshot.rides.len(),
                "passengers": snapshot.passengers.len(),
                "regular": regular,
                "omissions": snapshot.omissions,
            },
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Config");
    if config_path.exists() {
        output::success(&format!("Loaded {}", config_path.display()));
    } else {
        output::note(&format!("{} not found, using defaults", config_path.display()));
    }
    output::field("Timezone", &timezone);
    output::field("Decimals", config.ledger.currency_decimals);

    output::section("Snapshot");
    output::success(&format!("Loaded {}", snapshot_path.display()));
    output::field("Rides", snapshot.rides.len());
    output::field("Passengers", snapshot.passengers.len());
    output::field("Regular", regular);

    if snapshot.is_complete() {
        output::success("No omitted rides");
    } else {
        for omission in &snapshot.omissions {
            output::warning(&format!("ride {}: {}", omission.ride_id, omission.reason));
        }
        output::hint("omitted rides are excluded from every total");
    }

    Ok(())
}
