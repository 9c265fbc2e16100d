use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// May 2025 ledger used by the CLI tests, evaluated at 2025-05-07 09:00 +03:00.
///
/// Expected figures:
/// - earnings today 85, week 135, month 175;
/// - grid: Sara 3 present, 1 absent, 75 earned; Omar empty;
/// - statement: Sara 75, Lina 60, Ahmed 40 (5 rides, 3 clients);
/// - one omitted ride (`r8`).
pub const MAY_LEDGER: &str = r#"{
  "passengers": [
    { "id": "p-sara", "name": "Sara", "phone": "0501111111", "is_regular": true },
    { "id": "p-omar", "name": "Omar", "phone": "0502222222", "is_regular": true },
    { "id": "p-lina", "name": "Lina", "phone": "0503333333", "is_regular": false }
  ],
  "rides": [
    { "id": "r1", "passenger_id": "p-sara", "passenger_name": "Sara", "pickup_location": "Villa 12", "drop_location": "School",
      "pickup_time": "2025-05-04T06:30:00+03:00", "fare": 25, "status": "completed", "attendance": "present" },
    { "id": "r2", "passenger_id": "p-sara", "passenger_name": "Sara", "pickup_location": "Villa 12", "drop_location": "School",
      "pickup_time": "2025-05-05 03:30:00+00", "fare": "25", "status": "completed", "attendance": "present" },
    { "id": "r3", "passenger_id": "p-sara", "passenger_name": "Sara", "pickup_location": "Villa 12", "drop_location": "School",
      "pickup_time": "2025-05-06T06:30:00+03:00", "fare": 25, "status": "scheduled", "attendance": "absent" },
    { "id": "r4", "passenger_id": "p-sara", "passenger_name": "Sara", "pickup_location": "Villa 12", "drop_location": "School",
      "pickup_time": "2025-05-07T06:30:00+03:00", "fare": 25, "status": "completed", "attendance": "present" },
    { "id": "r5", "passenger_id": "p-lina", "passenger_name": "Lina", "pickup_location": "Mall", "drop_location": "Airport",
      "pickup_time": "2025-05-07T08:00:00+03:00", "fare": 60, "status": "completed" },
    { "id": "r6", "passenger_id": null, "passenger_name": "Ahmed", "pickup_location": "Hotel", "drop_location": "Office",
      "pickup_time": "2025-05-02T10:00:00+03:00", "fare": 40, "status": "completed", "attendance": "present" },
    { "id": "r7", "passenger_id": "p-omar", "passenger_name": "Omar", "pickup_location": "Home", "drop_location": "Office",
      "pickup_time": "2025-05-07T07:00:00+03:00", "fare": 30, "status": "cancelled", "attendance": "present" },
    { "id": "r8", "passenger_id": "p-omar", "passenger_name": "Omar", "pickup_location": "Home", "drop_location": "Office",
      "pickup_time": "sometime", "fare": 30, "status": "completed" },
    { "id": "r9", "passenger_id": "p-sara", "passenger_name": "Sara", "pickup_location": "Villa 12", "drop_location": "School",
      "pickup_time": "2025-04-30T06:30:00+03:00", "fare": 25, "status": "completed", "attendance": "present" }
  ]
}"#;

pub const RIYADH_CONFIG: &str = r#"
[logging]
level = "warn"
format = "pretty"

[ledger]
utc_offset = "+03:00"
"#;

/// A temp workspace holding a config and a snapshot file.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
    pub snapshot: PathBuf,
}

impl Workspace {
    pub fn new(config: &str, snapshot: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("ridebook.toml");
        let snapshot_path = dir.path().join("ledger.json");
        fs::write(&config_path, config).expect("write config");
        fs::write(&snapshot_path, snapshot).expect("write snapshot");
        Self {
            dir,
            config: config_path,
            snapshot: snapshot_path,
        }
    }

    pub fn may() -> Self {
        Self::new(RIYADH_CONFIG, MAY_LEDGER)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
