//! Integration tests for the `ebula` binary.
//!
//! Each test runs the built binary with `HOME` pointed at a temporary
//! directory, so configuration and logs never touch the real home.
//!
//! Run with: `cargo test -p ebula-cli --test cli_workflow`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const SAMPLE_BUNDLE: &str = r#"{
    "version": 1,
    "route": { "name": "Nossen - Freiberg", "startKm": 0.0, "endKm": 40.0 },
    "trackObjects": [
        { "km": 0.0, "type": "STATION", "name": "Nossen" },
        { "km": 12.4, "type": "SPEED_CHANGE", "speedLimit": 100 },
        { "km": 40.0, "type": "STATION", "name": "Freiberg" }
    ],
    "timetableEntries": [
        { "km": 0.0, "stationName": "Nossen", "departureTime": "08:00" },
        { "km": 40.0, "stationName": "Freiberg", "arrivalTime": "08:40" }
    ],
    "trips": [
        { "name": "RB 31", "calculationMode": "TIME_BASED" },
        { "name": "Sonderzug", "calculationMode": "SPEED_BASED", "avgSpeedKmh": 80.0, "departureTimeStr": "08:00" }
    ]
}"#;

/// A temporary home directory with a bundle file in it.
struct Sandbox {
    home: TempDir,
    bundle: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().expect("temp home");
        let bundle = home.path().join("nossen-freiberg.json");
        fs::write(&bundle, SAMPLE_BUNDLE).expect("write bundle");
        Self { home, bundle }
    }

    fn home(&self) -> &Path {
        self.home.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ebula"))
            .args(args)
            .env("HOME", self.home())
            .env_remove("RUST_LOG")
            .output()
            .expect("run ebula binary")
    }

    fn bundle_arg(&self) -> &str {
        self.bundle.to_str().expect("utf-8 temp path")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Timeline
// ============================================================================

#[test]
fn test_timeline_prints_merged_rows() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["timeline", "--bundle", sandbox.bundle_arg(), "--at-km", "20"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Nossen - Freiberg (km 0.000 - 40.000)"));
    // Station objects merge with their stops: 2 stations and 1 speed change.
    let rows: Vec<&str> = text
        .lines()
        .skip(2)
        .take_while(|line| !line.is_empty())
        .collect();
    assert_eq!(rows.len(), 3, "rows: {:?}", rows);
    assert!(rows[0].starts_with('·'));
    assert!(rows[1].starts_with('▶'));
    assert!(rows[1].contains("V 100 km/h"));
    assert!(rows[2].starts_with(' '));
    assert!(text.contains("3 items, 2 stations"));
}

#[test]
fn test_missing_bundle_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["timeline", "--bundle", "does-not-exist.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does-not-exist.json"));
}

// ============================================================================
// Position
// ============================================================================

#[test]
fn test_position_interpolates_timetable() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["position", "--bundle", sandbox.bundle_arg(), "--time", "08:10"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Trip:     RB 31 (time-based)"));
    assert!(text.contains("Km:       10.000"));
    assert!(text.contains("Progress: 25.0%"));
    assert!(text.contains("Next:     Freiberg (km 40.000, arr 08:40)"));
}

#[test]
fn test_position_speed_based_trip_by_name() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "position",
        "--bundle",
        sandbox.bundle_arg(),
        "--trip",
        "sonderzug",
        "--time",
        "08:15",
        "--offset",
        "-0.5",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Km:       19.500"));
}

#[test]
fn test_position_rejects_invalid_time() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["position", "--bundle", sandbox.bundle_arg(), "--time", "25:99"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid time '25:99'"));
}

#[test]
fn test_position_unknown_trip_lists_available() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "position",
        "--bundle",
        sandbox.bundle_arg(),
        "--trip",
        "ICE 1",
        "--time",
        "08:10",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Trip 'ICE 1' not found"));
    assert!(err.contains("RB 31"));
}

// ============================================================================
// Drive
// ============================================================================

#[test]
fn test_drive_stops_after_duration() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "drive",
        "--bundle",
        sandbox.bundle_arg(),
        "--time",
        "08:00",
        "--seconds",
        "1",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Driving RB 31 on Nossen - Freiberg"));
    assert!(text.contains("Stopped at"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_path_uses_home() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "path"]);

    assert!(output.status.success());
    let expected = sandbox.home().join(".ebula").join("config.ini");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn test_config_init_then_show() {
    let sandbox = Sandbox::new();

    let init = sandbox.run(&["config", "init"]);
    assert!(init.status.success());
    assert!(sandbox.home().join(".ebula").join("config.ini").exists());

    let show = sandbox.run(&["config", "show"]);
    assert!(show.status.success());
    let text = stdout(&show);
    assert!(text.contains("[drive]"));
    assert!(text.contains("tick_interval_ms = 1000"));
}
