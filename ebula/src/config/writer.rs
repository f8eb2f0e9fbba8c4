//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::defaults::{MAX_TICK_STEP_SECS, MIN_TICK_INTERVAL_MS};
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[drive]
; Real milliseconds between two clock ticks while auto-tick runs (minimum {})
tick_interval_ms = {}
; Simulated seconds each tick adds to the clock (1 - {})
tick_step_secs = {}
; Keep the timeline scrolled to the train in new sessions
auto_scroll = {}

[logging]
; Log file path (default: ~/.ebula/ebula.log)
file = {}
; Log at DEBUG level (RUST_LOG overrides this)
debug = {}

[store]
; Directory searched for route bundles given by bare file name
bundle_dir = {}
"#,
        MIN_TICK_INTERVAL_MS,
        config.drive.tick_interval_ms,
        MAX_TICK_STEP_SECS,
        config.drive.tick_step_secs,
        config.drive.auto_scroll,
        path_to_string(&config.logging.file),
        config.logging.debug,
        path_to_string(&config.store.bundle_dir),
    )
}

/// Convert a path to string, using ~ for home directory.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
