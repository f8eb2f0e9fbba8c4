//! Default values and constants for all configuration settings.

use std::time::Duration;

use super::file::config_directory;
use super::settings::*;
use crate::live::ControllerConfig;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Shortest accepted tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Default simulated seconds per tick.
pub const DEFAULT_TICK_STEP_SECS: i64 = 1;

/// Largest accepted step per tick (one hour).
pub const MAX_TICK_STEP_SECS: i64 = 3600;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "ebula.log";

/// Default bundle directory name inside the config directory.
pub const DEFAULT_BUNDLE_DIR_NAME: &str = "routes";

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_step_secs: DEFAULT_TICK_STEP_SECS,
            auto_scroll: true,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = config_directory();

        Self {
            drive: DriveSettings::default(),
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE_NAME),
                debug: false,
            },
            store: StoreSettings {
                bundle_dir: config_dir.join(DEFAULT_BUNDLE_DIR_NAME),
            },
        }
    }
}

impl From<&DriveSettings> for ControllerConfig {
    fn from(drive: &DriveSettings) -> Self {
        Self {
            tick_interval: Duration::from_millis(drive.tick_interval_ms),
            tick_step_secs: drive.tick_step_secs,
            auto_scroll: drive.auto_scroll,
        }
    }
}
