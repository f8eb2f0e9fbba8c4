//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Live session settings
    pub drive: DriveSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Route bundle storage
    pub store: StoreSettings,
}

/// Live session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveSettings {
    /// Real milliseconds between two clock ticks
    pub tick_interval_ms: u64,
    /// Simulated seconds added per tick
    pub tick_step_secs: i64,
    /// Initial auto-scroll state of a new session
    pub auto_scroll: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
    /// Log at DEBUG level instead of INFO
    pub debug: bool,
}

/// Route bundle storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Directory searched for bundles given by bare file name
    pub bundle_dir: PathBuf,
}
