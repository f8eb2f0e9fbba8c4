//! User configuration.
//!
//! Settings are read from `~/.ebula/config.ini`, one `[section]` per
//! concern:
//!
//! ```ini
//! [drive]
//! tick_interval_ms = 1000
//! tick_step_secs = 1
//! auto_scroll = true
//!
//! [logging]
//! file = ~/.ebula/ebula.log
//! debug = false
//!
//! [store]
//! bundle_dir = ~/.ebula/routes
//! ```
//!
//! Missing keys keep their defaults. The `[drive]` section converts into a
//! [`ControllerConfig`](crate::live::ControllerConfig):
//!
//! ```
//! use ebula::config::ConfigFile;
//! use ebula::live::ControllerConfig;
//!
//! let config = ConfigFile::default();
//! let controller = ControllerConfig::from(&config.drive);
//! assert_eq!(controller.tick_step_secs, 1);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_BUNDLE_DIR_NAME, DEFAULT_LOG_FILE_NAME, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TICK_STEP_SECS, MAX_TICK_STEP_SECS, MIN_TICK_INTERVAL_MS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DriveSettings, LoggingSettings, StoreSettings};
