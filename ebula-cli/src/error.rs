//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use ebula::config::ConfigFileError;
use ebula::live::LiveError;
use ebula::store::BundleError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Route bundle could not be read
    Bundle { path: PathBuf, error: BundleError },
    /// The requested trip is not in the bundle
    TripNotFound {
        requested: String,
        available: Vec<String>,
    },
    /// The clock argument is not a time of day
    InvalidTime(String),
    /// The tracking session rejected an operation
    Session(LiveError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Bundle {
                error: BundleError::Io { .. },
                ..
            } => {
                eprintln!();
                eprintln!("Bundles given by bare file name are looked up in the");
                eprintln!("bundle_dir of the [store] section. Check it with:");
                eprintln!("  ebula config show");
            }
            CliError::TripNotFound { available, .. } => {
                eprintln!();
                if available.is_empty() {
                    eprintln!("The bundle has no trips; omit --trip to use a time-based trip.");
                } else {
                    eprintln!("Trips in this bundle (use the name or the number):");
                    for (i, name) in available.iter().enumerate() {
                        eprintln!("  {}. {}", i + 1, name);
                    }
                }
            }
            CliError::InvalidTime(_) => {
                eprintln!();
                eprintln!("Times are given as HH:MM or HH:MM:SS, e.g. --time 08:15");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Bundle { path, error } => {
                write!(f, "Failed to load bundle '{}': {}", path.display(), error)
            }
            CliError::TripNotFound { requested, .. } => {
                write!(f, "Trip '{}' not found in bundle", requested)
            }
            CliError::InvalidTime(value) => write!(f, "Invalid time '{}'", value),
            CliError::Session(e) => write!(f, "Tracking session error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Bundle { error, .. } => Some(error),
            CliError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LiveError> for CliError {
    fn from(e: LiveError) -> Self {
        CliError::Session(e)
    }
}
