//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and bundle lookup
//! to reduce duplication across command handlers.

use std::path::{Path, PathBuf};

use tracing::info;

use ebula::config::ConfigFile;
use ebula::live::ControllerConfig;
use ebula::logging::{init_logging, split_log_path, LoggingGuard};
use ebula::store::RouteBundle;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// Command output goes to stdout, so log lines only go there when
    /// `verbose` is set. `debug` forces DEBUG level on top of the config.
    pub fn new(verbose: bool, debug: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(
            &log_dir,
            &log_file,
            verbose,
            debug || config.logging.debug,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Controller settings from the `[drive]` section.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::from(&self.config.drive)
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("ebula v{}", ebula::VERSION);
        info!("ebula CLI: {} command", command);
    }

    /// Read a bundle, looking bare file names up in the bundle directory.
    pub fn load_bundle(&self, path: &Path) -> Result<RouteBundle, CliError> {
        let path = resolve_bundle_path(path, &self.config.store.bundle_dir);
        let bundle = RouteBundle::load(&path).map_err(|error| CliError::Bundle {
            path: path.clone(),
            error,
        })?;

        info!(
            path = %path.display(),
            route = %bundle.route.name,
            track_objects = bundle.track_objects.len(),
            timetable_entries = bundle.timetable_entries.len(),
            trips = bundle.trips.len(),
            "Bundle loaded"
        );
        Ok(bundle)
    }
}

/// The path as given if it exists, otherwise the same relative path inside
/// `bundle_dir` if that exists.
pub fn resolve_bundle_path(path: &Path, bundle_dir: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }
    let in_store = bundle_dir.join(path);
    if in_store.exists() {
        in_store
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_existing_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("route.json");
        std::fs::write(&file, "{}").unwrap();

        assert_eq!(resolve_bundle_path(&file, Path::new("/nowhere")), file);
    }

    #[test]
    fn test_resolve_falls_back_to_bundle_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("riesa.json"), "{}").unwrap();

        assert_eq!(
            resolve_bundle_path(Path::new("riesa.json"), temp.path()),
            temp.path().join("riesa.json")
        );
    }

    #[test]
    fn test_resolve_keeps_missing_path() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            resolve_bundle_path(Path::new("missing.json"), temp.path()),
            PathBuf::from("missing.json")
        );
    }
}
