//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// Only the value syntax is checked here; ranges are checked by
/// [`ConfigFile::validate`].
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [drive] section
    if let Some(section) = ini.section(Some("drive")) {
        if let Some(v) = section.get("tick_interval_ms") {
            let ms: u64 = v.trim().parse().map_err(|_| invalid(
                "drive",
                "tick_interval_ms",
                v,
                "must be a whole number of milliseconds",
            ))?;
            config.drive.tick_interval_ms = ms;
        }
        if let Some(v) = section.get("tick_step_secs") {
            let step: i64 = v.trim().parse().map_err(|_| invalid(
                "drive",
                "tick_step_secs",
                v,
                "must be a whole number of seconds",
            ))?;
            config.drive.tick_step_secs = step;
        }
        if let Some(v) = section.get("auto_scroll") {
            config.drive.auto_scroll = parse_bool(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("debug") {
            config.logging.debug = parse_bool(v);
        }
    }

    // [store] section
    if let Some(section) = ini.section(Some("store")) {
        if let Some(v) = section.get("bundle_dir") {
            let v = v.trim();
            if !v.is_empty() {
                config.store.bundle_dir = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[drive]
tick_step_secs = 30
"#,
        )
        .unwrap();

        // Specified values
        assert_eq!(config.drive.tick_step_secs, 30);

        // Default values
        assert_eq!(config.drive.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert!(config.drive.auto_scroll);
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[drive]
tick_interval_ms = 200
tick_step_secs = 5
auto_scroll = no

[logging]
file = /var/log/ebula.log
debug = on

[store]
bundle_dir = /srv/routes
"#,
        )
        .unwrap();

        assert_eq!(config.drive.tick_interval_ms, 200);
        assert_eq!(config.drive.tick_step_secs, 5);
        assert!(!config.drive.auto_scroll);
        assert_eq!(config.logging.file, PathBuf::from("/var/log/ebula.log"));
        assert!(config.logging.debug);
        assert_eq!(config.store.bundle_dir, PathBuf::from("/srv/routes"));
    }

    #[test]
    fn test_tick_interval_too_short() {
        let err = load("[drive]\ntick_interval_ms = 5\n").unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));
        assert!(err.to_string().contains("at least 10"));
    }

    #[test]
    fn test_tick_interval_not_a_number() {
        let err = load("[drive]\ntick_interval_ms = fast\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
    }

    #[test]
    fn test_tick_step_out_of_range() {
        assert!(load("[drive]\ntick_step_secs = 0\n").is_err());
        assert!(load("[drive]\ntick_step_secs = 3601\n").is_err());
        assert!(load("[drive]\ntick_step_secs = 3600\n").is_ok());
    }

    #[test]
    fn test_empty_paths_keep_defaults() {
        let config = load("[logging]\nfile =\n\n[store]\nbundle_dir =\n").unwrap();
        let default = ConfigFile::default();
        assert_eq!(config.logging.file, default.logging.file);
        assert_eq!(config.store.bundle_dir, default.store.bundle_dir);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        // Non-tilde paths should be unchanged
        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_parse_bool_true_values() {
        for v in ["true", "TRUE", "1", "yes", "on", " On "] {
            assert!(parse_bool(v), "{v} should be true");
        }
    }

    #[test]
    fn test_parse_bool_false_values() {
        for v in ["false", "0", "no", "off", "", "maybe"] {
            assert!(!parse_bool(v), "{v} should be false");
        }
    }
}
