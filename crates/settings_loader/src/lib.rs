//! # Settings Loader
//!
//! Loads the chart service's [`ServiceSettings`] from a JSON file. The file is
//! optional: when it is absent the built-in defaults apply, and any field left
//! out of the file keeps its default too.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use settings_loader;
//!
//! // Load settings from a specific path (the file must exist)
//! let settings = settings_loader::load_settings("config/settings.json")?;
//!
//! // Use settings.json in the given directory when present, defaults otherwise
//! let settings = settings_loader::load_settings_or_default(std::path::Path::new("."))?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The ephemeris data path is intentionally not part of these settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use models::ServiceSettings;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ServiceSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: ServiceSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads `settings.json` from `dir` when it exists, otherwise returns defaults.
///
/// A file that exists but cannot be parsed is an error, not a silent fallback.
pub fn load_settings_or_default(dir: &Path) -> Result<ServiceSettings> {
    let path = dir.join(SETTINGS_FILE_NAME);
    if settings_file_exists(&path) {
        tracing::debug!("Loading settings from {}", path.display());
        load_settings(&path)
    } else {
        tracing::debug!("No settings file at {}; using defaults", path.display());
        Ok(ServiceSettings::default())
    }
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = load_settings_or_default(tmp.path()).unwrap();
        assert_eq!(settings, ServiceSettings::default());
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(SETTINGS_FILE_NAME),
            r#"{ "port": 8080, "service_name": "charts" }"#,
        )
        .unwrap();

        let settings = load_settings_or_default(tmp.path()).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.service_name, "charts");
        assert_eq!(settings.host, "127.0.0.1");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SETTINGS_FILE_NAME), "{ port: ").unwrap();

        let err = load_settings_or_default(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Parsing settings JSON"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_settings(tmp.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Reading settings file"));
    }
}
