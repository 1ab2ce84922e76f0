//! # Settings Loader
//!
//! Loads the `settings.json` that tunes the comparison model: scoring weights
//! and caps, the PM2.5 dose-response coefficients and risk tiers, the cost
//! heuristic and the narrative thresholds. Every section is optional and
//! falls back to the built-in defaults, so `{}` is a valid file.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/settings.json")?;
//!
//! // Load optional settings (returns None if no path is given)
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_optional_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from the default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Resolves settings the way the service does.
///
/// An explicit path must load. Without one, `settings.json` in the working
/// directory is used when present; `Ok(None)` means no file exists there.
/// A default file that exists but does not parse is still an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    if let Some(settings_path) = path {
        return load_settings(settings_path).map(Some);
    }

    if !settings_file_exists(DEFAULT_SETTINGS_FILE) {
        warn!(
            "no {} in the working directory, using built-in settings",
            DEFAULT_SETTINGS_FILE
        );
        return Ok(None);
    }
    load_default_settings().map(Some)
}

/// Explicit path must load; with no path the built-in defaults apply
pub fn load_settings_or_default(path: Option<&PathBuf>) -> Result<Settings> {
    Ok(load_optional_settings(path)?.unwrap_or_default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_settings() {
        let file = write_temp(r#"{"health": {"pm25_life_coefficient": 0.1}}"#);
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.health.pm25_life_coefficient, 0.1);
        assert_eq!(settings.health.aqi_fallback_coefficient, 0.1);
        assert_eq!(settings.scoring.baseline, 50.0);
    }

    #[test]
    fn test_malformed_settings_name_the_file() {
        let file = write_temp("[1, 2");
        let err = load_settings(file.path()).unwrap_err();
        assert!(format!("{err}").contains("Parsing settings JSON"));
    }

    #[test]
    fn test_optional_settings() {
        assert!(load_optional_settings(None).unwrap().is_none());
        let missing = PathBuf::from("no/such/settings.json");
        assert!(load_optional_settings(Some(&missing)).is_err());
        assert!(load_settings_or_default(Some(&missing)).is_err());
        assert_eq!(load_settings_or_default(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_fallback_rejects_bad_explicit_path() {
        let file = write_temp(r#"{"scoring": {"baseline": "forty"}}"#);
        let path = file.path().to_path_buf();
        let err = load_settings_with_fallback(Some(&path)).unwrap_err();
        assert!(format!("{err}").contains("Parsing settings JSON"));

        let missing = PathBuf::from("no/such/settings.json");
        assert!(load_settings_with_fallback(Some(&missing)).is_err());
    }

    #[test]
    fn test_fallback_loads_explicit_path() {
        let file = write_temp(r#"{"cost": {"annual_cost_multiplier": 12.0}}"#);
        let path = file.path().to_path_buf();
        let settings = load_settings_with_fallback(Some(&path)).unwrap().unwrap();
        assert_eq!(settings.cost.annual_cost_multiplier, 12.0);
    }

    #[test]
    fn test_repository_settings_match_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../settings.json");
        assert!(settings_file_exists(&path));
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.cities_file.as_deref(), Some("data/cities.json"));
        assert_eq!(settings.scoring, models::ScoringWeights::default());
        assert_eq!(settings.health, models::HealthModel::default());
        assert_eq!(settings.analysis, models::AnalysisThresholds::default());
    }
}
