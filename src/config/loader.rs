//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pay
//! policy and holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidayCalendar, HolidayYear, PayPolicy};

/// Loads and provides access to pay configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kr/
/// ├── policy.yaml       # Night multiplier, weekly allowance, tax truncation
/// └── holidays/
///     ├── 2025.yaml     # Public holidays for one year
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kr").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// println!("{:?}", loader.holidays().name_for(date));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: PayPolicy,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `policy.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayPolicy>(&path.join("policy.yaml"))?;
        let years = Self::load_holiday_years(&path.join("holidays"))?;
        let holidays = HolidayCalendar::new(years);

        info!(
            path = %path.display(),
            holidays = holidays.len(),
            "Loaded pay configuration"
        );

        Ok(Self { policy, holidays })
    }

    /// The statutory policy with an empty holiday calendar.
    ///
    /// ```
    /// use payroll_engine::config::{ConfigLoader, PayPolicy};
    ///
    /// let loader = ConfigLoader::statutory();
    /// assert_eq!(loader.policy(), &PayPolicy::default());
    /// assert!(loader.holidays().is_empty());
    /// ```
    pub fn statutory() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file in the holidays directory, in file name order.
    fn load_holiday_years(dir: &Path) -> EngineResult<Vec<HolidayYear>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| Self::load_yaml::<HolidayYear>(path))
            .collect()
    }

    /// Returns the pay policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config_path() -> &'static str {
        "./config/kr"
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &PayPolicy::default());
        assert!(!loader.holidays().is_empty());
    }

    #[test]
    fn test_bundled_holidays_cover_both_years() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.holidays();

        assert_eq!(holidays.name_for(make_date("2025-10-09")), Some("한글날"));
        assert_eq!(holidays.name_for(make_date("2026-03-01")), Some("삼일절"));
        assert_eq!(holidays.name_for(make_date("2026-03-02")), Some("대체공휴일"));
        assert!(!holidays.is_holiday(make_date("2026-03-03")));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_statutory_matches_bundled_policy() {
        let loaded = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(ConfigLoader::statutory().policy(), loaded.policy());
    }
}
