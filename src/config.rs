//! Configuration management for the contact book.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file in the working directory is honoured if present.

use crate::book::DEFAULT_WINDOW_DAYS;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default location of the address book file.
pub const DEFAULT_BOOK_PATH: &str = "address_book.json";

/// Configuration for the contact book.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address book file (default: "address_book.json")
    pub book_path: PathBuf,

    /// Days ahead covered by the `birthdays` command (default: 7)
    pub birthday_window_days: u32,

    /// Maximum number of `search` results (default: 5)
    pub max_match_results: usize,

    /// Fuzzy match confidence threshold (0-100, default: 30)
    pub match_confidence_threshold: u8,

    /// Log level (default: "error")
    pub log_level: String,
}

/// The subset of configuration a session needs to answer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub birthday_window_days: u32,
    pub max_match_results: usize,
    pub match_confidence_threshold: u8,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Config::default().session_settings()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CONTACT_BOOK_PATH`: Address book file (default: address_book.json)
    /// - `BIRTHDAY_WINDOW_DAYS`: Window for upcoming birthdays, 0-366 (default: 7)
    /// - `MAX_MATCH_RESULTS`: Max search results, at least 1 (default: 5)
    /// - `MATCH_CONFIDENCE_THRESHOLD`: Min confidence score, 0-100 (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let book_path = match env::var("CONTACT_BOOK_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACT_BOOK_PATH".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_BOOK_PATH),
        };

        let birthday_window_days =
            Self::parse_env_u32("BIRTHDAY_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?;
        if birthday_window_days > 366 {
            return Err(ConfigError::InvalidValue {
                var: "BIRTHDAY_WINDOW_DAYS".to_string(),
                reason: "Must be between 0 and 366".to_string(),
            });
        }

        let max_match_results = Self::parse_env_usize("MAX_MATCH_RESULTS", 5)?;
        if max_match_results == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_MATCH_RESULTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let match_confidence_threshold = Self::parse_env_u8("MATCH_CONFIDENCE_THRESHOLD", 30)?;

        // Validate confidence threshold is 0-100
        if match_confidence_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                var: "MATCH_CONFIDENCE_THRESHOLD".to_string(),
                reason: "Must be between 0 and 100".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            book_path,
            birthday_window_days,
            max_match_results,
            match_confidence_threshold,
            log_level,
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            birthday_window_days: self.birthday_window_days,
            max_match_results: self.max_match_results,
            match_confidence_threshold: self.match_confidence_threshold,
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u8 with a default value.
    fn parse_env_u8(var_name: &str, default: u8) -> ConfigResult<u8> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u8>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-255, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            book_path: PathBuf::from(DEFAULT_BOOK_PATH),
            birthday_window_days: DEFAULT_WINDOW_DAYS,
            max_match_results: 5,
            match_confidence_threshold: 30,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 5] = [
        "CONTACT_BOOK_PATH",
        "BIRTHDAY_WINDOW_DAYS",
        "MAX_MATCH_RESULTS",
        "MATCH_CONFIDENCE_THRESHOLD",
        "LOG_LEVEL",
    ];

    // Sets variables for one test and clears every config variable on drop
    struct EnvGuard;

    impl EnvGuard {
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.book_path, PathBuf::from("address_book.json"));
        assert_eq!(config.birthday_window_days, 7);
        assert_eq!(config.max_match_results, 5);
        assert_eq!(config.match_confidence_threshold, 30);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn test_session_settings_projection() {
        let config = Config {
            birthday_window_days: 14,
            ..Config::default()
        };
        let settings = config.session_settings();
        assert_eq!(settings.birthday_window_days, 14);
        assert_eq!(settings.max_match_results, 5);
        assert_eq!(SessionSettings::default().birthday_window_days, 7);
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACT_BOOK_PATH", "/tmp/contacts.json");
        guard.set("BIRTHDAY_WINDOW_DAYS", "10");
        guard.set("MAX_MATCH_RESULTS", "3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.book_path, PathBuf::from("/tmp/contacts.json"));
        assert_eq!(config.birthday_window_days, 10);
        assert_eq!(config.max_match_results, 3);
        assert_eq!(config.match_confidence_threshold, 30);
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_path() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACT_BOOK_PATH", "   ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CONTACT_BOOK_PATH"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_window_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("BIRTHDAY_WINDOW_DAYS", "400");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "BIRTHDAY_WINDOW_DAYS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_max_results() {
        let mut guard = EnvGuard::new();
        guard.set("MAX_MATCH_RESULTS", "0");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_config_invalid_confidence_threshold() {
        let mut guard = EnvGuard::new();
        guard.set("MATCH_CONFIDENCE_THRESHOLD", "150");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "MATCH_CONFIDENCE_THRESHOLD");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u32() {
        let mut guard = EnvGuard::new();
        guard.set("BIRTHDAY_WINDOW_DAYS", "42");

        assert_eq!(Config::parse_env_u32("BIRTHDAY_WINDOW_DAYS", 7).unwrap(), 42);
        assert_eq!(Config::parse_env_u32("NONEXISTENT_CONTACT_BOOK_VAR", 7).unwrap(), 7);
    }

    #[test]
    #[serial]
    fn test_parse_env_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("BIRTHDAY_WINDOW_DAYS", "not-a-number");

        assert!(Config::parse_env_u32("BIRTHDAY_WINDOW_DAYS", 7).is_err());
    }
}
