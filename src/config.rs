//! Configuration management for voter roll search.
//!
//! This module handles loading and validating configuration from environment variables,
//! with an optional `.env` file.

use crate::error::{ConfigError, ConfigResult};
use crate::matching::MatchOptions;
use std::env;
use std::time::Duration;

/// Default snapshot location, matching the extractor's default output name.
pub const DEFAULT_SNAPSHOT: &str = "voters_data.json";

/// Configuration for voter roll search.
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot location: an http(s) URL or a filesystem path
    pub snapshot: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Maximum number of results per search (default: 100)
    pub max_results: usize,

    /// Fuzzy match threshold, 0.0 exact to 1.0 anything (default: 0.4)
    pub fuzzy_threshold: f64,

    /// Positional distance budget for fuzzy matches (default: 1000)
    pub fuzzy_distance: usize,

    /// Minimum characters a query or field needs to match (default: 2)
    pub min_match_char_length: usize,

    /// Quiet period before a typed query is searched (default: 200ms)
    pub debounce_ms: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `VOTER_SNAPSHOT`: Snapshot URL or path (default: voters_data.json)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_RESULTS`: Max results per search (default: 100)
    /// - `FUZZY_THRESHOLD`: Match threshold between 0 and 1 (default: 0.4)
    /// - `FUZZY_DISTANCE`: Positional distance budget (default: 1000)
    /// - `MIN_MATCH_CHAR_LENGTH`: Minimum match length (default: 2)
    /// - `DEBOUNCE_MS`: Input quiet period in milliseconds (default: 200)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let snapshot = env::var("VOTER_SNAPSHOT").unwrap_or_else(|_| DEFAULT_SNAPSHOT.to_string());
        if snapshot.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "VOTER_SNAPSHOT".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let max_results = Self::parse_env_usize("MAX_RESULTS", 100)?;
        let fuzzy_threshold = Self::parse_env_f64("FUZZY_THRESHOLD", 0.4)?;
        let fuzzy_distance = Self::parse_env_usize("FUZZY_DISTANCE", 1000)?;
        let min_match_char_length = Self::parse_env_usize("MIN_MATCH_CHAR_LENGTH", 2)?;
        let debounce_ms = Self::parse_env_u64("DEBOUNCE_MS", 200)?;

        if !(0.0..=1.0).contains(&fuzzy_threshold) {
            return Err(ConfigError::InvalidValue {
                var: "FUZZY_THRESHOLD".to_string(),
                reason: "Must be between 0 and 1".to_string(),
            });
        }

        if min_match_char_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MIN_MATCH_CHAR_LENGTH".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            snapshot,
            request_timeout,
            max_results,
            fuzzy_threshold,
            fuzzy_distance,
            min_match_char_length,
            debounce_ms,
            log_level,
        })
    }

    /// Matcher options derived from this configuration.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.fuzzy_threshold,
            distance: self.fuzzy_distance,
            min_match_char_length: self.min_match_char_length,
            ..MatchOptions::default()
        }
    }

    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
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

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be a decimal number, got: {}", val),
                }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snapshot: DEFAULT_SNAPSHOT.to_string(),
            request_timeout: 10,
            max_results: 100,
            fuzzy_threshold: 0.4,
            fuzzy_distance: 1000,
            min_match_char_length: 2,
            debounce_ms: 200,
            log_level: "error".to_string(),
        }
    }
}
