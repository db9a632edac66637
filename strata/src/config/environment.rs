//! Environment variable handling for configuration overrides.
//!
//! This module reads the `STRATA_*` variables that override document
//! discovery and resolver options.

use crate::config::schema::ResolverOptions;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides `resolver.memoize`.
pub const MEMOIZE_ENV: &str = "STRATA_MEMOIZE";

/// Explicit layer document, replacing project discovery.
pub const CONFIG_ENV: &str = "STRATA_CONFIG";

/// Directory holding the user-level `layers.yaml`.
pub const DATA_DIR_ENV: &str = "STRATA_DATA_DIR";

/// Skip the user-level layers when set to a true value.
pub const NO_USER_CONFIG_ENV: &str = "STRATA_NO_USER_CONFIG";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use strata::config::{EnvironmentConfig, ResolverOptions};
///
/// let mut options = ResolverOptions::default();
/// EnvironmentConfig::apply_overrides(&mut options).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to resolver options.
    ///
    /// # Errors
    ///
    /// Returns an error if `STRATA_MEMOIZE` is not a recognizable boolean.
    pub fn apply_overrides(options: &mut ResolverOptions) -> Result<()> {
        if let Some(val) = Self::non_empty(MEMOIZE_ENV) {
            options.memoize = Some(Self::parse_bool(MEMOIZE_ENV, &val)?);
        }
        Ok(())
    }

    /// Explicit layer document from `STRATA_CONFIG`.
    #[must_use]
    pub fn config_file() -> Option<PathBuf> {
        Self::non_empty(CONFIG_ENV).map(PathBuf::from)
    }

    /// Data directory from `STRATA_DATA_DIR`.
    #[must_use]
    pub fn data_dir() -> Option<PathBuf> {
        Self::non_empty(DATA_DIR_ENV).map(PathBuf::from)
    }

    /// Whether `STRATA_NO_USER_CONFIG` asks to skip user layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognizable boolean.
    pub fn skip_user_config() -> Result<bool> {
        Self::non_empty(NO_USER_CONFIG_ENV)
            .map_or(Ok(false), |val| Self::parse_bool(NO_USER_CONFIG_ENV, &val))
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming `field` for anything else.
    pub fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|val| !val.trim().is_empty())
    }
}
