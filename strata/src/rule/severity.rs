//! Rule severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// How strongly a rule is enforced.
///
/// Ordered from least to most strict, so `Severity::Off < Severity::Error`.
///
/// # Examples
///
/// ```
/// use strata::Severity;
///
/// assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
/// assert_eq!(Severity::from_level(2).unwrap(), Severity::Error);
/// assert!(!Severity::Off.is_enabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Violations are reported as warnings.
    Warn,
    /// Violations are reported as errors.
    Error,
}

impl Severity {
    /// Parse a severity name (case-insensitive) or its numeric spelling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeverity`] for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "0" => Ok(Self::Off),
            "warn" | "1" => Ok(Self::Warn),
            "error" | "2" => Ok(Self::Error),
            _ => Err(Error::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }

    /// Map a numeric level (0, 1, 2) to a severity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeverity`] for levels above 2.
    pub fn from_level(level: u64) -> Result<Self> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Warn),
            2 => Ok(Self::Error),
            other => Err(Error::InvalidSeverity {
                value: other.to_string(),
            }),
        }
    }

    /// Interpret an untyped value as a severity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeverity`] unless the value is a recognized
    /// string or a non-negative integer level.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => match n.as_u64() {
                Some(level) => Self::from_level(level),
                None => Err(Error::InvalidSeverity {
                    value: n.to_string(),
                }),
            },
            other => Err(Error::InvalidSeverity {
                value: other.to_string(),
            }),
        }
    }

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Whether a rule at this severity should be executed at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}
