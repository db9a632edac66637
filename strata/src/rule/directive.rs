//! Rule directives: a severity plus optional rule-specific options.
//!
//! Options are opaque to the resolver. Plugins define what they mean, so
//! they are kept as untyped JSON values and carried through unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::Severity;
use crate::error::{Error, Result};

/// The setting for one rule in one layer.
///
/// Written either as a bare severity (`"error"`, `2`) or as a list whose
/// first element is the severity and whose remaining elements are options
/// (`["warn", { "argsIgnorePattern": "^_" }]`). A one-element list is the
/// same as the bare severity.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::{RuleDirective, Severity};
///
/// let plain = RuleDirective::from_value(&json!("error")).unwrap();
/// assert_eq!(plain, RuleDirective::Flag(Severity::Error));
///
/// let configured = RuleDirective::from_value(&json!(["warn", { "count": 1 }])).unwrap();
/// assert_eq!(configured.severity(), Severity::Warn);
/// assert_eq!(configured.options().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDirective {
    /// Severity only.
    Flag(Severity),
    /// Severity with rule-specific options.
    Configured {
        /// Enforcement level.
        severity: Severity,
        /// Opaque options, in the order written.
        options: Vec<Value>,
    },
}

impl RuleDirective {
    /// Build a directive, collapsing empty options to [`RuleDirective::Flag`].
    #[must_use]
    pub fn new(severity: Severity, options: Vec<Value>) -> Self {
        if options.is_empty() {
            Self::Flag(severity)
        } else {
            Self::Configured { severity, options }
        }
    }

    /// Interpret an untyped value as a directive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDirective`] for empty lists or values that are
    /// neither a severity nor a list, and [`Error::InvalidSeverity`] when the
    /// severity itself is unrecognized.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let (first, rest) = items.split_first().ok_or_else(|| Error::InvalidDirective {
                    reason: "directive list must start with a severity".to_string(),
                })?;
                Ok(Self::new(Severity::from_value(first)?, rest.to_vec()))
            }
            Value::String(_) | Value::Number(_) => Ok(Self::Flag(Severity::from_value(value)?)),
            other => Err(Error::InvalidDirective {
                reason: format!("expected a severity or a list, found {other}"),
            }),
        }
    }

    /// The enforcement level.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Flag(severity) | Self::Configured { severity, .. } => *severity,
        }
    }

    /// Rule options (empty for [`RuleDirective::Flag`]).
    #[must_use]
    pub fn options(&self) -> &[Value] {
        match self {
            Self::Flag(_) => &[],
            Self::Configured { options, .. } => options,
        }
    }

    /// Whether this directive disables the rule.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        !self.severity().is_enabled()
    }

    /// The value form used when writing documents back out.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Flag(severity) => Value::String(severity.as_str().to_string()),
            Self::Configured { severity, options } => {
                let mut items = Vec::with_capacity(options.len() + 1);
                items.push(Value::String(severity.as_str().to_string()));
                items.extend(options.iter().cloned());
                Value::Array(items)
            }
        }
    }
}

impl From<Severity> for RuleDirective {
    fn from(severity: Severity) -> Self {
        Self::Flag(severity)
    }
}

impl fmt::Display for RuleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(severity) => write!(f, "{severity}"),
            Self::Configured { .. } => write!(f, "{}", self.to_value()),
        }
    }
}

impl Serialize for RuleDirective {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RuleDirective {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}
