//! Resolution results.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::rule::{RuleDirective, Severity};

/// The flattened configuration that applies to one target path.
///
/// Holds no layer indices, so it only depends on what the matching layers
/// say, not on where they sit.
///
/// # Examples
///
/// ```
/// use strata::{resolve, Layer, Severity};
///
/// let layers = vec![Layer::new().with_rule("no-undef", Severity::Error)];
/// let config = resolve(&layers, "src/a.js").unwrap();
/// assert_eq!(config.severity_of("no-undef"), Severity::Error);
/// assert_eq!(config.severity_of("no-console"), Severity::Off);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectiveConfig {
    /// Final directive per rule name.
    pub rules: BTreeMap<String, RuleDirective>,
    /// Final value per setting key.
    pub settings: BTreeMap<String, Value>,
    /// Final value per language option; `globals` and `parserOptions` are
    /// the deep merge of every matching layer's objects.
    pub language_options: BTreeMap<String, Value>,
    /// Plugin namespaces declared by any matching layer.
    pub plugins: BTreeSet<String>,
    /// Set when a global-ignore layer excludes the path.
    pub ignored: bool,
}

impl EffectiveConfig {
    /// An ignored result: nothing applies.
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            ..Self::default()
        }
    }

    /// True when no rules, settings or language options apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.settings.is_empty() && self.language_options.is_empty()
    }

    /// The directive for `rule`, if any layer set one.
    #[must_use]
    pub fn rule(&self, rule: &str) -> Option<&RuleDirective> {
        self.rules.get(rule)
    }

    /// Effective severity for `rule`; unset rules are off.
    #[must_use]
    pub fn severity_of(&self, rule: &str) -> Severity {
        self.rules
            .get(rule)
            .map_or(Severity::Off, RuleDirective::severity)
    }

    /// The value of setting `key`, if any layer set one.
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// The value of language option `key`, if any layer set one.
    #[must_use]
    pub fn language_option(&self, key: &str) -> Option<&Value> {
        self.language_options.get(key)
    }

    /// Rules an execution engine should run: everything not `off`.
    pub fn active_rules(&self) -> impl Iterator<Item = (&str, &RuleDirective)> {
        self.rules
            .iter()
            .filter(|(_, directive)| !directive.is_off())
            .map(|(name, directive)| (name.as_str(), directive))
    }

    /// Copy of this configuration without `off` rules.
    #[must_use]
    pub fn without_disabled(&self) -> Self {
        Self {
            rules: self
                .active_rules()
                .map(|(name, directive)| (name.to_string(), directive.clone()))
                .collect(),
            ..self.clone()
        }
    }
}

/// An [`EffectiveConfig`] together with where each part came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Explanation {
    /// Normalized target path that was resolved.
    pub path: String,
    /// The resolved configuration.
    pub config: EffectiveConfig,
    /// Indices of contributing layers, in declaration order.
    pub matched_layers: Vec<usize>,
    /// Index of the global-ignore layer that excluded the path, if any.
    pub ignored_by: Option<usize>,
    /// Index of the layer that supplied each final rule directive.
    pub rule_origins: BTreeMap<String, usize>,
    /// Index of the layer that supplied each final setting.
    pub setting_origins: BTreeMap<String, usize>,
    /// Index of the last layer that set each language option.
    pub language_option_origins: BTreeMap<String, usize>,
}
