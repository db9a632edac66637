//! Configuration layers.
//!
//! A [`Layer`] is one entry of a layered rule configuration: a file scope
//! (glob patterns), opaque settings and language options, rule directives,
//! and the plugin namespaces it declares. Layers are immutable once loaded; matching is done
//! through the compiled form in [`matcher`].

pub mod matcher;
pub mod overlap;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rule::RuleDirective;

pub use matcher::CompiledLayer;

/// One configuration layer.
///
/// # Examples
///
/// ```
/// use strata::{Layer, RuleDirective, Severity};
///
/// let layer = Layer::new()
///     .with_patterns(["src/**/*.js"])
///     .with_rule("no-undef", RuleDirective::Flag(Severity::Error));
/// assert!(!layer.is_unscoped());
/// assert_eq!(layer.rules.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    /// Label used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Path globs this layer applies to; empty means every file.
    #[serde(default, alias = "files", skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,

    /// Path globs excluded from this layer. A layer holding nothing but
    /// ignores excludes matching paths from resolution entirely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    /// Opaque settings, merged key by key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, Value>,

    /// Parser and environment options (`parser`, `ecmaVersion`,
    /// `sourceType`, `globals`, `parserOptions`, ...). Merged key by key,
    /// except that `globals` and `parserOptions` objects are merged deeply.
    #[serde(
        default,
        rename = "languageOptions",
        alias = "language_options",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub language_options: BTreeMap<String, Value>,

    /// Rule directives, merged by whole-value replacement.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleDirective>,

    /// Plugin namespaces this layer makes available.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub plugins: BTreeSet<String>,
}

impl Layer {
    /// An empty, unscoped layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagnostic label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add file patterns.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add ignore patterns.
    #[must_use]
    pub fn with_ignores<I, S>(mut self, ignores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(ignores.into_iter().map(Into::into));
        self
    }

    /// Set one setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Set one language option.
    #[must_use]
    pub fn with_language_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.language_options.insert(key.into(), value);
        self
    }

    /// Set one rule directive.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, directive: impl Into<RuleDirective>) -> Self {
        self.rules.insert(name.into(), directive.into());
        self
    }

    /// Declare a plugin namespace.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.insert(plugin.into());
        self
    }

    /// Whether this layer applies to every file (no patterns).
    #[must_use]
    pub fn is_unscoped(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether this layer only lists ignores, which makes it a global ignore.
    ///
    /// `name` does not count; it never changes what a layer does.
    #[must_use]
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty()
            && self.patterns.is_empty()
            && self.settings.is_empty()
            && self.language_options.is_empty()
            && self.rules.is_empty()
            && self.plugins.is_empty()
    }

    /// Label for messages: the name if set, otherwise `#index`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("{name} (#{index})"),
            None => format!("#{index}"),
        }
    }
}
