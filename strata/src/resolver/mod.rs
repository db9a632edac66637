//! Layer resolution.
//!
//! Resolution walks the layers in declaration order and, for every layer
//! that applies to the target path, overlays its settings and rules onto the
//! accumulated result. Later layers win; language options follow settings,
//! except that `globals` and `parserOptions` objects merge deeply. A rule directive is always replaced
//! as a whole, never merged with the earlier one, so a later `off` disables
//! the rule outright regardless of options set before.
//!
//! Resolution is a pure function of `(layers, path)`. A [`Resolver`] compiles
//! the layers once and may memoize results per normalized path.
//!
//! ```
//! use strata::{resolve, Layer, Severity};
//!
//! let layers = vec![
//!     Layer::new().with_patterns(["*"]).with_rule("no-unused-vars", Severity::Warn),
//!     Layer::new().with_patterns(["*"]).with_rule("no-unused-vars", Severity::Off),
//! ];
//! let config = resolve(&layers, "x.js").unwrap();
//! assert_eq!(config.rules["no-unused-vars"].severity(), Severity::Off);
//! ```

mod effective;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::collections::BTreeMap;

use dashmap::DashMap;
use serde_json::Value;

use crate::conflicts::{self, ConflictReport};
use crate::error::Result;
use crate::layer::matcher::{compile_layers, CompiledLayer};
use crate::layer::Layer;
use crate::path::normalize_target;

pub use effective::{EffectiveConfig, Explanation};

/// Resolve the effective configuration of `path` against `layers`.
///
/// Every layer's patterns are compiled first, so a malformed pattern fails
/// the call even when its layer would not have matched.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPattern`] for a malformed layer pattern and
/// [`crate::Error::InvalidPath`] for an empty or escaping path. No partial
/// result is returned.
pub fn resolve(layers: &[Layer], path: &str) -> Result<EffectiveConfig> {
    Resolver::new(layers.iter().cloned())?.resolve(path)
}

/// Compiled, immutable layer sequence answering resolution queries.
///
/// `Resolver` is `Send + Sync`; share it behind an `Arc` to resolve from
/// several threads at once.
///
/// # Examples
///
/// ```
/// use strata::{Layer, Resolver, Severity};
///
/// let resolver = Resolver::new(vec![
///     Layer::new().with_patterns(["src/**"]).with_rule("no-undef", Severity::Error),
///     Layer::new().with_patterns(["test/**"]).with_rule("no-undef", Severity::Off),
/// ])
/// .unwrap()
/// .with_memoization();
///
/// assert_eq!(resolver.resolve("src/a.js").unwrap().severity_of("no-undef"), Severity::Error);
/// assert_eq!(resolver.matching_layers("test/a.js").unwrap(), vec![1]);
/// assert_eq!(resolver.cached_entries(), 1);
/// ```
#[derive(Debug)]
pub struct Resolver {
    layers: Vec<CompiledLayer>,
    cache: Option<DashMap<String, EffectiveConfig>>,
}

impl Resolver {
    /// Compile `layers` (in declaration order).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] for the first malformed pattern.
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        let layers = compile_layers(layers)?;
        log::debug!("compiled {} configuration layer(s)", layers.len());
        Ok(Self {
            layers,
            cache: None,
        })
    }

    /// Remember results per normalized path for the life of the resolver.
    #[must_use]
    pub fn with_memoization(mut self) -> Self {
        self.cache.get_or_insert_with(DashMap::new);
        self
    }

    /// Whether results are memoized.
    #[must_use]
    pub const fn is_memoized(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of memoized paths (zero when memoization is off).
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, DashMap::len)
    }

    /// The compiled layers, in declaration order.
    #[must_use]
    pub fn layers(&self) -> &[CompiledLayer] {
        &self.layers
    }

    /// Resolve the effective configuration for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPath`] if `path` cannot be normalized.
    pub fn resolve(&self, path: &str) -> Result<EffectiveConfig> {
        let target = normalize_target(path)?;

        let Some(cache) = &self.cache else {
            return Ok(accumulate(&self.layers, target).config);
        };

        if let Some(hit) = cache.get(&target) {
            return Ok(hit.value().clone());
        }

        let config = accumulate(&self.layers, target.clone()).config;
        cache.insert(target, config.clone());
        Ok(config)
    }

    /// Resolve `path` and report which layers contributed what.
    ///
    /// Never served from the memo cache.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPath`] if `path` cannot be normalized.
    pub fn explain(&self, path: &str) -> Result<Explanation> {
        Ok(accumulate(&self.layers, normalize_target(path)?))
    }

    /// Indices of the layers that apply to `path`.
    ///
    /// Empty when a global ignore excludes the path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPath`] if `path` cannot be normalized.
    pub fn matching_layers(&self, path: &str) -> Result<Vec<usize>> {
        Ok(self.explain(path)?.matched_layers)
    }

    /// Conflicting severities between layers whose patterns overlap.
    ///
    /// See [`conflicts::diagnose_conflicts`].
    #[must_use]
    pub fn diagnose_conflicts(&self) -> Vec<ConflictReport> {
        let layers: Vec<&Layer> = self.layers.iter().map(CompiledLayer::layer).collect();
        conflicts::diagnose_layer_refs(&layers)
    }

    /// Conflicting severities between layers that both apply to at least one
    /// of `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPath`] if any of `paths` cannot be
    /// normalized.
    pub fn diagnose_conflicts_for<S>(&self, paths: &[S]) -> Result<Vec<ConflictReport>>
    where
        S: AsRef<str>,
    {
        let targets = paths
            .iter()
            .map(|path| normalize_target(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(conflicts::diagnose_on_paths(&self.layers, &targets))
    }
}

fn accumulate(layers: &[CompiledLayer], target: String) -> Explanation {
    if let Some(ignoring) = layers.iter().find(|layer| layer.ignores_globally(&target)) {
        log::debug!(
            "{target} is excluded by global ignore layer {}",
            ignoring.layer().label(ignoring.index())
        );
        return Explanation {
            path: target,
            config: EffectiveConfig::ignored(),
            ignored_by: Some(ignoring.index()),
            ..Explanation::default()
        };
    }

    let mut config = EffectiveConfig::default();
    let mut matched_layers = Vec::new();
    let mut rule_origins = BTreeMap::new();
    let mut setting_origins = BTreeMap::new();
    let mut language_option_origins = BTreeMap::new();

    for compiled in layers.iter().filter(|layer| layer.applies_to(&target)) {
        let index = compiled.index();
        let layer = compiled.layer();
        matched_layers.push(index);

        for (key, value) in &layer.settings {
            config.settings.insert(key.clone(), value.clone());
            setting_origins.insert(key.clone(), index);
        }

        for (key, value) in &layer.language_options {
            merge_language_option(&mut config.language_options, key, value);
            language_option_origins.insert(key.clone(), index);
        }

        for (name, directive) in &layer.rules {
            if let Some(previous) = config.rules.insert(name.clone(), directive.clone()) {
                if previous != *directive {
                    log::debug!(
                        "{target}: layer {} replaces {name} ({previous} -> {directive})",
                        layer.label(index)
                    );
                }
            }
            rule_origins.insert(name.clone(), index);
        }

        config.plugins.extend(layer.plugins.iter().cloned());
    }

    if matched_layers.is_empty() {
        log::debug!("no layer applies to {target}; no rules are in effect");
    }

    Explanation {
        path: target,
        config,
        matched_layers,
        ignored_by: None,
        rule_origins,
        setting_origins,
        language_option_origins,
    }
}

/// Language options whose object values merge with earlier layers.
const DEEP_MERGED_OPTIONS: [&str; 2] = ["globals", "parserOptions"];

fn merge_language_option(options: &mut BTreeMap<String, Value>, key: &str, value: &Value) {
    if DEEP_MERGED_OPTIONS.contains(&key) {
        if let Some(existing) = options.get_mut(key) {
            merge_values(existing, value);
            return;
        }
    }
    options.insert(key.to_string(), value.clone());
}

/// Overlay `incoming` onto `base`: objects merge per key, anything else is
/// replaced.
fn merge_values(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match base.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, incoming) => *base = incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rule::{RuleDirective, Severity};
    use serde_json::json;

    fn layer(patterns: &[&str]) -> Layer {
        Layer::new().with_patterns(patterns.iter().copied())
    }

    #[test]
    fn test_empty_layer_sequence_yields_empty_config() {
        let config = resolve(&[], "anything/at/all.js").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.settings.is_empty());
        assert!(!config.ignored);
    }

    #[test]
    fn test_later_off_overrides_earlier_warn() {
        let layers = vec![
            layer(&["*"]).with_rule("R", Severity::Warn),
            layer(&["*"]).with_rule("R", Severity::Off),
        ];
        let config = resolve(&layers, "x.js").unwrap();
        assert_eq!(config.rules["R"].severity(), Severity::Off);
    }

    #[test]
    fn test_off_discards_earlier_options() {
        let layers = vec![
            Layer::new().with_rule(
                "import/order",
                RuleDirective::new(Severity::Error, vec![json!({ "alphabetize": { "order": "asc" } })]),
            ),
            Layer::new().with_rule("import/order", Severity::Off),
        ];
        let config = resolve(&layers, "a.js").unwrap();
        assert_eq!(config.rules["import/order"], RuleDirective::Flag(Severity::Off));
        assert!(config.rules["import/order"].options().is_empty());
        assert_eq!(config.active_rules().count(), 0);
    }

    #[test]
    fn test_directive_replacement_is_whole_value() {
        let layers = vec![
            Layer::new().with_rule(
                "unused-imports/no-unused-vars",
                RuleDirective::new(Severity::Warn, vec![json!({ "vars": "all", "args": "after-used" })]),
            ),
            Layer::new().with_rule(
                "unused-imports/no-unused-vars",
                RuleDirective::new(Severity::Error, vec![json!({ "vars": "local" })]),
            ),
        ];
        let config = resolve(&layers, "a.js").unwrap();
        let directive = &config.rules["unused-imports/no-unused-vars"];
        assert_eq!(directive.severity(), Severity::Error);
        assert_eq!(directive.options(), &[json!({ "vars": "local" })]);
    }

    #[test]
    fn test_disjoint_scopes() {
        let layers = vec![
            layer(&["src/**"])
                .with_rule("a-rule", Severity::Error)
                .with_setting("env", json!("src")),
            layer(&["test/**"])
                .with_rule("b-rule", Severity::Warn)
                .with_setting("env", json!("test")),
        ];

        let src = resolve(&layers, "src/a.js").unwrap();
        assert_eq!(src.rules.keys().collect::<Vec<_>>(), vec!["a-rule"]);
        assert_eq!(src.settings["env"], json!("src"));

        let test = resolve(&layers, "test/a.js").unwrap();
        assert_eq!(test.rules.keys().collect::<Vec<_>>(), vec!["b-rule"]);
        assert_eq!(test.settings["env"], json!("test"));
    }

    #[test]
    fn test_no_matching_layer_is_not_an_error() {
        let layers = vec![layer(&["src/**"]).with_rule("no-undef", Severity::Error)];
        let config = resolve(&layers, "docs/readme.md").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_settings_replace_per_key() {
        let layers = vec![
            Layer::new()
                .with_setting("react", json!({ "version": "detect" }))
                .with_setting("import/resolver", json!({ "node": true })),
            Layer::new().with_setting("import/resolver", json!({ "typescript": { "project": "./tsconfig.json" } })),
        ];
        let config = resolve(&layers, "a.jsx").unwrap();
        assert_eq!(config.settings["react"], json!({ "version": "detect" }));
        assert_eq!(
            config.settings["import/resolver"],
            json!({ "typescript": { "project": "./tsconfig.json" } })
        );
    }

    #[test]
    fn test_language_options_merge_globals_deeply() {
        let layers = vec![
            Layer::new()
                .with_language_option("ecmaVersion", json!(2020))
                .with_language_option("globals", json!({ "process": "readonly", "window": "off" })),
            layer(&["**/*.test.js"])
                .with_language_option("ecmaVersion", json!("latest"))
                .with_language_option("globals", json!({ "describe": "readonly", "window": "readonly" })),
        ];

        let config = resolve(&layers, "src/a.test.js").unwrap();
        assert_eq!(config.language_option("ecmaVersion"), Some(&json!("latest")));
        assert_eq!(
            config.language_options["globals"],
            json!({ "process": "readonly", "window": "readonly", "describe": "readonly" })
        );

        let plain = resolve(&layers, "src/a.js").unwrap();
        assert_eq!(
            plain.language_options["globals"],
            json!({ "process": "readonly", "window": "off" })
        );
    }

    #[test]
    fn test_parser_options_merge_nested_objects() {
        let layers = vec![
            Layer::new()
                .with_language_option("parser", json!("espree"))
                .with_language_option("parserOptions", json!({ "ecmaFeatures": { "jsx": true } })),
            layer(&["src/**"])
                .with_language_option("parser", json!("@babel/eslint-parser"))
                .with_language_option(
                    "parserOptions",
                    json!({ "ecmaFeatures": { "globalReturn": false }, "requireConfigFile": false }),
                ),
        ];
        let config = resolve(&layers, "src/app.jsx").unwrap();
        assert_eq!(config.language_options["parser"], json!("@babel/eslint-parser"));
        assert_eq!(
            config.language_options["parserOptions"],
            json!({
                "ecmaFeatures": { "jsx": true, "globalReturn": false },
                "requireConfigFile": false
            })
        );
    }

    #[test]
    fn test_other_language_options_replace_whole() {
        let layers = vec![
            Layer::new().with_language_option("env", json!({ "node": true })),
            Layer::new().with_language_option("env", json!({ "browser": true })),
            Layer::new().with_language_option("globals", json!(["node"])),
            Layer::new().with_language_option("globals", json!({ "jest": true })),
        ];
        let config = resolve(&layers, "a.js").unwrap();
        assert_eq!(config.language_options["env"], json!({ "browser": true }));
        assert_eq!(config.language_options["globals"], json!({ "jest": true }));
    }

    #[test]
    fn test_plugins_accumulate() {
        let layers = vec![
            Layer::new().with_plugin("import"),
            layer(&["**/*.ts"]).with_plugin("@typescript-eslint"),
        ];
        let config = resolve(&layers, "src/a.ts").unwrap();
        assert_eq!(config.plugins.len(), 2);
        let js = resolve(&layers, "src/a.js").unwrap();
        assert_eq!(js.plugins.len(), 1);
    }

    #[test]
    fn test_malformed_pattern_fails_even_if_unrelated() {
        let layers = vec![
            layer(&["src/**"]).with_rule("no-undef", Severity::Error),
            layer(&["test/[unbalanced"]).with_rule("no-undef", Severity::Off),
        ];
        let err = resolve(&layers, "src/a.js").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { layer: 1, .. }));
    }

    #[test]
    fn test_invalid_paths() {
        let layers = vec![Layer::new().with_rule("no-undef", Severity::Error)];
        assert!(resolve(&layers, "").unwrap_err().is_invalid_path());
        assert!(resolve(&layers, "../x.js").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_equivalent_spellings_resolve_identically() {
        let layers = vec![layer(&["src/**/*.js"]).with_rule("no-undef", Severity::Error)];
        let a = resolve(&layers, "src/lib/a.js").unwrap();
        let b = resolve(&layers, "./src/tmp/../lib/a.js").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.severity_of("no-undef"), Severity::Error);
    }

    #[test]
    fn test_global_ignore_short_circuits() {
        let layers = vec![
            Layer::new().with_rule("no-undef", Severity::Error),
            Layer::new().with_ignores(["dist/**"]),
        ];
        let ignored = resolve(&layers, "dist/app.js").unwrap();
        assert!(ignored.ignored);
        assert!(ignored.rules.is_empty());

        let kept = resolve(&layers, "src/app.js").unwrap();
        assert!(!kept.ignored);
        assert_eq!(kept.severity_of("no-undef"), Severity::Error);
    }

    #[test]
    fn test_explain_tracks_origins() {
        let resolver = Resolver::new(vec![
            Layer::new()
                .with_rule("no-undef", Severity::Error)
                .with_rule("no-self-compare", Severity::Warn),
            layer(&["src/**"]).with_rule("no-undef", Severity::Warn),
            layer(&["test/**"]).with_rule("no-self-compare", Severity::Off),
        ])
        .unwrap();

        let explanation = resolver.explain("src/a.js").unwrap();
        assert_eq!(explanation.path, "src/a.js");
        assert_eq!(explanation.matched_layers, vec![0, 1]);
        assert_eq!(explanation.rule_origins["no-undef"], 1);
        assert_eq!(explanation.rule_origins["no-self-compare"], 0);
        assert_eq!(explanation.ignored_by, None);
    }

    #[test]
    fn test_explain_tracks_language_option_origins() {
        let resolver = Resolver::new(vec![
            Layer::new().with_language_option("globals", json!({ "process": "readonly" })),
            layer(&["test/**"]).with_language_option("globals", json!({ "it": "readonly" })),
            layer(&["src/**"]).with_language_option("sourceType", json!("module")),
        ])
        .unwrap();

        let explanation = resolver.explain("test/a.js").unwrap();
        assert_eq!(explanation.language_option_origins["globals"], 1);
        assert!(!explanation.language_option_origins.contains_key("sourceType"));
    }

    #[test]
    fn test_explain_reports_global_ignore() {
        let resolver = Resolver::new(vec![
            Layer::new().with_ignores(["build/**"]),
            Layer::new().with_rule("no-undef", Severity::Error),
        ])
        .unwrap();
        let explanation = resolver.explain("build/out.js").unwrap();
        assert_eq!(explanation.ignored_by, Some(0));
        assert!(explanation.matched_layers.is_empty());
    }

    #[test]
    fn test_memoized_and_plain_agree() {
        let layers = vec![
            layer(&["src/**"]).with_rule("no-undef", Severity::Error),
            layer(&["**/*.test.js"]).with_rule("no-undef", Severity::Off),
        ];
        let plain = Resolver::new(layers.clone()).unwrap();
        let memo = Resolver::new(layers).unwrap().with_memoization();
        assert!(memo.is_memoized());
        assert!(!plain.is_memoized());

        for path in ["src/a.js", "src/a.test.js", "./src/a.js", "other.js"] {
            assert_eq!(plain.resolve(path).unwrap(), memo.resolve(path).unwrap());
        }
        // "./src/a.js" shares the entry of "src/a.js".
        assert_eq!(memo.cached_entries(), 3);
        assert_eq!(plain.cached_entries(), 0);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let resolver = Resolver::new(vec![
            Layer::new().with_rule("no-undef", Severity::Error),
            layer(&["src/**"]).with_setting("react", json!({ "version": "detect" })),
        ])
        .unwrap()
        .with_memoization();

        let first = resolver.resolve("src/a.jsx").unwrap();
        let second = resolver.resolve("src/a.jsx").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
    }
}
