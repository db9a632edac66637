//! Layer validation.
//!
//! Resolution only needs patterns that compile. Loaded documents are held
//! to a stricter standard so that typos surface when the file is read rather
//! than as a silently unmatched rule later.

use std::collections::BTreeSet;

use crate::config::schema::LayerDocument;
use crate::error::{Error, Result};
use crate::layer::matcher::CompiledLayer;
use crate::layer::Layer;
use crate::rule::rule_namespace;

/// Validates layers according to the document rules.
///
/// # Examples
///
/// ```
/// use strata::config::ConfigValidator;
/// use strata::{Layer, Severity};
///
/// let layers = vec![
///     Layer::new().with_plugin("import"),
///     Layer::new().with_patterns(["src/**"]).with_rule("import/order", Severity::Warn),
/// ];
/// ConfigValidator::validate_layers(&layers).unwrap();
///
/// let undeclared = vec![Layer::new().with_rule("react/jsx-key", Severity::Error)];
/// assert!(ConfigValidator::validate_layers(&undeclared).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// See [`ConfigValidator::validate_layers`].
    pub fn validate_document(document: &LayerDocument) -> Result<()> {
        Self::validate_layers(&document.layers)
    }

    /// Validate a layer sequence.
    ///
    /// Checks that:
    /// - every pattern and ignore is non-empty and compiles
    /// - rule names are non-empty and contain no whitespace
    /// - each namespaced rule's plugin is declared by the same or an earlier
    ///   layer
    /// - setting keys are non-empty
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for pattern problems and
    /// [`Error::Validation`] for everything else.
    pub fn validate_layers(layers: &[Layer]) -> Result<()> {
        let mut declared: BTreeSet<&str> = BTreeSet::new();

        for (index, layer) in layers.iter().enumerate() {
            CompiledLayer::compile(index, layer.clone())?;

            declared.extend(layer.plugins.iter().map(String::as_str));
            Self::validate_plugins(index, layer)?;
            Self::validate_rules(index, layer, &declared)?;
            Self::validate_settings(index, layer)?;
            Self::validate_language_options(index, layer)?;

            if layer.patterns.is_empty()
                && layer.ignores.is_empty()
                && layer.rules.is_empty()
                && layer.settings.is_empty()
                && layer.language_options.is_empty()
                && layer.plugins.is_empty()
            {
                log::warn!("layer {} is empty and has no effect", layer.label(index));
            }
        }

        Ok(())
    }

    fn validate_plugins(index: usize, layer: &Layer) -> Result<()> {
        if layer.plugins.iter().any(|plugin| plugin.trim().is_empty()) {
            return Err(Error::Validation {
                field: format!("layers[{index}].plugins"),
                message: "Plugin names cannot be empty".into(),
            });
        }
        Ok(())
    }

    fn validate_rules(index: usize, layer: &Layer, declared: &BTreeSet<&str>) -> Result<()> {
        for name in layer.rules.keys() {
            if name.is_empty() {
                return Err(Error::Validation {
                    field: format!("layers[{index}].rules"),
                    message: "Rule names cannot be empty".into(),
                });
            }

            if name.chars().any(char::is_whitespace) {
                return Err(Error::Validation {
                    field: format!("layers[{index}].rules.{name}"),
                    message: "Rule names cannot contain whitespace".into(),
                });
            }

            if let Some(namespace) = rule_namespace(name) {
                if !declared.contains(namespace) {
                    return Err(Error::Validation {
                        field: format!("layers[{index}].rules.{name}"),
                        message: format!(
                            "Plugin '{namespace}' is not declared by this or an earlier layer"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_settings(index: usize, layer: &Layer) -> Result<()> {
        if layer.settings.keys().any(|key| key.trim().is_empty()) {
            return Err(Error::Validation {
                field: format!("layers[{index}].settings"),
                message: "Setting keys cannot be empty".into(),
            });
        }
        Ok(())
    }

    fn validate_language_options(index: usize, layer: &Layer) -> Result<()> {
        for (key, value) in &layer.language_options {
            if key.trim().is_empty() {
                return Err(Error::Validation {
                    field: format!("layers[{index}].languageOptions"),
                    message: "Language option keys cannot be empty".into(),
                });
            }

            if matches!(key.as_str(), "globals" | "parserOptions") && !value.is_object() {
                return Err(Error::Validation {
                    field: format!("layers[{index}].languageOptions.{key}"),
                    message: format!("'{key}' must be a mapping"),
                });
            }
        }
        Ok(())
    }
}
