//! Output formatter implementations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::conflicts::ConflictReport;
use crate::layer::Layer;
use crate::resolver::{EffectiveConfig, Explanation};
use crate::Result;

use super::OutputFormatter;

fn layer_label(layers: &[Layer], index: usize) -> String {
    layers
        .get(index)
        .map_or_else(|| format!("#{index}"), |layer| layer.label(index))
}

fn push_rules(lines: &mut Vec<String>, config: &EffectiveConfig, origin: impl Fn(&str) -> String) {
    lines.push("Rules:".to_string());
    for (name, directive) in &config.rules {
        lines.push(format!("  {name}: {directive}{}", origin(name)));
    }
}

fn push_values(
    lines: &mut Vec<String>,
    title: &str,
    values: &BTreeMap<String, Value>,
    origin: impl Fn(&str) -> String,
) {
    if values.is_empty() {
        return;
    }
    lines.push(title.to_string());
    for (key, value) in values {
        lines.push(format!("  {key}: {value}{}", origin(key)));
    }
}

fn origin_label(origins: &BTreeMap<String, usize>, key: &str, layers: &[Layer]) -> String {
    origins
        .get(key)
        .map_or_else(String::new, |&i| format!("  (from {})", layer_label(layers, i)))
}

fn push_plugins(lines: &mut Vec<String>, config: &EffectiveConfig) {
    if !config.plugins.is_empty() {
        let plugins: Vec<&str> = config.plugins.iter().map(String::as_str).collect();
        lines.push(format!("Plugins: {}", plugins.join(", ")));
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_config(&self, config: &EffectiveConfig) -> Result<String> {
        if config.ignored {
            return Ok("Ignored by a global ignore layer.".to_string());
        }
        if config.is_empty() {
            return Ok("No rules or settings apply.".to_string());
        }

        let mut lines = Vec::new();
        if !config.rules.is_empty() {
            push_rules(&mut lines, config, |_| String::new());
        }
        push_values(&mut lines, "Settings:", &config.settings, |_| String::new());
        push_values(
            &mut lines,
            "Language options:",
            &config.language_options,
            |_| String::new(),
        );
        push_plugins(&mut lines, config);

        Ok(lines.join("\n"))
    }

    fn format_explanation(&self, explanation: &Explanation, layers: &[Layer]) -> Result<String> {
        let mut lines = vec![explanation.path.clone()];

        if let Some(index) = explanation.ignored_by {
            lines.push(format!(
                "Ignored by global ignore layer {}.",
                layer_label(layers, index)
            ));
            return Ok(lines.join("\n"));
        }

        if explanation.matched_layers.is_empty() {
            lines.push("No layer applies.".to_string());
            return Ok(lines.join("\n"));
        }

        lines.push("Matched layers:".to_string());
        for &index in &explanation.matched_layers {
            lines.push(format!("  {}", layer_label(layers, index)));
        }

        let config = &explanation.config;
        if !config.rules.is_empty() {
            push_rules(&mut lines, config, |name| {
                origin_label(&explanation.rule_origins, name, layers)
            });
        }
        push_values(&mut lines, "Settings:", &config.settings, |key| {
            origin_label(&explanation.setting_origins, key, layers)
        });
        push_values(&mut lines, "Language options:", &config.language_options, |key| {
            origin_label(&explanation.language_option_origins, key, layers)
        });
        push_plugins(&mut lines, config);

        Ok(lines.join("\n"))
    }

    fn format_conflicts(&self, reports: &[ConflictReport], layers: &[Layer]) -> Result<String> {
        if reports.is_empty() {
            return Ok("No conflicts found.".to_string());
        }

        let mut lines = vec![format!("{} conflict(s):", reports.len())];
        for report in reports {
            lines.push(format!(
                "  {}: {} sets {}, overridden by {} with {}",
                report.rule,
                layer_label(layers, report.earlier_layer),
                report.earlier,
                layer_label(layers, report.later_layer),
                report.later
            ));
        }

        Ok(lines.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_config(&self, config: &EffectiveConfig) -> Result<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }

    fn format_explanation(&self, explanation: &Explanation, _layers: &[Layer]) -> Result<String> {
        Ok(serde_json::to_string_pretty(explanation)?)
    }

    fn format_conflicts(&self, reports: &[ConflictReport], _layers: &[Layer]) -> Result<String> {
        Ok(serde_json::to_string_pretty(reports)?)
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format_config(&self, config: &EffectiveConfig) -> Result<String> {
        Ok(serde_yaml::to_string(config)?)
    }

    fn format_explanation(&self, explanation: &Explanation, _layers: &[Layer]) -> Result<String> {
        Ok(serde_yaml::to_string(explanation)?)
    }

    fn format_conflicts(&self, reports: &[ConflictReport], _layers: &[Layer]) -> Result<String> {
        Ok(serde_yaml::to_string(reports)?)
    }
}
