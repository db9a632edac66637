//! Conflict diagnostics.
//!
//! A conflict is two layers that can both apply to a file and that give the
//! same rule different severities. The later layer silently wins at
//! resolution time; these reports make such overrides visible. They are data,
//! never errors.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::layer::matcher::CompiledLayer;
use crate::layer::overlap::patterns_overlap;
use crate::layer::Layer;
use crate::rule::RuleDirective;

/// One rule that two overlapping layers set to different severities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    /// The rule both layers configure.
    pub rule: String,
    /// Index of the earlier layer.
    pub earlier_layer: usize,
    /// Index of the later layer, whose directive wins.
    pub later_layer: usize,
    /// The earlier layer's directive.
    pub earlier: RuleDirective,
    /// The later layer's directive.
    pub later: RuleDirective,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: layer #{} sets {} but layer #{} overrides it with {}",
            self.rule, self.earlier_layer, self.earlier, self.later_layer, self.later
        )
    }
}

/// Report every rule that two overlapping layers set to different
/// severities.
///
/// Checks every pair `i < j`. Differences in options alone are not reported.
/// Two layers overlap when either is unscoped or when some path matches a
/// pattern of each (see [`patterns_overlap`]). A layer's own `ignores` are
/// not subtracted, so a pair may be reported that no real file reaches;
/// [`crate::Resolver::diagnose_conflicts_for`] answers exactly for given
/// paths. Patterns that fail to compile only overlap by equality; this
/// function never fails.
///
/// Global-ignore layers carry no rules and never appear in reports.
///
/// # Examples
///
/// ```
/// use strata::{diagnose_conflicts, Layer, Severity};
///
/// let layers = vec![
///     Layer::new().with_patterns(["*"]).with_rule("no-unused-vars", Severity::Warn),
///     Layer::new().with_patterns(["*"]).with_rule("no-unused-vars", Severity::Off),
/// ];
/// let reports = diagnose_conflicts(&layers);
/// assert_eq!(reports.len(), 1);
/// assert_eq!((reports[0].earlier_layer, reports[0].later_layer), (0, 1));
/// ```
#[must_use]
pub fn diagnose_conflicts(layers: &[Layer]) -> Vec<ConflictReport> {
    let refs: Vec<&Layer> = layers.iter().collect();
    diagnose_layer_refs(&refs)
}

pub(crate) fn diagnose_layer_refs(layers: &[&Layer]) -> Vec<ConflictReport> {
    let mut reports = Vec::new();
    for (i, earlier) in layers.iter().enumerate() {
        if earlier.rules.is_empty() {
            continue;
        }
        for (j, later) in layers.iter().enumerate().skip(i + 1) {
            if !later.rules.is_empty() && scopes_overlap(earlier, later) {
                compare_rules(i, earlier, j, later, &mut reports);
            }
        }
    }
    reports
}

/// Exact diagnosis: layers overlap when both apply to at least one of
/// `targets` (already normalized).
pub(crate) fn diagnose_on_paths(
    layers: &[CompiledLayer],
    targets: &[String],
) -> Vec<ConflictReport> {
    let mut pairs = BTreeSet::new();
    for target in targets {
        if layers.iter().any(|layer| layer.ignores_globally(target)) {
            continue;
        }
        let applying: Vec<&CompiledLayer> = layers
            .iter()
            .filter(|layer| layer.applies_to(target) && !layer.layer().rules.is_empty())
            .collect();
        for (x, earlier) in applying.iter().enumerate() {
            for later in &applying[x + 1..] {
                pairs.insert((earlier.index(), later.index()));
            }
        }
    }

    let mut reports = Vec::new();
    for (i, j) in pairs {
        compare_rules(i, layers[i].layer(), j, layers[j].layer(), &mut reports);
    }
    reports
}

fn compare_rules(
    i: usize,
    earlier: &Layer,
    j: usize,
    later: &Layer,
    reports: &mut Vec<ConflictReport>,
) {
    for (rule, first) in &earlier.rules {
        let Some(second) = later.rules.get(rule) else {
            continue;
        };
        if first.severity() != second.severity() {
            reports.push(ConflictReport {
                rule: rule.clone(),
                earlier_layer: i,
                later_layer: j,
                earlier: first.clone(),
                later: second.clone(),
            });
        }
    }
}

/// Whether two layers may apply to a common file, judged from their
/// patterns alone.
#[must_use]
pub fn scopes_overlap(a: &Layer, b: &Layer) -> bool {
    if a.is_unscoped() || b.is_unscoped() {
        return true;
    }
    a.patterns
        .iter()
        .any(|pa| b.patterns.iter().any(|pb| patterns_overlap(pa, pb)))
}
