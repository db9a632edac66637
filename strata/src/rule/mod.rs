//! Rule severities and directives.
//!
//! The resolver never executes rules. It only carries a [`RuleDirective`]
//! per rule name through the layer merge so that an external engine can
//! dispatch to the plugin that owns the rule.

mod directive;
mod severity;

pub use directive::RuleDirective;
pub use severity::Severity;

/// The plugin namespace a rule name belongs to, if any.
///
/// Everything before the last `/` is the namespace, which covers both
/// `plugin/rule` and scoped `@scope/rule` or `@scope/plugin/rule` names.
///
/// # Examples
///
/// ```
/// use strata::rule::rule_namespace;
///
/// assert_eq!(rule_namespace("import/order"), Some("import"));
/// assert_eq!(rule_namespace("@typescript-eslint/no-explicit-any"), Some("@typescript-eslint"));
/// assert_eq!(rule_namespace("no-undef"), None);
/// ```
#[must_use]
pub fn rule_namespace(name: &str) -> Option<&str> {
    name.rsplit_once('/')
        .map(|(namespace, _)| namespace)
        .filter(|namespace| !namespace.is_empty())
}
