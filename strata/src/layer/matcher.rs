//! Compiled glob matchers for layers.
//!
//! Patterns are matched against normalized target paths. `*` and `?` stay
//! within one path segment, `**` spans any number of segments (including
//! none), and `{a,b}` / `[...]` work as usual. A leading `./` is ignored and
//! a trailing `/` matches everything below that directory.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use super::Layer;
use crate::error::{Error, Result};

/// Compile one pattern the way layers interpret it.
///
/// # Errors
///
/// Returns the underlying `globset` error for malformed syntax such as an
/// unclosed `[` or `{`.
pub fn build_glob(pattern: &str) -> std::result::Result<Glob, globset::Error> {
    let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
    if trimmed.ends_with('/') {
        GlobBuilder::new(&format!("{trimmed}**"))
            .literal_separator(true)
            .build()
    } else {
        GlobBuilder::new(trimmed).literal_separator(true).build()
    }
}

fn compile_set(layer: usize, patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if pattern.trim().is_empty() {
            return Err(Error::InvalidPattern {
                layer,
                pattern: pattern.clone(),
                reason: "pattern is empty".to_string(),
            });
        }
        let glob = build_glob(pattern).map_err(|e| Error::InvalidPattern {
            layer,
            pattern: pattern.clone(),
            reason: e.kind().to_string(),
        })?;
        builder.add(glob);
    }

    builder.build().map(Some).map_err(|e| Error::InvalidPattern {
        layer,
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// A layer together with its compiled matchers.
#[derive(Debug, Clone)]
pub struct CompiledLayer {
    index: usize,
    layer: Layer,
    scope: Option<GlobSet>,
    ignores: Option<GlobSet>,
}

impl CompiledLayer {
    /// Compile the patterns and ignores of `layer`, which sits at `index` in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first empty or malformed
    /// pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{CompiledLayer, Layer};
    ///
    /// let compiled = CompiledLayer::compile(0, Layer::new().with_patterns(["src/**"])).unwrap();
    /// assert!(compiled.applies_to("src/a.js"));
    /// assert!(!compiled.applies_to("test/a.js"));
    ///
    /// assert!(CompiledLayer::compile(1, Layer::new().with_patterns(["src/[a"])).is_err());
    /// ```
    pub fn compile(index: usize, layer: Layer) -> Result<Self> {
        let scope = compile_set(index, &layer.patterns)?;
        let ignores = compile_set(index, &layer.ignores)?;
        Ok(Self {
            index,
            layer,
            scope,
            ignores,
        })
    }

    /// Position in declaration order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The source layer.
    #[must_use]
    pub const fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Whether `target` falls inside the layer's patterns (always true for
    /// unscoped layers).
    #[must_use]
    pub fn in_scope(&self, target: &str) -> bool {
        self.scope.as_ref().map_or(true, |set| set.is_match(target))
    }

    /// Whether `target` matches one of the layer's ignores.
    #[must_use]
    pub fn is_ignored(&self, target: &str) -> bool {
        self.ignores.as_ref().is_some_and(|set| set.is_match(target))
    }

    /// Whether this layer contributes to the configuration of `target`.
    #[must_use]
    pub fn applies_to(&self, target: &str) -> bool {
        !self.layer.is_global_ignore() && self.in_scope(target) && !self.is_ignored(target)
    }

    /// Whether this is a global-ignore layer that excludes `target`.
    #[must_use]
    pub fn ignores_globally(&self, target: &str) -> bool {
        self.layer.is_global_ignore() && self.is_ignored(target)
    }
}

/// Compile a whole layer sequence, failing on the first malformed pattern.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] naming the offending layer.
pub fn compile_layers<I>(layers: I) -> Result<Vec<CompiledLayer>>
where
    I: IntoIterator<Item = Layer>,
{
    layers
        .into_iter()
        .enumerate()
        .map(|(index, layer)| CompiledLayer::compile(index, layer))
        .collect()
}
