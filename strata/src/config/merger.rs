//! Layer document merging and precedence handling.
//!
//! Documents are concatenated in precedence order, so the layers of a
//! higher-precedence document sit later in the sequence and win at
//! resolution time. Resolver options merge field by field.

use std::path::{Path, PathBuf};

use crate::config::loader::{LayerSource, PROJECT_PRECEDENCE};
use crate::config::schema::ResolverOptions;
use crate::error::Result;
use crate::layer::Layer;
use crate::resolver::Resolver;

/// The merged layer sequence with per-layer origins.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    /// Layers in final declaration order.
    pub layers: Vec<Layer>,
    /// Document each layer came from; `None` for layers added in code.
    pub origins: Vec<Option<PathBuf>>,
    /// Merged resolver options.
    pub options: ResolverOptions,
    /// Directory target paths are relative to: that of the project document.
    pub base_dir: Option<PathBuf>,
}

impl LayerStack {
    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when no layer was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The document layer `index` came from.
    #[must_use]
    pub fn origin(&self, index: usize) -> Option<&Path> {
        self.origins.get(index).and_then(Option::as_deref)
    }

    /// Append layers defined in code.
    pub fn push_layers<I>(&mut self, layers: I)
    where
        I: IntoIterator<Item = Layer>,
    {
        for layer in layers {
            self.layers.push(layer);
            self.origins.push(None);
        }
    }

    /// Compile the stack into a resolver honoring the merged options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] for a malformed pattern.
    pub fn into_resolver(self) -> Result<Resolver> {
        let memoize = self.options.memoize_enabled();
        let resolver = Resolver::new(self.layers)?;
        Ok(if memoize {
            resolver.with_memoization()
        } else {
            resolver
        })
    }
}

/// Merges layer sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigMerger, ResolverOptions};
///
/// let mut result = ResolverOptions::default();
/// ConfigMerger::merge_options(&mut result, &ResolverOptions { memoize: Some(true) });
/// ConfigMerger::merge_options(&mut result, &ResolverOptions::default());
/// assert_eq!(result.memoize, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources into one layer stack.
    ///
    /// Sources are ordered by precedence first (stable, so equal precedence
    /// keeps the given order). The base directory is the directory of the
    /// highest-precedence project-level document.
    #[must_use]
    pub fn merge(mut sources: Vec<LayerSource>) -> LayerStack {
        sources.sort_by_key(|s| s.precedence);

        let mut stack = LayerStack::default();
        for source in sources {
            Self::merge_options(&mut stack.options, &source.document.resolver);

            if source.precedence >= PROJECT_PRECEDENCE {
                if let Some(dir) = source.path.parent() {
                    stack.base_dir = Some(dir.to_path_buf());
                }
            }

            for layer in source.document.layers {
                stack.layers.push(layer);
                stack.origins.push(Some(source.path.clone()));
            }
        }

        stack
    }

    /// Merge `source` options into `target` (source overwrites when set).
    pub fn merge_options(target: &mut ResolverOptions, source: &ResolverOptions) {
        if source.memoize.is_some() {
            target.memoize = source.memoize;
        }
    }
}
