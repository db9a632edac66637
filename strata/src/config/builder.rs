//! Builder assembling a layer stack from every configuration source.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, LayerSource, PROJECT_PRECEDENCE};
use crate::config::merger::{ConfigMerger, LayerStack};
use crate::config::schema::ResolverOptions;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::layer::Layer;

/// Builds a [`LayerStack`] from files, environment and code.
///
/// Precedence, lowest to highest: defaults, documents on disk (user, project,
/// local), environment variables, then whatever is set on the builder.
/// Layers added with [`ConfigBuilder::with_layers`] go after every loaded
/// layer.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigBuilder, ResolverOptions};
/// use strata::{Layer, Severity};
///
/// let stack = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_layers(vec![Layer::new().with_rule("no-undef", Severity::Error)])
///     .with_options(ResolverOptions { memoize: Some(true) })
///     .build()
///     .unwrap();
///
/// assert_eq!(stack.len(), 1);
/// assert!(stack.into_resolver().unwrap().is_memoized());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_user: bool,
    skip_files: bool,
    skip_env: bool,
    layers: Vec<Layer>,
    options: ResolverOptions,
}

impl ConfigBuilder {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project discovery from `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Read layers from `path` instead of discovering project documents.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Read user layers from `dir` instead of `~/.strata`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Do not load user-level layers.
    #[must_use]
    pub const fn skip_user_config(mut self) -> Self {
        self.skip_user = true;
        self
    }

    /// Do not load any document from disk.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `STRATA_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Append layers after every loaded layer.
    #[must_use]
    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Override resolver options.
    #[must_use]
    pub const fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be read or parsed, if an
    /// environment variable holds an invalid value, or if the merged layers
    /// fail validation.
    pub fn build(self) -> Result<LayerStack> {
        let working_dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };

        let mut config_file = self.config_file.clone();
        let mut data_dir = self.data_dir.clone();
        let mut skip_user = self.skip_user;
        if !self.skip_env {
            config_file = config_file.or_else(EnvironmentConfig::config_file);
            data_dir = data_dir.or_else(EnvironmentConfig::data_dir);
            skip_user = skip_user || EnvironmentConfig::skip_user_config()?;
        }

        let sources = if self.skip_files {
            Vec::new()
        } else {
            Self::load_sources(&working_dir, config_file.as_deref(), data_dir.as_deref(), skip_user)?
        };

        let mut stack = ConfigMerger::merge(sources);
        if config_file.is_some() && stack.base_dir.is_none() {
            stack.base_dir = Some(working_dir.clone());
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut stack.options)?;
        }
        ConfigMerger::merge_options(&mut stack.options, &self.options);
        stack.push_layers(self.layers);

        ConfigValidator::validate_layers(&stack.layers)?;

        log::debug!(
            "layer stack: {} layer(s), base {}",
            stack.len(),
            stack
                .base_dir
                .as_deref()
                .map_or_else(|| "<none>".to_string(), |dir| dir.display().to_string())
        );
        Ok(stack)
    }

    fn load_sources(
        working_dir: &Path,
        config_file: Option<&Path>,
        data_dir: Option<&Path>,
        skip_user: bool,
    ) -> Result<Vec<LayerSource>> {
        let mut sources = Vec::new();

        if !skip_user {
            sources.extend(ConfigLoader::load_user_layers(data_dir)?);
        }

        match config_file {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    working_dir.join(path)
                };
                let document = ConfigLoader::load_file(&path)?;
                sources.push(LayerSource {
                    path,
                    precedence: PROJECT_PRECEDENCE,
                    document,
                });
            }
            None => sources.extend(ConfigLoader::discover_project_configs(working_dir)?),
        }

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rule::Severity;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated(project: &TempDir, data: &TempDir) -> ConfigBuilder {
        ConfigBuilder::new()
            .skip_env()
            .with_working_dir(project.path())
            .with_data_dir(data.path())
    }

    #[test]
    fn test_build_without_sources() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let stack = isolated(&project, &data).build().unwrap();
        assert!(stack.is_empty());
        assert_eq!(stack.base_dir, None);
    }

    #[test]
    fn test_local_beats_project_beats_user() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("layers.yaml"), "- rules:\n    eqeqeq: warn\n").unwrap();
        fs::write(project.path().join("strata.yaml"), "- rules:\n    eqeqeq: error\n").unwrap();
        fs::write(project.path().join("strata.local.yaml"), "- rules:\n    eqeqeq: off\n").unwrap();

        let stack = isolated(&project, &data).build().unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.base_dir.as_deref(), Some(project.path()));

        let resolver = stack.into_resolver().unwrap();
        assert_eq!(
            resolver.resolve("a.js").unwrap().severity_of("eqeqeq"),
            Severity::Off
        );
    }

    #[test]
    fn test_skip_user_config() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("layers.yaml"), "- rules:\n    eqeqeq: warn\n").unwrap();

        let stack = isolated(&project, &data).skip_user_config().build().unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_explicit_config_replaces_discovery() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(project.path().join("strata.yaml"), "- rules:\n    eqeqeq: error\n").unwrap();
        fs::write(
            project.path().join("alt.json"),
            r#"{ "layers": [ { "rules": { "no-console": "warn" } } ] }"#,
        )
        .unwrap();

        let stack = isolated(&project, &data)
            .with_config_file(Path::new("alt.json"))
            .build()
            .unwrap();
        assert_eq!(stack.len(), 1);
        assert!(stack.layers[0].rules.contains_key("no-console"));
        assert_eq!(stack.origin(0), Some(project.path().join("alt.json").as_path()));
    }

    #[test]
    fn test_missing_explicit_config() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let err = isolated(&project, &data)
            .with_config_file(Path::new("nope.yaml"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_validation_runs_on_loaded_layers() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(
            project.path().join("strata.yaml"),
            "- rules:\n    import/order: error\n",
        )
        .unwrap();

        let err = isolated(&project, &data).build().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_programmatic_layers_come_last() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(project.path().join("strata.yaml"), "- rules:\n    eqeqeq: error\n").unwrap();

        let stack = isolated(&project, &data)
            .with_layers(vec![Layer::new().with_rule("eqeqeq", Severity::Warn)])
            .build()
            .unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.origin(1), None);
        assert_eq!(stack.layers[1].rules["eqeqeq"].severity(), Severity::Warn);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_files() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(
            project.path().join("strata.yaml"),
            "resolver:\n  memoize: false\nlayers: []\n",
        )
        .unwrap();

        env::set_var("STRATA_MEMOIZE", "true");
        env::set_var("STRATA_DATA_DIR", data.path());
        let stack = ConfigBuilder::new()
            .with_working_dir(project.path())
            .build();
        env::remove_var("STRATA_MEMOIZE");
        env::remove_var("STRATA_DATA_DIR");

        assert_eq!(stack.unwrap().options.memoize, Some(true));
    }

    #[test]
    #[serial]
    fn test_programmatic_options_beat_environment() {
        env::set_var("STRATA_MEMOIZE", "true");
        let stack = ConfigBuilder::new()
            .skip_files()
            .with_options(ResolverOptions { memoize: Some(false) })
            .build();
        env::remove_var("STRATA_MEMOIZE");

        assert_eq!(stack.unwrap().options.memoize, Some(false));
    }
}
