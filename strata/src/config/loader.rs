//! Layer document discovery and loading.
//!
//! This module finds the layer documents that apply to a working directory
//! and parses them, keeping track of where each one came from.

use crate::config::schema::{
    LayerDocument, DATA_DIR_NAME, LOCAL_FILE, PROJECT_FILES, USER_LAYERS_FILE,
};
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Precedence of the user-level layer file.
pub const USER_PRECEDENCE: u8 = 1;

/// Precedence of the project layer file (or an explicit document).
pub const PROJECT_PRECEDENCE: u8 = 2;

/// Precedence of the project-private layer file.
pub const LOCAL_PRECEDENCE: u8 = 3;

/// A parsed layer document with its precedence level.
///
/// Lower precedence documents come first in the merged layer sequence, so
/// their layers are overridden by those of higher ones.
///
/// # Examples
///
/// ```
/// use strata::config::LayerSource;
/// use std::path::PathBuf;
///
/// let source = LayerSource {
///     path: PathBuf::from("/repo/strata.yaml"),
///     precedence: 2,
///     document: Default::default(),
/// };
/// assert!(source.document.layers.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LayerSource {
    /// Path of the document.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed document.
    pub document: LayerDocument,
}

/// Loads layer documents from their well-known locations.
///
/// # Examples
///
/// ```no_run
/// use strata::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} layer documents", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load every applicable layer document.
    ///
    /// Searches for:
    /// 1. User layers at `~/.strata/layers.yaml` (precedence 1)
    /// 2. Project `strata.yaml`, `strata.yml` or `strata.json`, walking up
    ///    from `working_dir` (precedence 2)
    /// 3. Project `strata.local.yaml` next to it (precedence 3)
    ///
    /// `data_dir` overrides where the user layers are read from.
    ///
    /// # Errors
    ///
    /// Returns an error if any document exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<LayerSource>> {
        let mut sources = Vec::new();

        if let Some(user) = Self::load_user_layers(data_dir)? {
            sources.push(user);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    /// Load the user-level layer file, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown (and no `data_dir`
    /// was given), or if the file exists but cannot be read or parsed.
    pub fn load_user_layers(data_dir: Option<&Path>) -> Result<Option<LayerSource>> {
        let path = match data_dir {
            Some(dir) => dir.join(USER_LAYERS_FILE),
            None => Self::default_data_dir()?.join(USER_LAYERS_FILE),
        };

        if !path.is_file() {
            log::debug!("no user layers at {}", path.display());
            return Ok(None);
        }

        let document = Self::load_file(&path)?;
        Ok(Some(LayerSource {
            path,
            precedence: USER_PRECEDENCE,
            document,
        }))
    }

    /// Discover project documents by walking up from `start_dir`.
    ///
    /// Stops at the first directory holding a project file or a local file.
    /// Only the first of `strata.yaml`, `strata.yml`, `strata.json` found in
    /// that directory is read.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<LayerSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            if let Some(project) = PROJECT_FILES
                .iter()
                .map(|name| current.join(name))
                .find(|path| path.is_file())
            {
                let document = Self::load_file(&project)?;
                configs.push(LayerSource {
                    path: project,
                    precedence: PROJECT_PRECEDENCE,
                    document,
                });
            }

            let local = current.join(LOCAL_FILE);
            if local.is_file() {
                let document = Self::load_file(&local)?;
                configs.push(LayerSource {
                    path: local,
                    precedence: LOCAL_PRECEDENCE,
                    document,
                });
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse one layer document.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML. An empty
    /// file is an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist, [`Error::Io`]
    /// if it cannot be read, and [`Error::Configuration`] or [`Error::Json`]
    /// if it cannot be parsed.
    pub fn load_file(path: &Path) -> Result<LayerDocument> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                resource: format!("layer document {}", path.display()),
            },
            _ => Error::Io(e),
        })?;

        if contents.trim().is_empty() {
            log::warn!("layer document {} is empty", path.display());
            return Ok(LayerDocument::default());
        }

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let document: LayerDocument = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        log::debug!(
            "loaded {} layer(s) from {}",
            document.layers.len(),
            path.display()
        );
        Ok(document)
    }

    /// The default data directory, `~/.strata`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_data_dir() -> Result<PathBuf> {
        home::home_dir()
            .map(|home| home.join(DATA_DIR_NAME))
            .ok_or_else(|| Error::Validation {
                field: "home_directory".into(),
                message: "Cannot determine home directory".into(),
            })
    }
}
