//! Filesystem path normalization.
//!
//! Used for paths on disk (layer documents, base directories, absolute
//! targets handed in by the CLI). These helpers are purely lexical: they
//! never touch the filesystem or follow symlinks.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` or `~/` to the home directory.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory is
/// unknown, or the path uses the unsupported `~user` form.
///
/// # Examples
///
/// ```
/// use strata::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/.strata/layers.yaml")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with(".strata/layers.yaml"));
///
/// assert_eq!(expand_tilde(Path::new("/etc/strata.yaml")).unwrap(), Path::new("/etc/strata.yaml"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let text = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    let Some(rest) = text.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(tail))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Lexically resolve `.` and `..` in an absolute path.
///
/// # Errors
///
/// Returns an error if `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use strata::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/repo/./src/../lib")).unwrap(), PathBuf::from("/repo/lib"));
/// assert!(resolve_components(Path::new("/repo/../..")).is_err());
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Make a path absolute (expanding `~`, joining onto the current directory)
/// and resolve `.`/`..` lexically.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory cannot
/// be read, or the path escapes the root.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
