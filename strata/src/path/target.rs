//! Target paths: the relative, `/`-separated form layers are matched against.

use std::path::{Path, PathBuf};

use super::normalize::normalize;
use crate::error::{Error, Result};

fn invalid(path: &str, reason: &str) -> Error {
    Error::InvalidPath {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}

/// Normalize a target path for matching.
///
/// Backslashes become `/`, empty and `.` segments are dropped, and `..`
/// cancels the preceding segment.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path is empty, contains a NUL byte,
/// is absolute, climbs above the configuration base, or names nothing once
/// resolved.
///
/// # Examples
///
/// ```
/// use strata::path::normalize_target;
///
/// assert_eq!(normalize_target("./src/../lib/a.js").unwrap(), "lib/a.js");
/// assert_eq!(normalize_target("src\\index.ts").unwrap(), "src/index.ts");
/// assert!(normalize_target("../outside.js").is_err());
/// assert!(normalize_target("").is_err());
/// ```
pub fn normalize_target(path: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(invalid(path, "path is empty"));
    }
    if path.contains('\0') {
        return Err(invalid(path, "path contains a NUL byte"));
    }

    let unified = path.replace('\\', "/");
    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(invalid(
            path,
            "path must be relative to the configuration base",
        ));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(invalid(path, "path escapes the configuration base"));
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(invalid(path, "path does not name a file"));
    }

    Ok(segments.join("/"))
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Express a filesystem path as a target relative to `base`.
///
/// Relative inputs are taken relative to the current directory, like any
/// other command-line path.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if either path cannot be normalized, if
/// `path` lies outside `base`, or if the result is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use strata::path::relativize;
/// use std::path::Path;
///
/// let target = relativize(Path::new("/repo/src/./app.ts"), Path::new("/repo")).unwrap();
/// assert_eq!(target, "src/app.ts");
/// assert!(relativize(Path::new("/elsewhere/a.ts"), Path::new("/repo")).is_err());
/// ```
pub fn relativize(path: &Path, base: &Path) -> Result<String> {
    let absolute = normalize(path)?;
    let base = normalize(base)?;

    let relative = absolute
        .strip_prefix(&base)
        .map_err(|_| Error::InvalidPath {
            path: absolute.clone(),
            reason: format!("path is outside the base directory {}", base.display()),
        })?;

    let text = relative.to_str().ok_or_else(|| Error::InvalidPath {
        path: absolute.clone(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    normalize_target(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_relative_path_unchanged() {
        assert_eq!(normalize_target("src/a.js").unwrap(), "src/a.js");
        assert_eq!(normalize_target("x.js").unwrap(), "x.js");
    }

    #[test]
    fn test_collapses_redundant_segments() {
        assert_eq!(normalize_target("src//nested/./b.ts").unwrap(), "src/nested/b.ts");
        assert_eq!(normalize_target("src/nested/../b.ts").unwrap(), "src/b.ts");
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(normalize_target("").unwrap_err().is_invalid_path());
        assert!(normalize_target("   ").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_rejects_escaping_paths() {
        assert!(normalize_target("..").is_err());
        assert!(normalize_target("src/../../a.js").is_err());
    }

    #[test]
    fn test_rejects_paths_naming_nothing() {
        assert!(normalize_target(".").is_err());
        assert!(normalize_target("src/..").is_err());
    }

    #[test]
    fn test_rejects_absolute_paths() {
        assert!(normalize_target("/etc/passwd").is_err());
        assert!(normalize_target("C:\\repo\\a.js").is_err());
    }

    #[test]
    fn test_rejects_nul() {
        assert!(normalize_target("a\0b.js").is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_relativize_inside_base() {
        assert_eq!(
            relativize(Path::new("/repo/testing/../src/a.ts"), Path::new("/repo/")).unwrap(),
            "src/a.ts"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_relativize_base_itself_is_rejected() {
        assert!(relativize(Path::new("/repo"), Path::new("/repo")).is_err());
    }
}
