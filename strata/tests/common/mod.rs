//! Common test utilities for integration tests.
//!
//! This module provides helper functions for loading the layer fixtures under
//! `tests/fixtures/layers` and for writing throwaway layer documents.

use std::fs;
use std::path::{Path, PathBuf};

use strata::config::{ConfigLoader, LayerDocument};
use strata::Layer;

/// Path to a fixture under `tests/fixtures/layers`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("layers")
        .join(name)
}

/// Load a fixture document.
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> LayerDocument {
    ConfigLoader::load_file(&fixture_path(name)).unwrap()
}

/// Layers of the Node backend fixture.
///
/// Indices: 0 build-output (global ignore), 1 javascript, 2 typescript,
/// 3 tests, 4 commonjs.
#[allow(dead_code)]
pub fn backend_layers() -> Vec<Layer> {
    load_fixture("backend.yaml").layers
}

/// Layers of the React frontend fixture.
#[allow(dead_code)]
pub fn frontend_layers() -> Vec<Layer> {
    load_fixture("frontend.json").layers
}

/// Write `content` to `dir/name`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
