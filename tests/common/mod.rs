//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::{Path, PathBuf};

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Path to the bundled sample dataset
pub fn sample_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("data.json")
}

/// Write `json` into a fresh temp dir and return both (the dir must outlive the path)
pub fn write_temp_json(json: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, json).expect("write temp json");
    (dir, path)
}
