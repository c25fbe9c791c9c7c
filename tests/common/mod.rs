//! Shared helpers for the integration test crates.
//!
//! Fixtures live under `tests/fixtures/{valid,invalid}`: files in `valid/`
//! extract cleanly, each file in `invalid/` fails with a `ParseError`.

#![allow(dead_code)]

pub mod harness;

use std::path::{Path, PathBuf};

/// Root of the fixture tree; also usable as a notes root.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn valid_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("valid").join(name)
}

pub fn invalid_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("invalid").join(name)
}

/// Reads a fixture, panicking with its path on failure.
pub fn read_fixture(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()))
}
