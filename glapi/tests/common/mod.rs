// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

/// Initializes logging (respects the `RUST_LOG` environment variable).
pub fn setup_logging() {
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_test_writer()
            .init();
    });
}

/// Path of the trimmed registry under `tests/data`.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("gl.xml")
}

/// Contents of the trimmed registry.
pub fn fixture() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture registry is readable")
}

/// RAII guard for a scratch directory.
///
/// Creates a unique directory under the system temp dir and removes it on drop.
pub struct TestDirGuard {
    dir: PathBuf,
}

impl TestDirGuard {
    /// Creates a new scratch directory with a unique UUID suffix.
    pub fn new(test: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "glapi_tests_{}_{}",
            test,
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|_| panic!("Failed to create test directory \"{}\".", dir.display()));
        Self { dir }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.dir
    }
}

impl Drop for TestDirGuard {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).unwrap_or_else(|_| {
            panic!(
                "Failed to remove test directory \"{}\".",
                self.dir.display()
            )
        });
    }
}
