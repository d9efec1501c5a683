//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    /// Root temporary directory
    temp_dir: Option<TempDir>,
    root_path: PathBuf,
    /// CLADIS_HOME before this environment took over
    saved_home: Option<String>,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("cladis-test")
            .context("Failed to create temporary directory")?;
        let root_path = temp_dir.path().to_path_buf();

        let saved_home = std::env::var("CLADIS_HOME").ok();
        std::env::set_var("CLADIS_HOME", &root_path);

        Ok(Self {
            temp_dir: Some(temp_dir),
            root_path,
            saved_home,
        })
    }

    /// Get the root path of the test environment
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(name)
    }

    /// Write a file in the test environment, returning its full path
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Manually preserve the environment (for debugging)
    pub fn preserve(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            let path = temp_dir.keep();
            println!("Test environment preserved at: {}", path.display());
        }
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        match &self.saved_home {
            Some(v) => std::env::set_var("CLADIS_HOME", v),
            None => std::env::remove_var("CLADIS_HOME"),
        }
    }
}
