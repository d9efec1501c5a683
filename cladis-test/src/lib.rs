//! Test utilities for the Cladis workspace
//!
//! Shared fixtures for building taxonomy tables on disk and isolated
//! environments so tests never touch the real `CLADIS_HOME`.
//!
//! # Features
//!
//! - **Test Environment**: Isolated temp directory with automatic cleanup
//! - **Fixtures**: Canned and randomly generated taxonomy tables

pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::{
    random_forest, taxonomy_csv, thresholds_csv, three_taxon_scenario, write_taxonomy_csv,
    write_thresholds_csv, TestTaxon,
};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .try_init();
}

/// Run a test with a clean environment
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    f(&env)
}
