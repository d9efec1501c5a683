#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use cladis_test::{three_taxon_scenario, write_taxonomy_csv, write_thresholds_csv, TestTaxon};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn cladis_cmd() -> Command {
    Command::cargo_bin("cladis").expect("Failed to find cladis binary")
}

/// Temp directory used as CLADIS_HOME plus the scenario input files
pub struct CliEnvironment {
    pub temp_dir: TempDir,
    pub taxonomy: PathBuf,
}

impl CliEnvironment {
    pub fn new() -> Result<Self> {
        Self::with_taxa(&three_taxon_scenario())
    }

    pub fn with_taxa(taxa: &[TestTaxon]) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let taxonomy = write_taxonomy_csv(temp_dir.path(), "taxonomy.csv", taxa)?;
        Ok(Self { temp_dir, taxonomy })
    }

    pub fn thresholds(&self, rows: &[(u32, f64)]) -> Result<PathBuf> {
        write_thresholds_csv(self.temp_dir.path(), "thresholds.csv", rows)
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn scores(&self, values: &[f32]) -> Result<PathBuf> {
        self.write_file("scores.json", &serde_json::to_string(values)?)
    }

    /// Command with CLADIS_HOME isolated and `--taxonomy` set
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--taxonomy").arg(&self.taxonomy);
        cmd
    }

    /// Command with CLADIS_HOME isolated and no inputs
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cladis_cmd();
        cmd.env("CLADIS_HOME", self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("CLADIS_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}
