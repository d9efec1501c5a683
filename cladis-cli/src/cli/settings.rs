/// Effective settings: defaults, then the config file, then CLI flags
use super::Cli;
use cladis_core::{default_config_path, load_config, CladisError, Config};
use cladis_taxonomy::ModelTaxonomy;
use std::path::PathBuf;
use tracing::debug;

pub struct Settings {
    pub config: Config,
    pub taxonomy_path: Option<PathBuf>,
    pub thresholds_path: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, CladisError> {
        let config = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    return Err(CladisError::Configuration(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                load_config(path)?
            }
            None => {
                let path = default_config_path();
                if path.exists() {
                    debug!("Loading config from {}", path.display());
                    load_config(&path)?
                } else {
                    Config::default()
                }
            }
        };

        let taxonomy_path = cli
            .taxonomy
            .clone()
            .or_else(|| config.taxonomy.taxonomy_path.clone());
        let thresholds_path = cli
            .thresholds
            .clone()
            .or_else(|| config.taxonomy.thresholds_path.clone());

        Ok(Self {
            config,
            taxonomy_path,
            thresholds_path,
        })
    }

    pub fn load_model(&self) -> Result<ModelTaxonomy, CladisError> {
        let taxonomy_path = self.taxonomy_path.as_ref().ok_or_else(|| {
            CladisError::Configuration(
                "no taxonomy table given; pass --taxonomy or set taxonomy.taxonomy_path"
                    .to_string(),
            )
        })?;
        ModelTaxonomy::load(taxonomy_path, self.thresholds_path.as_deref())
    }
}
