//! Configuration types for Cladis

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::CladisError;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaxonomyConfig {
    /// CSV with taxon_id, parent_taxon_id, name, rank, leaf_class_id
    #[serde(default)]
    pub taxonomy_path: Option<PathBuf>,
    /// Optional CSV with taxon_id and thres columns
    #[serde(default)]
    pub thresholds_path: Option<PathBuf>,
}

/// Order in which children are listed when rendering the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TreeOrder {
    /// Display score descending when the siblings carry one, otherwise name
    #[default]
    Auto,
    /// Taxonomy table order
    Source,
    Name,
    Score,
}

impl std::str::FromStr for TreeOrder {
    type Err = CladisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "source" => Ok(Self::Source),
            "name" => Ok(Self::Name),
            "score" => Ok(Self::Score),
            other => Err(CladisError::InvalidInput(format!(
                "unknown tree order '{}' (expected auto, source, name or score)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub order: TreeOrder,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_show_bounds")]
    pub show_bounds: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

// Default value functions
fn default_show_bounds() -> bool { true }
fn default_top_k() -> usize { 10 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            order: TreeOrder::default(),
            max_depth: None,
            show_bounds: default_show_bounds(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, CladisError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| CladisError::Configuration(format!("Failed to parse config: {}", e)))?;
    debug!("Loaded config from {}", path.as_ref().display());
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), CladisError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| CladisError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.taxonomy.taxonomy_path, None);
        assert_eq!(config.taxonomy.thresholds_path, None);

        assert_eq!(config.display.order, TreeOrder::Auto);
        assert_eq!(config.display.max_depth, None);
        assert!(config.display.show_bounds);

        assert_eq!(config.prediction.top_k, 10);
    }

    #[test]
    fn test_load_valid_config() {
        let toml_content = r#"
[taxonomy]
taxonomy_path = "/models/taxonomy.csv"
thresholds_path = "/models/thresholds.csv"

[display]
order = "name"
max_depth = 4
show_bounds = false

[prediction]
top_k = 25
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(
            config.taxonomy.taxonomy_path,
            Some(PathBuf::from("/models/taxonomy.csv"))
        );
        assert_eq!(
            config.taxonomy.thresholds_path,
            Some(PathBuf::from("/models/thresholds.csv"))
        );
        assert_eq!(config.display.order, TreeOrder::Name);
        assert_eq!(config.display.max_depth, Some(4));
        assert!(!config.display.show_bounds);
        assert_eq!(config.prediction.top_k, 25);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[display]
order = "source"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.display.order, TreeOrder::Source);
        assert!(config.display.show_bounds);
        assert_eq!(config.prediction.top_k, 10);
        assert_eq!(config.taxonomy.taxonomy_path, None);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            CladisError::Configuration(msg) => {
                assert!(msg.contains("Failed to parse config"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_unknown_tree_order_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[display]\norder = \"random\"\n").unwrap();

        assert!(matches!(
            load_config(temp_file.path()),
            Err(CladisError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/config.toml").unwrap_err() {
            CladisError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.taxonomy.taxonomy_path = Some(PathBuf::from("taxonomy.csv"));
        config.display.order = TreeOrder::Score;
        config.display.max_depth = Some(2);
        config.prediction.top_k = 3;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.taxonomy.taxonomy_path, config.taxonomy.taxonomy_path);
        assert_eq!(loaded.display.order, TreeOrder::Score);
        assert_eq!(loaded.display.max_depth, Some(2));
        assert_eq!(loaded.prediction.top_k, 3);
    }

    #[test]
    fn test_tree_order_from_str() {
        assert_eq!("AUTO".parse::<TreeOrder>().unwrap(), TreeOrder::Auto);
        assert_eq!("score".parse::<TreeOrder>().unwrap(), TreeOrder::Score);
        assert!("sideways".parse::<TreeOrder>().is_err());
    }
}
