use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the home path to avoid repeated environment lookups
static CLADIS_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Resolve the Cladis home directory without caching.
/// Checks CLADIS_HOME, falls back to ${HOME}/.cladis
pub fn resolve_cladis_home() -> PathBuf {
    if let Ok(path) = std::env::var("CLADIS_HOME") {
        PathBuf::from(path)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| {
            std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
        });
        PathBuf::from(home).join(".cladis")
    }
}

/// Get the Cladis home directory
pub fn cladis_home() -> PathBuf {
    CLADIS_HOME.get_or_init(resolve_cladis_home).clone()
}

/// Default location of the user configuration file
pub fn default_config_path() -> PathBuf {
    cladis_home().join("config.toml")
}
