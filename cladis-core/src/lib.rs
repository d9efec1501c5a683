//! Core utilities and types shared across all Cladis crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use error::{CladisError, CladisResult, LookupError, TaxonomyBuildError};
pub use config::{Config, TreeOrder, default_config, load_config, save_config};
pub use types::{LeafClassId, TaxonId};
pub use system::{cladis_home, default_config_path};

/// Version information for the Cladis project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
