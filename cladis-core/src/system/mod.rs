pub mod paths;

pub use paths::{cladis_home, default_config_path, resolve_cladis_home};
