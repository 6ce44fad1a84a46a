//! Catalog location resolution.

use std::path::PathBuf;

/// Environment variable for overriding the catalog location.
pub const CATALOG_ENV_VAR: &str = "KATA_CATALOG";

/// Get the default catalog location.
///
/// Resolution order:
/// 1. `KATA_CATALOG` environment variable (a file or a directory)
/// 2. `catalog/` directory relative to workspace root
pub fn default_catalog_path() -> PathBuf {
    if let Ok(path) = std::env::var(CATALOG_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalog")
}
