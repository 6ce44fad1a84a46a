#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse XML catalog {path} at byte {position}: {message}")]
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },

    #[error("failed to parse JSON catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("unsupported catalog format for {path}: {message}")]
    UnsupportedFormat { path: PathBuf, message: String },

    #[error("invalid value id in {path}: {message}")]
    InvalidValue { path: PathBuf, message: String },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("catalog {path} failed integrity checks with {errors} error(s); first: {first}")]
    Integrity {
        path: PathBuf,
        errors: usize,
        first: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
