#![deny(unsafe_code)]

use std::path::{Component, Path, PathBuf};

use kata_model::DisplayOptions;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// File name of a catalog directory's manifest.
pub const MANIFEST_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    Xml,
    Json,
}

impl CatalogFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

/// `catalog.toml`:
///
/// ```toml
/// [catalog]
/// source = "techniques.xml"
/// sha256 = "..."
///
/// [display]
/// placeholder_image = "images/select_s.png"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub catalog: ManifestCatalog,
    #[serde(default)]
    pub display: DisplayOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestCatalog {
    /// Source file, relative to the manifest.
    pub source: String,
    #[serde(default)]
    pub format: Option<CatalogFormat>,
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn load_manifest(path: &Path) -> Result<Manifest, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| CatalogError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

impl Manifest {
    /// Resolve the source file against the manifest's directory.
    ///
    /// The source must stay inside that directory.
    pub fn source_path(&self, manifest_path: &Path) -> Result<PathBuf, CatalogError> {
        let relative = Path::new(&self.catalog.source);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if self.catalog.source.trim().is_empty() || escapes {
            return Err(CatalogError::InvalidManifest {
                path: manifest_path.to_path_buf(),
                message: format!(
                    "source must be a relative path inside the catalog directory, got {:?}",
                    self.catalog.source
                ),
            });
        }
        let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(base.join(relative))
    }

    pub fn format(&self, manifest_path: &Path) -> Result<CatalogFormat, CatalogError> {
        if let Some(format) = self.catalog.format {
            return Ok(format);
        }
        CatalogFormat::from_path(Path::new(&self.catalog.source)).ok_or_else(|| {
            CatalogError::UnsupportedFormat {
                path: manifest_path.to_path_buf(),
                message: format!(
                    "cannot infer format of {:?}; set catalog.format",
                    self.catalog.source
                ),
            }
        })
    }
}
