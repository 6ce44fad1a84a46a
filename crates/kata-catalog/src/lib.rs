//! Loading technique catalogs from disk.
//!
//! A catalog is either an XML hierarchy, a JSON table file, or a directory
//! whose `catalog.toml` names one of those and pins its checksum.

#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod json;
pub mod loader;
pub mod manifest;
pub mod paths;
pub mod report;
pub mod xml;

pub use error::CatalogError;
pub use json::{JsonCatalog, parse_json_catalog};
pub use loader::{LoadMode, LoadedCatalog, load_catalog, load_default_catalog, parse_catalog};
pub use manifest::{CatalogFormat, MANIFEST_FILE, Manifest, ManifestCatalog, load_manifest};
pub use paths::{CATALOG_ENV_VAR, default_catalog_path};
pub use report::CheckReport;
pub use xml::{XmlCatalog, join_image_path, parse_xml_catalog};
