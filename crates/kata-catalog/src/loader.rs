use std::path::{Path, PathBuf};

use kata_model::{Catalog, DisplayOptions, IntegrityReport, IssueSeverity, validate_catalog};
use tracing::{info, info_span, warn};

use crate::error::CatalogError;
use crate::hash::{sha256_hex, sha256_matches};
use crate::json::parse_json_catalog;
use crate::manifest::{CatalogFormat, MANIFEST_FILE, load_manifest};
use crate::paths::default_catalog_path;
use crate::xml::parse_xml_catalog;

/// What to do with a catalog that has error-severity integrity issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Refuse to load it.
    #[default]
    Strict,
    /// Load it anyway and log every issue; the widget shows broken entries.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub report: IntegrityReport,
    pub display: DisplayOptions,
    pub source: PathBuf,
    pub format: CatalogFormat,
}

struct Resolved {
    source: PathBuf,
    format: CatalogFormat,
    display: DisplayOptions,
    sha256: Option<String>,
}

pub fn load_default_catalog(mode: LoadMode) -> Result<LoadedCatalog, CatalogError> {
    load_catalog(&default_catalog_path(), mode)
}

/// Load a catalog from a directory with `catalog.toml`, a manifest file, or
/// an XML/JSON source file.
pub fn load_catalog(path: &Path, mode: LoadMode) -> Result<LoadedCatalog, CatalogError> {
    let span = info_span!("load_catalog", path = %path.display());
    let _guard = span.enter();

    let resolved = resolve(path)?;
    let bytes =
        std::fs::read(&resolved.source).map_err(|e| CatalogError::io(&resolved.source, e))?;
    if let Some(expected) = &resolved.sha256 {
        if !sha256_matches(expected, &bytes) {
            return Err(CatalogError::Sha256Mismatch {
                path: resolved.source.clone(),
                expected: expected.trim().to_ascii_lowercase(),
                actual: sha256_hex(&bytes),
            });
        }
    }
    let text = String::from_utf8(bytes).map_err(|e| {
        CatalogError::io(
            &resolved.source,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    let (catalog, report) = parse_catalog(&text, resolved.format, &resolved.source)?;
    let summary = catalog.summary();
    info!(
        source = %resolved.source.display(),
        format = resolved.format.as_str(),
        values = summary.value_count,
        transitions = summary.transition_count,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "catalog loaded"
    );

    if mode == LoadMode::Strict && report.has_errors() {
        let first = report
            .issues
            .iter()
            .find(|issue| issue.severity == IssueSeverity::Error)
            .map(|issue| issue.message.clone())
            .unwrap_or_default();
        return Err(CatalogError::Integrity {
            path: resolved.source,
            errors: report.error_count(),
            first,
        });
    }
    for issue in &report.issues {
        warn!(code = issue.kind.code(), "{}", issue.message);
    }

    Ok(LoadedCatalog {
        catalog,
        report,
        display: resolved.display,
        source: resolved.source,
        format: resolved.format,
    })
}

/// Parse catalog text and run the integrity checks.
///
/// Structural findings from parsing come first in the report.
pub fn parse_catalog(
    text: &str,
    format: CatalogFormat,
    path: &Path,
) -> Result<(Catalog, IntegrityReport), CatalogError> {
    let (catalog, mut report) = match format {
        CatalogFormat::Xml => {
            let parsed = parse_xml_catalog(text, path)?;
            (parsed.catalog, parsed.issues)
        }
        CatalogFormat::Json => (parse_json_catalog(text, path)?, IntegrityReport::default()),
    };
    report.extend(validate_catalog(&catalog));
    Ok((catalog, report))
}

fn resolve(path: &Path) -> Result<Resolved, CatalogError> {
    let manifest_path = if path.is_dir() {
        Some(path.join(MANIFEST_FILE))
    } else if path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILE) {
        Some(path.to_path_buf())
    } else {
        None
    };

    if let Some(manifest_path) = manifest_path {
        let manifest = load_manifest(&manifest_path)?;
        return Ok(Resolved {
            source: manifest.source_path(&manifest_path)?,
            format: manifest.format(&manifest_path)?,
            display: manifest.display,
            sha256: manifest.catalog.sha256,
        });
    }

    let format = CatalogFormat::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: path.to_path_buf(),
        message: "expected a .xml or .json file, or a directory with catalog.toml".to_string(),
    })?;
    Ok(Resolved {
        source: path.to_path_buf(),
        format,
        display: DisplayOptions::default(),
        sha256: None,
    })
}
