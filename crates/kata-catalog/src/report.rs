#![deny(unsafe_code)]

use kata_model::{CatalogSummary, IntegrityIssue};

use crate::loader::LoadedCatalog;
use crate::manifest::CatalogFormat;

/// Machine-readable result of `kata check`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub schema: String,
    pub schema_version: u32,
    pub source: String,
    pub format: CatalogFormat,
    pub summary: CatalogSummary,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl CheckReport {
    pub fn from_loaded(loaded: &LoadedCatalog) -> Self {
        Self {
            schema: "kata.catalog-check".to_string(),
            schema_version: 1,
            source: loaded.source.display().to_string(),
            format: loaded.format,
            summary: loaded.catalog.summary(),
            error_count: loaded.report.error_count(),
            warning_count: loaded.report.warning_count(),
            issues: loaded.report.issues.clone(),
        }
    }

    pub fn passed(&self) -> bool {
        self.error_count == 0
    }
}
