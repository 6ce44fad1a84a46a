//! JSON technique tables, mirroring the arrays of the legacy page script.

use std::collections::BTreeMap;
use std::path::Path;

use kata_model::{Catalog, ValueId};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::xml::join_image_path;

/// On-disk JSON layout.
///
/// ```json
/// {
///   "imgpath": "images/",
///   "initial": ["shomenuchi"],
///   "next": { "shomenuchi": ["iriminage", "kotegaeshi"] },
///   "label": { "shomenuchi": "Shomen uchi" },
///   "img": { "shomenuchi": "shomenuchi_s.png" },
///   "desc": {}
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonCatalog {
    #[serde(default)]
    pub imgpath: String,
    pub initial: Vec<ValueId>,
    #[serde(default)]
    pub next: BTreeMap<ValueId, Vec<ValueId>>,
    #[serde(default)]
    pub label: BTreeMap<ValueId, String>,
    #[serde(default)]
    pub img: BTreeMap<ValueId, String>,
    #[serde(default)]
    pub desc: BTreeMap<ValueId, String>,
}

impl JsonCatalog {
    pub fn into_catalog(self) -> Catalog {
        let mut builder = Catalog::builder().initial(self.initial);
        for (value, next) in self.next {
            builder.set_transition(value, next);
        }
        for (value, label) in self.label {
            builder.set_label(value, label);
        }
        for (value, img) in self.img {
            builder.set_image(value, join_image_path(&self.imgpath, &img));
        }
        for (value, desc) in self.desc {
            builder.set_description(value, desc);
        }
        builder.build()
    }
}

pub fn parse_json_catalog(text: &str, path: &Path) -> Result<Catalog, CatalogError> {
    let tables: JsonCatalog = serde_json::from_str(text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tables.into_catalog())
}
