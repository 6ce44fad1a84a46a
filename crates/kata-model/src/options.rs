//! Display options for the selector and thumbnail rows.

use serde::{Deserialize, Serialize};

use crate::ids::SENTINEL;

/// Image shown in a slot whose selector is unselected.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/select_s.png";

/// Options controlling how steps are displayed.
///
/// Every field has a default matching the legacy technique page, so a
/// partial `[display]` table in `catalog.toml` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    /// Text of the leading "no selection yet" option.
    pub sentinel_label: String,

    /// Image resource shown for unselected steps.
    pub placeholder_image: String,

    /// Marker identifying the thumbnail variant of an image resource.
    pub small_marker: String,

    /// Marker substituted for `small_marker` to obtain the preview variant.
    pub large_marker: String,

    /// Thumbnail width in pixels.
    pub thumbnail_width: u32,

    /// Thumbnail height in pixels.
    pub thumbnail_height: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            sentinel_label: SENTINEL.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            small_marker: "_s.".to_string(),
            large_marker: "_m.".to_string(),
            thumbnail_width: 170,
            thumbnail_height: 130,
        }
    }
}

impl DisplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.placeholder_image = image.into();
        self
    }

    pub fn with_markers(mut self, small: impl Into<String>, large: impl Into<String>) -> Self {
        self.small_marker = small.into();
        self.large_marker = large.into();
        self
    }

    /// Derive the large preview variant of a thumbnail resource.
    ///
    /// Only the first occurrence of the small marker is replaced; a source
    /// without the marker is returned unchanged.
    pub fn large_variant(&self, source: &str) -> String {
        if self.small_marker.is_empty() {
            return source.to_string();
        }
        source.replacen(&self.small_marker, &self.large_marker, 1)
    }
}
