//! Step records: one selector and one image slot per position.

use kata_model::{Catalog, DisplayOptions, Selection, ValueId};
use serde::Serialize;

/// Source of an image slot or of the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ImageSource {
    /// The "nothing selected" image from [`DisplayOptions::placeholder_image`].
    Placeholder,
    /// A resolved image resource.
    Image(String),
    /// The value has no image table entry; rendered as a broken image.
    Missing(ValueId),
}

impl ImageSource {
    /// Resolve the thumbnail source for a selection.
    pub fn for_selection(catalog: &Catalog, selection: &Selection) -> Self {
        match selection {
            Selection::Unselected => Self::Placeholder,
            Selection::Value(value) => match catalog.image(value.as_str()) {
                Some(path) => Self::Image(path.to_string()),
                None => {
                    tracing::warn!(value = %value, "no image for selected value");
                    Self::Missing(value.clone())
                }
            },
        }
    }

    /// Resource path to display, `None` for a missing image.
    pub fn src<'a>(&'a self, options: &'a DisplayOptions) -> Option<&'a str> {
        match self {
            Self::Placeholder => Some(&options.placeholder_image),
            Self::Image(path) => Some(path),
            Self::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// Shared large preview element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Preview {
    /// Whatever the page ships with; no thumbnail has been hovered yet.
    #[default]
    Initial,
    Image(String),
    Missing(ValueId),
}

impl Preview {
    /// Large variant of a thumbnail source.
    pub fn of_thumbnail(source: &ImageSource, options: &DisplayOptions) -> Self {
        match source {
            ImageSource::Placeholder => Self::Image(options.large_variant(&options.placeholder_image)),
            ImageSource::Image(path) => Self::Image(options.large_variant(path)),
            ImageSource::Missing(value) => Self::Missing(value.clone()),
        }
    }

    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Image(path) => Some(path),
            Self::Initial | Self::Missing(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// Values valid at this step, in display order.
    pub candidates: Vec<ValueId>,
    pub selection: Selection,
}

impl Selector {
    /// The sentinel option is only offered when there is a real choice.
    pub fn shows_sentinel(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn offers(&self, value: &ValueId) -> bool {
        self.candidates.contains(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlot {
    pub source: ImageSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: usize,
    pub selector: Selector,
    pub image: ImageSlot,
}

impl Step {
    /// A fresh step with nothing selected.
    pub fn open(index: usize, candidates: Vec<ValueId>) -> Self {
        Self {
            index,
            selector: Selector {
                candidates,
                selection: Selection::Unselected,
            },
            image: ImageSlot {
                source: ImageSource::Placeholder,
            },
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selector.selection
    }

    pub fn value(&self) -> Option<&ValueId> {
        self.selector.selection.value()
    }

    /// Options as the selector displays them: the sentinel first when there
    /// is more than one candidate, then each candidate with its label.
    pub fn options(&self, catalog: &Catalog, display: &DisplayOptions) -> Vec<SelectOption> {
        let mut options = Vec::with_capacity(self.selector.candidates.len() + 1);
        if self.selector.shows_sentinel() {
            options.push(SelectOption {
                value: Selection::Unselected,
                label: display.sentinel_label.clone(),
                title: None,
                selected: self.selector.selection.is_unselected(),
                label_missing: false,
            });
        }
        for candidate in &self.selector.candidates {
            let label = catalog.label(candidate.as_str());
            options.push(SelectOption {
                value: Selection::Value(candidate.clone()),
                label: label.unwrap_or(candidate.as_str()).to_string(),
                title: catalog.description(candidate.as_str()).map(str::to_string),
                selected: self.value() == Some(candidate),
                label_missing: label.is_none(),
            });
        }
        options
    }
}

/// One displayed option of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: Selection,
    pub label: String,
    /// Description shown as a tooltip.
    pub title: Option<String>,
    pub selected: bool,
    /// True when the label table had no entry and the raw id is shown.
    pub label_missing: bool,
}
