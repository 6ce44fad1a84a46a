#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ids::ValueId;

/// Immutable technique catalog: the initial list plus the transition, label,
/// image and description tables.
///
/// A catalog is assembled once through [`CatalogBuilder`] and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    initial: Vec<ValueId>,
    transitions: BTreeMap<ValueId, Vec<ValueId>>,
    labels: BTreeMap<ValueId, String>,
    images: BTreeMap<ValueId, String>,
    descriptions: BTreeMap<ValueId, String>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Candidates of step 0.
    pub fn initial(&self) -> &[ValueId] {
        &self.initial
    }

    /// Transition entry for a value, `None` when the value has no key.
    pub fn next(&self, value: &str) -> Option<&[ValueId]> {
        self.transitions.get(value).map(Vec::as_slice)
    }

    /// Candidates following a value; empty for terminal values.
    pub fn candidates_after(&self, value: &str) -> &[ValueId] {
        self.next(value).unwrap_or(&[])
    }

    /// A value is terminal when it has no key or an empty list.
    pub fn is_terminal(&self, value: &str) -> bool {
        self.candidates_after(value).is_empty()
    }

    pub fn label(&self, value: &str) -> Option<&str> {
        self.labels.get(value).map(String::as_str)
    }

    /// Label used for display; falls back to the raw id.
    pub fn display_label<'a>(&'a self, value: &'a ValueId) -> &'a str {
        self.label(value.as_str()).unwrap_or(value.as_str())
    }

    pub fn image(&self, value: &str) -> Option<&str> {
        self.images.get(value).map(String::as_str)
    }

    pub fn description(&self, value: &str) -> Option<&str> {
        self.descriptions.get(value).map(String::as_str)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&ValueId, &[ValueId])> {
        self.transitions
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }

    pub fn labels(&self) -> &BTreeMap<ValueId, String> {
        &self.labels
    }

    pub fn images(&self) -> &BTreeMap<ValueId, String> {
        &self.images
    }

    pub fn descriptions(&self) -> &BTreeMap<ValueId, String> {
        &self.descriptions
    }

    /// Every value that can appear in a selector: the initial list and all
    /// transition targets.
    pub fn referenced_values(&self) -> BTreeSet<&ValueId> {
        let mut values: BTreeSet<&ValueId> = self.initial.iter().collect();
        for targets in self.transitions.values() {
            values.extend(targets.iter());
        }
        values
    }

    /// Every id known to any table.
    pub fn all_values(&self) -> BTreeSet<&ValueId> {
        let mut values = self.referenced_values();
        values.extend(self.transitions.keys());
        values.extend(self.labels.keys());
        values.extend(self.images.keys());
        values.extend(self.descriptions.keys());
        values
    }

    pub fn summary(&self) -> CatalogSummary {
        let values = self.all_values();
        let terminal = values
            .iter()
            .filter(|value| self.is_terminal(value.as_str()))
            .count();
        CatalogSummary {
            value_count: values.len(),
            initial_count: self.initial.len(),
            transition_count: self.transitions.len(),
            terminal_count: terminal,
            label_count: self.labels.len(),
            image_count: self.images.len(),
            description_count: self.descriptions.len(),
        }
    }
}

/// Counts describing a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub value_count: usize,
    pub initial_count: usize,
    pub transition_count: usize,
    pub terminal_count: usize,
    pub label_count: usize,
    pub image_count: usize,
    pub description_count: usize,
}

/// Mutable staging area for a [`Catalog`].
///
/// Setting an entry twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn initial(mut self, values: impl IntoIterator<Item = ValueId>) -> Self {
        self.set_initial(values);
        self
    }

    pub fn set_initial(&mut self, values: impl IntoIterator<Item = ValueId>) -> &mut Self {
        self.catalog.initial = values.into_iter().collect();
        self
    }

    pub fn push_initial(&mut self, value: ValueId) -> &mut Self {
        self.catalog.initial.push(value);
        self
    }

    pub fn transition(
        mut self,
        value: ValueId,
        next: impl IntoIterator<Item = ValueId>,
    ) -> Self {
        self.set_transition(value, next);
        self
    }

    pub fn set_transition(
        &mut self,
        value: ValueId,
        next: impl IntoIterator<Item = ValueId>,
    ) -> &mut Self {
        self.catalog
            .transitions
            .insert(value, next.into_iter().collect());
        self
    }

    pub fn label(mut self, value: ValueId, label: impl Into<String>) -> Self {
        self.set_label(value, label);
        self
    }

    pub fn set_label(&mut self, value: ValueId, label: impl Into<String>) -> &mut Self {
        self.catalog.labels.insert(value, label.into());
        self
    }

    pub fn image(mut self, value: ValueId, image: impl Into<String>) -> Self {
        self.set_image(value, image);
        self
    }

    pub fn set_image(&mut self, value: ValueId, image: impl Into<String>) -> &mut Self {
        self.catalog.images.insert(value, image.into());
        self
    }

    pub fn description(mut self, value: ValueId, description: impl Into<String>) -> Self {
        self.set_description(value, description);
        self
    }

    pub fn set_description(
        &mut self,
        value: ValueId,
        description: impl Into<String>,
    ) -> &mut Self {
        self.catalog.descriptions.insert(value, description.into());
        self
    }

    pub fn contains_definition(&self, value: &str) -> bool {
        self.catalog.labels.contains_key(value)
            || self.catalog.images.contains_key(value)
            || self.catalog.transitions.contains_key(value)
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}
