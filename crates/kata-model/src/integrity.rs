//! Referential integrity checks for a [`Catalog`].
//!
//! The catalog data is supplied externally, so consistency is checked once
//! when it is loaded instead of at selection time.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::ids::ValueId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmptyInitial,
    MissingImage,
    MissingLabel,
    EmptyLabel,
    DuplicateCandidate,
    SingleOptionCycle,
    Unreachable,
    DuplicateDefinition,
    MissingId,
}

impl IssueKind {
    pub fn severity(self) -> IssueSeverity {
        match self {
            Self::EmptyInitial
            | Self::MissingImage
            | Self::DuplicateCandidate
            | Self::SingleOptionCycle => IssueSeverity::Error,
            Self::MissingLabel
            | Self::EmptyLabel
            | Self::Unreachable
            | Self::DuplicateDefinition
            | Self::MissingId => IssueSeverity::Warning,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyInitial => "KT001",
            Self::MissingImage => "KT002",
            Self::MissingLabel => "KT003",
            Self::EmptyLabel => "KT004",
            Self::DuplicateCandidate => "KT005",
            Self::SingleOptionCycle => "KT006",
            Self::Unreachable => "KT007",
            Self::DuplicateDefinition => "KT008",
            Self::MissingId => "KT009",
        }
    }
}

/// A single integrity finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    /// Value the issue is about, if any.
    pub value: Option<ValueId>,
    /// Human-readable message.
    pub message: String,
}

impl IntegrityIssue {
    pub fn new(kind: IssueKind, value: Option<ValueId>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            value,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &IntegrityIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    pub fn push(&mut self, issue: IntegrityIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: IntegrityReport) {
        self.issues.extend(other.issues);
    }
}

/// Run every integrity check against a catalog.
pub fn validate_catalog(catalog: &Catalog) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    if catalog.initial().is_empty() {
        report.push(IntegrityIssue::new(
            IssueKind::EmptyInitial,
            None,
            "initial list is empty; step 0 has no candidates",
        ));
    }

    check_duplicates(None, catalog.initial(), &mut report);
    for (owner, targets) in catalog.transitions() {
        check_duplicates(Some(owner), targets, &mut report);
    }

    for value in catalog.referenced_values() {
        if catalog.image(value.as_str()).is_none() {
            report.push(IntegrityIssue::new(
                IssueKind::MissingImage,
                Some(value.clone()),
                format!("no image for {value}"),
            ));
        }
        match catalog.label(value.as_str()) {
            None => report.push(IntegrityIssue::new(
                IssueKind::MissingLabel,
                Some(value.clone()),
                format!("no label for {value}"),
            )),
            Some(label) if label.trim().is_empty() => report.push(IntegrityIssue::new(
                IssueKind::EmptyLabel,
                Some(value.clone()),
                format!("empty label for {value}"),
            )),
            Some(_) => {}
        }
    }

    for cycle in single_option_cycles(catalog) {
        let path = cycle
            .iter()
            .map(ValueId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        report.push(IntegrityIssue::new(
            IssueKind::SingleOptionCycle,
            cycle.first().cloned(),
            format!("single-option cycle: {path} -> {}", cycle[0]),
        ));
    }

    let reachable = reachable_values(catalog);
    for (key, _) in catalog.transitions() {
        if !reachable.contains(key) {
            report.push(IntegrityIssue::new(
                IssueKind::Unreachable,
                Some(key.clone()),
                format!("{key} has transitions but is never offered"),
            ));
        }
    }

    report
}

fn check_duplicates(owner: Option<&ValueId>, values: &[ValueId], report: &mut IntegrityReport) {
    let mut seen = BTreeSet::new();
    for value in values {
        if !seen.insert(value) {
            let list = owner.map_or_else(|| "initial list".to_string(), |o| format!("list of {o}"));
            report.push(IntegrityIssue::new(
                IssueKind::DuplicateCandidate,
                Some(value.clone()),
                format!("{value} appears more than once in the {list}"),
            ));
        }
    }
}

/// Values reachable from the initial list through any transition.
fn reachable_values(catalog: &Catalog) -> BTreeSet<&ValueId> {
    let mut seen: BTreeSet<&ValueId> = BTreeSet::new();
    let mut stack: Vec<&ValueId> = catalog.initial().iter().collect();
    while let Some(value) = stack.pop() {
        if !seen.insert(value) {
            continue;
        }
        stack.extend(catalog.candidates_after(value.as_str()));
    }
    seen
}

/// Cycles in the graph restricted to single-candidate entries.
///
/// Each cycle is returned once, rotated so that it starts at its smallest id.
pub fn single_option_cycles(catalog: &Catalog) -> Vec<Vec<ValueId>> {
    let sole_next: BTreeMap<&ValueId, &ValueId> = catalog
        .transitions()
        .filter_map(|(key, targets)| match targets {
            [only] => Some((key, only)),
            _ => None,
        })
        .collect();

    let mut done: BTreeSet<&ValueId> = BTreeSet::new();
    let mut cycles = Vec::new();
    for &start in sole_next.keys() {
        if done.contains(start) {
            continue;
        }
        let mut chain: Vec<&ValueId> = Vec::new();
        let mut position: BTreeMap<&ValueId, usize> = BTreeMap::new();
        let mut current = Some(start);
        while let Some(value) = current {
            if done.contains(value) {
                break;
            }
            if let Some(&index) = position.get(value) {
                let mut cycle: Vec<ValueId> = chain[index..].iter().map(|v| (*v).clone()).collect();
                if let Some(min_index) = cycle
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1.cmp(b.1))
                    .map(|(idx, _)| idx)
                {
                    cycle.rotate_left(min_index);
                }
                cycles.push(cycle);
                break;
            }
            position.insert(value, chain.len());
            chain.push(value);
            current = sole_next.get(value).copied();
        }
        done.extend(chain);
    }
    cycles.sort();
    cycles
}
