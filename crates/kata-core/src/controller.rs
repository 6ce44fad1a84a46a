//! The cascade controller.
//!
//! The controller owns the ordered list of steps and is the only source of
//! truth for the widget; renderers project it, they never mutate it.

use std::collections::BTreeSet;
use std::sync::Arc;

use kata_model::{Catalog, DisplayOptions, Selection, ValueId};
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::error::{CascadeError, Result};
use crate::step::{ImageSource, Preview, Step};

/// How a selection change left the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CascadeEnd {
    /// The last chosen value has no further transitions.
    Terminal,
    /// A selector with several candidates waits at `step`.
    AwaitingChoice { step: usize },
    /// The changed selector was reset to the sentinel.
    Unselected { step: usize },
}

/// Summary of one `on_selection_changed` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeOutcome {
    /// Number of downstream steps removed.
    pub pruned: usize,
    /// Indices of the steps inserted, in order.
    pub inserted: Vec<usize>,
    /// Values picked automatically because they were the only candidate.
    pub auto_selected: Vec<ValueId>,
    pub end: CascadeEnd,
}

impl CascadeOutcome {
    /// Number of consecutive single-candidate steps that were auto-selected.
    pub fn cascade_depth(&self) -> usize {
        self.auto_selected.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.end == CascadeEnd::Terminal
    }
}

/// Steps computed for a change before they are committed.
struct Plan {
    image: ImageSource,
    tail: Vec<Step>,
    auto_selected: Vec<ValueId>,
    end: CascadeEnd,
}

#[derive(Debug, Clone)]
pub struct CascadeController {
    catalog: Arc<Catalog>,
    options: DisplayOptions,
    steps: Vec<Step>,
    preview: Preview,
}

impl CascadeController {
    /// Materialise step 0 from the catalog's initial list.
    ///
    /// A single initial candidate is selected and cascaded immediately, which
    /// is why construction can fail on a cyclic catalog.
    pub fn new(catalog: Arc<Catalog>, options: DisplayOptions) -> Result<Self> {
        let steps = initial_steps(&catalog)?;
        Ok(Self {
            catalog,
            options,
            steps,
            preview: Preview::default(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Chosen values from step 0 up to the first unselected step.
    pub fn path(&self) -> Vec<&ValueId> {
        self.steps.iter().map_while(Step::value).collect()
    }

    /// Index of the step waiting for a choice, if any.
    pub fn open_step(&self) -> Option<usize> {
        self.steps
            .last()
            .filter(|step| step.selection().is_unselected())
            .map(|step| step.index)
    }

    /// True when the last step holds a terminal value.
    pub fn is_complete(&self) -> bool {
        self.steps
            .last()
            .and_then(Step::value)
            .is_some_and(|value| self.catalog.is_terminal(value.as_str()))
    }

    /// Handle a change of the selector at `step`.
    ///
    /// Removes every later step, updates the thumbnail at `step`, appends
    /// the next selector when the chosen value has transitions and keeps
    /// auto-selecting while a step offers exactly one candidate.
    pub fn on_selection_changed(
        &mut self,
        step: usize,
        selection: Selection,
    ) -> Result<CascadeOutcome> {
        let span = debug_span!("selection_changed", step, value = %selection);
        let _guard = span.enter();

        let len = self.steps.len();
        let current = self
            .steps
            .get(step)
            .ok_or(CascadeError::InvalidStep { step, len })?;
        match &selection {
            Selection::Value(value) if !current.selector.offers(value) => {
                return Err(CascadeError::NotACandidate {
                    step,
                    value: value.clone(),
                });
            }
            // A sole candidate stays selected.
            Selection::Unselected if !current.selector.shows_sentinel() => {
                return Err(CascadeError::SentinelNotOffered { step });
            }
            _ => {}
        }

        let plan = plan_cascade(&self.catalog, step, &selection)?;

        let pruned = len - step - 1;
        self.steps.truncate(step + 1);
        if let Some(current) = self.steps.last_mut() {
            current.selector.selection = selection;
            current.image.source = plan.image;
        }
        let inserted: Vec<usize> = plan.tail.iter().map(|s| s.index).collect();
        self.steps.extend(plan.tail);

        debug!(
            pruned,
            inserted = inserted.len(),
            auto_selected = plan.auto_selected.len(),
            "selection applied"
        );
        Ok(CascadeOutcome {
            pruned,
            inserted,
            auto_selected: plan.auto_selected,
            end: plan.end,
        })
    }

    /// Point the shared preview at the large variant of a thumbnail.
    ///
    /// Steps are never touched.
    pub fn on_thumbnail_hover(&mut self, step: usize) -> Result<&Preview> {
        let len = self.steps.len();
        let slot = self
            .steps
            .get(step)
            .ok_or(CascadeError::InvalidStep { step, len })?;
        self.preview = Preview::of_thumbnail(&slot.image.source, &self.options);
        debug!(step, preview = ?self.preview, "thumbnail hovered");
        Ok(&self.preview)
    }

    /// Apply values one after another, each at the currently open step.
    ///
    /// Either every value is applied or the controller is left unchanged.
    pub fn select_path<'a, I>(&mut self, values: I) -> Result<Vec<CascadeOutcome>>
    where
        I: IntoIterator<Item = &'a ValueId>,
    {
        let mut working = self.clone();
        let mut outcomes = Vec::new();
        for value in values {
            let step = working
                .open_step()
                .ok_or_else(|| CascadeError::NoOpenStep {
                    value: value.clone(),
                })?;
            outcomes.push(working.on_selection_changed(step, Selection::Value(value.clone()))?);
        }
        *self = working;
        Ok(outcomes)
    }

    /// Return to the state right after construction.
    pub fn reset(&mut self) -> Result<()> {
        self.steps = initial_steps(&self.catalog)?;
        self.preview = Preview::default();
        Ok(())
    }
}

fn initial_steps(catalog: &Catalog) -> Result<Vec<Step>> {
    let mut first = Step::open(0, catalog.initial().to_vec());
    let [sole] = catalog.initial() else {
        return Ok(vec![first]);
    };
    let selection = Selection::Value(sole.clone());
    let plan = plan_cascade(catalog, 0, &selection)?;
    first.selector.selection = selection;
    first.image.source = plan.image;
    let mut steps = vec![first];
    steps.extend(plan.tail);
    Ok(steps)
}

/// Compute the image for `step` and the steps that follow it.
///
/// Runs as a loop rather than recursion; a value seen twice in one run
/// means the single-option transitions form a cycle.
fn plan_cascade(catalog: &Catalog, step: usize, selection: &Selection) -> Result<Plan> {
    let image = ImageSource::for_selection(catalog, selection);
    let Selection::Value(first) = selection else {
        return Ok(Plan {
            image,
            tail: Vec::new(),
            auto_selected: Vec::new(),
            end: CascadeEnd::Unselected { step },
        });
    };

    let mut tail = Vec::new();
    let mut auto_selected = Vec::new();
    let mut visited: BTreeSet<&ValueId> = BTreeSet::new();
    let mut index = step;
    let mut value = first;
    let end = loop {
        if !visited.insert(value) {
            return Err(CascadeError::CyclicTransition {
                value: value.clone(),
                step: index,
            });
        }
        let candidates = catalog.candidates_after(value.as_str());
        if candidates.is_empty() {
            break CascadeEnd::Terminal;
        }
        index += 1;
        let mut next = Step::open(index, candidates.to_vec());
        match candidates {
            [sole] => {
                let selection = Selection::Value(sole.clone());
                next.image.source = ImageSource::for_selection(catalog, &selection);
                next.selector.selection = selection;
                debug!(step = index, value = %sole, "auto-selected sole candidate");
                tail.push(next);
                auto_selected.push(sole.clone());
                value = sole;
            }
            _ => {
                debug!(step = index, candidates = candidates.len(), "selector inserted");
                tail.push(next);
                break CascadeEnd::AwaitingChoice { step: index };
            }
        }
    };

    Ok(Plan {
        image,
        tail,
        auto_selected,
        end,
    })
}
