//! Property tests over randomly generated catalogs.

use std::sync::Arc;

use kata_core::{CascadeController, CascadeEnd, CascadeError};
use kata_model::{Catalog, DisplayOptions, Selection, ValueId};
use proptest::prelude::*;

fn id(index: usize) -> ValueId {
    ValueId::new(format!("v{index}")).unwrap()
}

fn dedup(indices: Vec<usize>) -> Vec<ValueId> {
    let mut seen = Vec::new();
    for index in indices {
        if !seen.contains(&index) {
            seen.push(index);
        }
    }
    seen.into_iter().map(id).collect()
}

/// Catalogs over `v0..vN`, possibly with cycles and terminal values.
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (2usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(0..n, 1..4),
                prop::collection::vec(prop::option::of(prop::collection::vec(0..n, 0..4)), n),
            )
        })
        .prop_map(|(initial, lists)| {
            let mut builder = Catalog::builder().initial(dedup(initial));
            for (index, list) in lists.into_iter().enumerate() {
                builder = builder
                    .label(id(index), format!("label {index}"))
                    .image(id(index), format!("img/v{index}_s.png"));
                if let Some(list) = list {
                    builder = builder.transition(id(index), dedup(list));
                }
            }
            builder.build()
        })
}

/// Each action picks a step and a candidate; one past the last candidate
/// means the sentinel.
fn arb_actions() -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0usize..16, 0usize..8, any::<bool>()), 1..24)
}

fn assert_consistent(ctl: &CascadeController) -> Result<(), TestCaseError> {
    let catalog = ctl.catalog();
    let steps = ctl.steps();
    prop_assert!(!steps.is_empty());
    prop_assert_eq!(&steps[0].selector.candidates[..], catalog.initial());
    for (position, step) in steps.iter().enumerate() {
        prop_assert_eq!(step.index, position);
        prop_assert!(
            step.selector.candidates.len() != 1
                || step.value() == step.selector.candidates.first(),
            "a sole candidate at step {} is not selected",
            position
        );
    }
    for pair in steps.windows(2) {
        let previous = pair[0].value();
        prop_assert!(previous.is_some(), "an unselected step has successors");
        let expected = catalog.candidates_after(previous.unwrap().as_str());
        prop_assert_eq!(&pair[1].selector.candidates[..], expected);
    }
    if let Some(last) = steps.last() {
        if let Some(value) = last.value() {
            prop_assert!(catalog.is_terminal(value.as_str()));
        } else {
            prop_assert!(last.image.source == kata_core::ImageSource::Placeholder);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn cascade_keeps_steps_consistent(catalog in arb_catalog(), actions in arb_actions()) {
        let catalog = Arc::new(catalog);
        let Ok(mut ctl) = CascadeController::new(Arc::clone(&catalog), DisplayOptions::default()) else {
            // Only a cycle reachable from a sole initial value can fail here.
            prop_assert_eq!(catalog.initial().len(), 1);
            return Ok(());
        };
        assert_consistent(&ctl)?;

        for (step_seed, choice_seed, hover) in actions {
            let step = step_seed % ctl.steps().len();
            if hover {
                let before = ctl.steps().to_vec();
                ctl.on_thumbnail_hover(step).unwrap();
                prop_assert_eq!(ctl.steps(), before.as_slice());
                continue;
            }

            let candidates = ctl.steps()[step].selector.candidates.clone();
            let choice = choice_seed % (candidates.len() + 1);
            let selection = candidates
                .get(choice)
                .cloned()
                .map_or(Selection::Unselected, Selection::Value);

            let before = ctl.steps().to_vec();
            let sentinel_offered = ctl.steps()[step].selector.shows_sentinel();
            match ctl.on_selection_changed(step, selection.clone()) {
                Ok(_) if selection.is_unselected() && !sentinel_offered => {
                    prop_assert!(false, "sentinel accepted at step {} without a sentinel option", step);
                }
                Ok(outcome) => {
                    prop_assert_eq!(outcome.pruned, before.len() - step - 1);
                    prop_assert_eq!(ctl.steps().len(), step + 1 + outcome.inserted.len());
                    let expected: Vec<usize> = (step + 1..ctl.steps().len()).collect();
                    prop_assert_eq!(&outcome.inserted, &expected);

                    // Every inserted step but an awaiting last one was auto-selected.
                    let singles = ctl.steps()[step + 1..]
                        .iter()
                        .filter(|s| s.selector.candidates.len() == 1)
                        .count();
                    prop_assert_eq!(outcome.cascade_depth(), singles);

                    match (&selection, outcome.end) {
                        (Selection::Unselected, end) => {
                            prop_assert_eq!(end, CascadeEnd::Unselected { step });
                            prop_assert_eq!(ctl.steps().len(), step + 1);
                        }
                        (Selection::Value(value), CascadeEnd::Terminal) => {
                            if catalog.is_terminal(value.as_str()) {
                                prop_assert!(outcome.inserted.is_empty());
                            }
                        }
                        (Selection::Value(_), CascadeEnd::AwaitingChoice { step: open }) => {
                            prop_assert_eq!(Some(open), ctl.open_step());
                            prop_assert!(ctl.steps()[open].selector.candidates.len() > 1);
                        }
                        (Selection::Value(_), CascadeEnd::Unselected { .. }) => {
                            prop_assert!(false, "a value selection cannot end unselected");
                        }
                    }
                    assert_consistent(&ctl)?;
                }
                Err(CascadeError::CyclicTransition { .. }) => {
                    prop_assert_eq!(ctl.steps(), before.as_slice());
                }
                Err(CascadeError::SentinelNotOffered { step: rejected }) => {
                    prop_assert_eq!(rejected, step);
                    prop_assert!(!sentinel_offered);
                    prop_assert_eq!(ctl.steps(), before.as_slice());
                }
                Err(other) => {
                    prop_assert!(false, "unexpected error: {other}");
                }
            }
        }
    }

    #[test]
    fn next_step_exists_iff_transition_is_non_empty(catalog in arb_catalog(), pick in 0usize..4) {
        let catalog = Arc::new(catalog);
        let Ok(mut ctl) = CascadeController::new(Arc::clone(&catalog), DisplayOptions::default()) else {
            return Ok(());
        };
        if catalog.initial().len() == 1 {
            return Ok(());
        }
        let value = catalog.initial()[pick % catalog.initial().len()].clone();
        if let Ok(outcome) = ctl.on_selection_changed(0, Selection::Value(value.clone())) {
            let has_next = !catalog.is_terminal(value.as_str());
            prop_assert_eq!(ctl.steps().len() > 1, has_next);
            prop_assert_eq!(outcome.inserted.first().copied(), has_next.then_some(1));
        }
    }
}
