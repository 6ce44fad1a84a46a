//! Catalog and controller plumbing shared by the commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use kata_catalog::{LoadMode, LoadedCatalog, default_catalog_path, load_catalog};
use kata_core::{CascadeController, CascadeOutcome};
use kata_model::{Catalog, DisplayOptions, Selection, ValueId};

/// Catalog location given on the command line, or the default one.
pub fn catalog_path(arg: Option<&Path>) -> PathBuf {
    arg.map_or_else(default_catalog_path, Path::to_path_buf)
}

pub fn open_catalog(arg: Option<&Path>, mode: LoadMode) -> Result<LoadedCatalog> {
    let path = catalog_path(arg);
    load_catalog(&path, mode).with_context(|| format!("load catalog {}", path.display()))
}

/// Display options from the catalog manifest with command-line overrides.
pub fn display_options(loaded: &LoadedCatalog, placeholder: Option<&str>) -> DisplayOptions {
    match placeholder {
        Some(image) => loaded.display.clone().with_placeholder_image(image),
        None => loaded.display.clone(),
    }
}

pub fn build_controller(
    loaded: &LoadedCatalog,
    placeholder: Option<&str>,
) -> Result<CascadeController> {
    let options = display_options(loaded, placeholder);
    CascadeController::new(Arc::new(loaded.catalog.clone()), options)
        .context("initialise technique selector")
}

/// Apply raw values in order, each at the currently open step.
pub fn apply_values(
    controller: &mut CascadeController,
    values: &[String],
) -> Result<Vec<CascadeOutcome>> {
    let ids = parse_values(values)?;
    let outcomes = controller
        .select_path(&ids)
        .context("apply selections")?;
    info!(
        selected = ids.len(),
        steps = controller.steps().len(),
        complete = controller.is_complete(),
        "selections applied"
    );
    Ok(outcomes)
}

/// Apply `STEP=VALUE` changes in order, each at the step it names.
///
/// `VALUE` may be the sentinel to clear that step. Either every change is
/// applied or the controller is left unchanged.
pub fn apply_step_changes(
    controller: &mut CascadeController,
    changes: &[String],
) -> Result<Vec<CascadeOutcome>> {
    let changes = changes
        .iter()
        .map(|raw| parse_step_change(raw))
        .collect::<Result<Vec<_>>>()?;
    let mut working = controller.clone();
    let mut outcomes = Vec::with_capacity(changes.len());
    for (step, selection) in changes {
        let outcome = working
            .on_selection_changed(step, selection.clone())
            .with_context(|| format!("change step {step} to {selection}"))?;
        outcomes.push(outcome);
    }
    *controller = working;
    info!(
        changed = outcomes.len(),
        steps = controller.steps().len(),
        complete = controller.is_complete(),
        "step changes applied"
    );
    Ok(outcomes)
}

pub fn parse_step_change(raw: &str) -> Result<(usize, Selection)> {
    let Some((step, value)) = raw.split_once('=') else {
        bail!("expected STEP=VALUE, got {raw:?}");
    };
    let step = step
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid step in {raw:?}"))?;
    let selection = Selection::parse(value).with_context(|| format!("invalid value in {raw:?}"))?;
    Ok((step, selection))
}

pub fn parse_values(values: &[String]) -> Result<Vec<ValueId>> {
    values
        .iter()
        .map(|raw| ValueId::new(raw.as_str()).with_context(|| format!("invalid value {raw:?}")))
        .collect()
}

/// One candidate as listed by `kata values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub value: ValueId,
    pub label: String,
    pub label_missing: bool,
    pub image: Option<String>,
    pub description: Option<String>,
    pub terminal: bool,
}

/// Candidates of step 0, or the values that may follow `from`.
pub fn candidates(catalog: &Catalog, from: Option<&str>) -> Result<Vec<CandidateRow>> {
    let values = match from {
        None => catalog.initial(),
        Some(raw) => {
            let value = ValueId::new(raw).with_context(|| format!("invalid value {raw:?}"))?;
            if !catalog.all_values().contains(&value) {
                bail!("{value} is not in the catalog");
            }
            catalog.candidates_after(value.as_str())
        }
    };
    Ok(values
        .iter()
        .map(|value| {
            let label = catalog.label(value.as_str());
            CandidateRow {
                value: value.clone(),
                label: label.unwrap_or(value.as_str()).to_string(),
                label_missing: label.is_none(),
                image: catalog.image(value.as_str()).map(str::to_string),
                description: catalog.description(value.as_str()).map(str::to_string),
                terminal: catalog.is_terminal(value.as_str()),
            }
        })
        .collect())
}
