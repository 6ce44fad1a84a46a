use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kata_catalog::{CheckReport, LoadMode};
use kata_cli::session::{
    apply_step_changes, apply_values, build_controller, candidates, open_catalog,
};
use kata_render::{RenderOptions, export_js, export_js_no_timestamp, render_widget};

use crate::cli::{CheckArgs, ExportJsArgs, RenderArgs, ValuesArgs, WalkArgs};
use crate::summary::{print_candidates, print_check_report, print_preview, print_steps};

/// Options shared by every command.
pub struct GlobalOptions {
    pub mode: LoadMode,
    pub placeholder: Option<String>,
}

/// Returns whether the catalog passed.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let span = info_span!("check");
    let _guard = span.enter();
    // Lenient, so catalogs with errors still get a full report.
    let loaded = open_catalog(args.catalog.as_deref(), LoadMode::Lenient)?;
    let report = CheckReport::from_loaded(&loaded);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize check report")?;
        println!("{json}");
    } else {
        print_check_report(&report);
    }
    let passed = if args.strict {
        report.issues.is_empty()
    } else {
        report.passed()
    };
    info!(
        passed,
        errors = report.error_count,
        warnings = report.warning_count,
        "check finished"
    );
    Ok(passed)
}

pub fn run_values(args: &ValuesArgs, global: &GlobalOptions) -> Result<()> {
    let loaded = open_catalog(args.catalog.as_deref(), global.mode)?;
    let rows = candidates(&loaded.catalog, args.from.as_deref())?;
    if rows.is_empty() {
        println!("No further techniques.");
        return Ok(());
    }
    print_candidates(&rows);
    Ok(())
}

pub fn run_walk(args: &WalkArgs, global: &GlobalOptions) -> Result<()> {
    let span = info_span!("walk", values = args.values.len());
    let _guard = span.enter();
    let loaded = open_catalog(args.catalog.catalog.as_deref(), global.mode)?;
    let mut controller = build_controller(&loaded, global.placeholder.as_deref())?;
    apply_values(&mut controller, &args.values)?;
    for outcome in apply_step_changes(&mut controller, &args.at)? {
        if outcome.pruned > 0 {
            println!("Pruned {} later step(s)", outcome.pruned);
        }
    }
    print_steps(&controller);
    if let Some(step) = args.hover {
        let preview = controller
            .on_thumbnail_hover(step)
            .with_context(|| format!("hover thumbnail of step {step}"))?;
        print_preview(preview);
    }
    Ok(())
}

pub fn run_render(args: &RenderArgs, global: &GlobalOptions) -> Result<()> {
    let span = info_span!("render");
    let _guard = span.enter();
    let loaded = open_catalog(args.catalog.as_deref(), global.mode)?;
    let mut controller = build_controller(&loaded, global.placeholder.as_deref())?;
    apply_values(&mut controller, &args.select)?;
    apply_step_changes(&mut controller, &args.at)?;
    if let Some(step) = args.hover {
        controller
            .on_thumbnail_hover(step)
            .with_context(|| format!("hover thumbnail of step {step}"))?;
    }
    let html = render_widget(&controller, &RenderOptions { pretty: args.pretty })?;
    emit(&html, args.output.as_deref())
}

pub fn run_export_js(args: &ExportJsArgs, global: &GlobalOptions) -> Result<()> {
    let loaded = open_catalog(args.catalog.as_deref(), global.mode)?;
    let script = if args.no_timestamp {
        export_js_no_timestamp(&loaded.catalog)
    } else {
        export_js(&loaded.catalog)
    };
    emit(&script, args.output.as_deref())
}

fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = contents.len(), "output written");
        }
        None => print!("{contents}"),
    }
    Ok(())
}
