use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kata_catalog::CheckReport;
use kata_core::{CascadeController, ImageSource, Preview};
use kata_model::{IssueSeverity, Selection, ValueId};
use kata_cli::session::CandidateRow;

pub fn print_check_report(report: &CheckReport) {
    println!("Catalog: {} ({})", report.source, report.format.as_str());
    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Catalog"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, value) in [
        ("Values", summary.value_count),
        ("Initial", summary.initial_count),
        ("Transitions", summary.transition_count),
        ("Terminal", summary.terminal_count),
        ("Labels", summary.label_count),
        ("Images", summary.image_count),
        ("Descriptions", summary.description_count),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Errors").add_attribute(Attribute::Bold),
        count_cell(report.error_count, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Warnings").add_attribute(Attribute::Bold),
        count_cell(report.warning_count, Color::Yellow),
    ]);
    println!("{table}");

    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|issue| severity_rank(issue.severity));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.kind.code()),
            issue
                .value
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_candidates(rows: &[CandidateRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Label"),
        header_cell("Image"),
        header_cell("Next"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        let label = if row.label_missing {
            Cell::new(&row.label).fg(Color::Yellow)
        } else {
            Cell::new(&row.label)
        };
        let image = match &row.image {
            Some(path) => Cell::new(path),
            None => Cell::new("missing").fg(Color::Red),
        };
        let next = if row.terminal {
            dim_cell("end")
        } else {
            Cell::new("▸").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(&row.value),
            label,
            image,
            next,
            row.description
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn print_steps(controller: &CascadeController) {
    let catalog = controller.catalog();
    let options = controller.options();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Selected"),
        header_cell("Candidates"),
        header_cell("Thumbnail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for step in controller.steps() {
        let selected = match step.selection() {
            Selection::Unselected => dim_cell(&options.sentinel_label),
            Selection::Value(value) => Cell::new(format!(
                "{} ({value})",
                catalog.display_label(value)
            ))
            .add_attribute(Attribute::Bold),
        };
        let candidates = step
            .selector
            .candidates
            .iter()
            .map(ValueId::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let thumbnail = match &step.image.source {
            ImageSource::Missing(_) => Cell::new("missing").fg(Color::Red),
            source => Cell::new(source.src(options).unwrap_or_default()),
        };
        table.add_row(vec![
            Cell::new(step.index),
            selected,
            Cell::new(candidates),
            thumbnail,
        ]);
    }
    println!("{table}");

    let path = controller
        .path()
        .into_iter()
        .map(|value| catalog.display_label(value))
        .collect::<Vec<_>>();
    if path.is_empty() {
        println!("Path: (nothing selected)");
    } else {
        println!("Path: {}", path.join(" > "));
    }
    match controller.open_step() {
        Some(step) => println!("Waiting for a choice at step {step}"),
        None if controller.is_complete() => println!("Technique complete"),
        None => {}
    }
}

pub fn print_preview(preview: &Preview) {
    match preview {
        Preview::Initial => println!("Preview: (initial)"),
        Preview::Image(path) => println!("Preview: {path}"),
        Preview::Missing(value) => println!("Preview: missing image for {value}"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("error")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}
