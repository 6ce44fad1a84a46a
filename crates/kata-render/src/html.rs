//! HTML projection of the selector state.
//!
//! The markup keeps the element ids of the legacy page so existing styles
//! and scripts still find the table, the per-step selects and thumbnails,
//! and the large preview.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use kata_core::{CascadeController, ImageSource, Preview, Step};
use kata_model::DisplayOptions;

pub const TABLE_ID: &str = "techniqueTable";
pub const PREVIEW_ID: &str = "big_image";

/// Options for HTML output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Indent nested elements by two spaces.
    pub pretty: bool,
}

pub fn select_id(step: usize) -> String {
    format!("step{step}_select")
}

pub fn image_id(step: usize) -> String {
    format!("step{step}_image")
}

/// Render the widget for the controller's current state.
pub fn render_widget(controller: &CascadeController, options: &RenderOptions) -> Result<String> {
    let buffer = Vec::new();
    let mut writer = if options.pretty {
        Writer::new_with_indent(buffer, b' ', 2)
    } else {
        Writer::new(buffer)
    };
    write_widget(&mut writer, controller).context("write widget markup")?;
    String::from_utf8(writer.into_inner()).context("widget markup is not UTF-8")
}

fn write_widget<W: Write>(writer: &mut Writer<W>, controller: &CascadeController) -> Result<()> {
    let display = controller.options();

    let mut root = BytesStart::new("div");
    root.push_attribute(("class", "technique-widget"));
    writer.write_event(Event::Start(root))?;

    let mut table = BytesStart::new("table");
    table.push_attribute(("id", TABLE_ID));
    writer.write_event(Event::Start(table))?;

    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for step in controller.steps() {
        write_select_cell(writer, controller, step)?;
    }
    write_filler(writer)?;
    writer.write_event(Event::End(BytesEnd::new("tr")))?;

    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for step in controller.steps() {
        write_image_cell(writer, controller, step)?;
    }
    write_filler(writer)?;
    writer.write_event(Event::End(BytesEnd::new("tr")))?;

    writer.write_event(Event::End(BytesEnd::new("table")))?;

    write_preview(writer, controller.preview(), display)?;
    writer.write_event(Event::End(BytesEnd::new("div")))?;
    Ok(())
}

fn write_select_cell<W: Write>(
    writer: &mut Writer<W>,
    controller: &CascadeController,
    step: &Step,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("td")))?;
    let id = select_id(step.index);
    let mut select = BytesStart::new("select");
    select.push_attribute(("id", id.as_str()));
    writer.write_event(Event::Start(select))?;

    for option in step.options(controller.catalog(), controller.options()) {
        let mut element = BytesStart::new("option");
        element.push_attribute(("value", option.value.as_str()));
        if option.selected {
            element.push_attribute(("selected", "selected"));
        }
        if let Some(title) = &option.title {
            element.push_attribute(("title", title.as_str()));
        }
        if option.label_missing {
            element.push_attribute(("data-label-missing", ""));
        }
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(&option.label)))?;
        writer.write_event(Event::End(BytesEnd::new("option")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("select")))?;
    writer.write_event(Event::End(BytesEnd::new("td")))?;
    Ok(())
}

fn write_image_cell<W: Write>(
    writer: &mut Writer<W>,
    controller: &CascadeController,
    step: &Step,
) -> Result<()> {
    let display = controller.options();
    writer.write_event(Event::Start(BytesStart::new("td")))?;
    writer.write_event(Event::Start(BytesStart::new("a")))?;

    let id = image_id(step.index);
    let width = display.thumbnail_width.to_string();
    let height = display.thumbnail_height.to_string();
    let source = &step.image.source;
    let mut img = BytesStart::new("img");
    img.push_attribute(("id", id.as_str()));
    img.push_attribute(("src", source.src(display).unwrap_or("")));
    img.push_attribute(("width", width.as_str()));
    img.push_attribute(("height", height.as_str()));
    img.push_attribute(("border", "0"));
    if let Some(description) = step
        .value()
        .and_then(|value| controller.catalog().description(value.as_str()))
    {
        img.push_attribute(("title", description));
    }
    if let ImageSource::Missing(value) = source {
        img.push_attribute(("data-missing", value.as_str()));
    }
    writer.write_event(Event::Empty(img))?;

    writer.write_event(Event::End(BytesEnd::new("a")))?;
    writer.write_event(Event::End(BytesEnd::new("td")))?;
    Ok(())
}

// Closes each row so inserted steps always land before it.
fn write_filler<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    let mut td = BytesStart::new("td");
    td.push_attribute(("class", "filler"));
    writer.write_event(Event::Start(td))?;
    writer.write_event(Event::End(BytesEnd::new("td")))?;
    Ok(())
}

fn write_preview<W: Write>(
    writer: &mut Writer<W>,
    preview: &Preview,
    display: &DisplayOptions,
) -> Result<()> {
    let initial;
    let src = match preview {
        Preview::Initial => {
            initial = display.large_variant(&display.placeholder_image);
            initial.as_str()
        }
        Preview::Image(path) => path.as_str(),
        Preview::Missing(_) => "",
    };
    let mut img = BytesStart::new("img");
    img.push_attribute(("id", PREVIEW_ID));
    img.push_attribute(("src", src));
    img.push_attribute(("alt", ""));
    if let Preview::Missing(value) = preview {
        img.push_attribute(("data-missing", value.as_str()));
    }
    writer.write_event(Event::Empty(img))?;
    Ok(())
}
