use std::sync::Arc;

use kata_core::CascadeController;
use kata_model::{Catalog, DisplayOptions, Selection, ValueId};
use kata_render::{RenderOptions, render_widget};

fn id(value: &str) -> ValueId {
    ValueId::new(value).unwrap()
}

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::builder()
            .initial([id("A"), id("B")])
            .transition(id("A"), [id("X"), id("Y")])
            .transition(id("X"), [id("Z")])
            .label(id("A"), "Shomen uchi")
            .label(id("B"), "Tsuki")
            .label(id("X"), "Ikkyo")
            .label(id("Y"), "Irimi nage")
            .image(id("A"), "img/a_s.png")
            .image(id("B"), "img/b_s.png")
            .image(id("X"), "img/x_s.png")
            .image(id("Y"), "img/y_s.png")
            .image(id("Z"), "img/z_s.png")
            .description(id("A"), "Strike & enter")
            .build(),
    )
}

fn controller() -> CascadeController {
    CascadeController::new(catalog(), DisplayOptions::default()).unwrap()
}

#[test]
fn renders_initial_state() {
    let html = render_widget(&controller(), &RenderOptions::default()).unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<div class="technique-widget"><table id="techniqueTable">"#,
            r#"<tr><td><select id="step0_select">"#,
            r#"<option value="-----" selected="selected">-----</option>"#,
            r#"<option value="A" title="Strike &amp; enter">Shomen uchi</option>"#,
            r#"<option value="B">Tsuki</option>"#,
            r#"</select></td><td class="filler"></td></tr>"#,
            r#"<tr><td><a><img id="step0_image" src="images/select_s.png" width="170" height="130" border="0"/></a></td>"#,
            r#"<td class="filler"></td></tr></table>"#,
            r#"<img id="big_image" src="images/select_m.png" alt=""/></div>"#,
        )
    );
}

#[test]
fn renders_cascaded_steps_and_preview() {
    let mut ctl = controller();
    ctl.on_selection_changed(0, Selection::Value(id("A"))).unwrap();
    ctl.on_selection_changed(1, Selection::Value(id("X"))).unwrap();
    ctl.on_thumbnail_hover(2).unwrap();

    let html = render_widget(&ctl, &RenderOptions::default()).unwrap();
    assert!(html.contains(r#"<select id="step1_select">"#));
    assert!(html.contains(r#"<option value="X" selected="selected">Ikkyo</option>"#));
    // Single candidate: no sentinel, auto-selected, label falls back to the id.
    assert!(html.contains(
        r#"<select id="step2_select"><option value="Z" selected="selected" data-label-missing="">Z</option></select>"#
    ));
    assert!(html.contains(r#"<img id="step2_image" src="img/z_s.png""#));
    assert!(html.contains(r#"<img id="big_image" src="img/z_m.png" alt=""/>"#));
    assert!(html.contains(r#"title="Strike &amp; enter"/>"#));
    assert_eq!(html.matches(r#"<td class="filler"></td>"#).count(), 2);
    assert!(!html.contains("step3_select"));
}

#[test]
fn missing_image_renders_broken_thumbnail() {
    let catalog = Arc::new(
        Catalog::builder()
            .initial([id("A"), id("B")])
            .label(id("A"), "A")
            .label(id("B"), "B")
            .build(),
    );
    let mut ctl = CascadeController::new(catalog, DisplayOptions::default()).unwrap();
    ctl.on_selection_changed(0, Selection::Value(id("B"))).unwrap();
    ctl.on_thumbnail_hover(0).unwrap();

    let html = render_widget(&ctl, &RenderOptions::default()).unwrap();
    assert!(html.contains(
        r#"<img id="step0_image" src="" width="170" height="130" border="0" data-missing="B"/>"#
    ));
    assert!(html.contains(r#"<img id="big_image" src="" alt="" data-missing="B"/>"#));
}

#[test]
fn display_options_drive_sizes_and_placeholder() {
    let options = DisplayOptions {
        thumbnail_width: 85,
        thumbnail_height: 65,
        ..DisplayOptions::default().with_placeholder_image("pick_s.gif")
    };
    let ctl = CascadeController::new(catalog(), options).unwrap();
    let html = render_widget(&ctl, &RenderOptions::default()).unwrap();
    assert!(html.contains(r#"src="pick_s.gif" width="85" height="65""#));
    assert!(html.contains(r#"<img id="big_image" src="pick_m.gif" alt=""/>"#));
}

#[test]
fn pretty_output_is_indented() {
    let html = render_widget(&controller(), &RenderOptions { pretty: true }).unwrap();
    assert!(html.starts_with("<div class=\"technique-widget\">\n  <table id=\"techniqueTable\">"));
    assert!(html.contains("\n    <tr>"));
}
