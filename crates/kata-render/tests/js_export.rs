use kata_model::{Catalog, ValueId};
use kata_render::{export_js, export_js_no_timestamp};

fn id(value: &str) -> ValueId {
    ValueId::new(value).unwrap()
}

fn catalog() -> Catalog {
    Catalog::builder()
        .initial([id("shomenuchi"), id("tsuki")])
        .transition(id("shomenuchi"), [id("ikkyo"), id("iriminage")])
        .label(id("shomenuchi"), "Shomen uchi")
        .label(id("tsuki"), "Tsuki")
        .label(id("ikkyo"), "Ikkyo")
        .label(id("iriminage"), "Irimi nage")
        .image(id("shomenuchi"), "images/shomenuchi_s.png")
        .image(id("tsuki"), "images/tsuki_s.png")
        .image(id("ikkyo"), "images/ikkyo_s.png")
        .image(id("iriminage"), "images/iriminage_s.png")
        .description(id("shomenuchi"), "Uke's strike to the head")
        .build()
}

#[test]
fn legacy_script_snapshot() {
    let script = export_js_no_timestamp(&catalog());
    insta::assert_snapshot!(script);
}

#[test]
fn timestamped_script_has_header() {
    let script = export_js(&catalog());
    let first = script.lines().next().unwrap();
    assert!(first.starts_with("// Technique tables generated "));
    assert!(first.ends_with('Z'));
    let body = export_js_no_timestamp(&catalog());
    assert_eq!(
        script.split_once('\n').unwrap().1,
        body.split_once('\n').unwrap().1
    );
}
