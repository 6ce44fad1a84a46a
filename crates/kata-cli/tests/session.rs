use std::fs;
use std::path::Path;

use kata_catalog::{LoadMode, MANIFEST_FILE};
use kata_cli::session::{
    apply_step_changes, apply_values, build_controller, candidates, catalog_path,
    display_options, open_catalog, parse_step_change, parse_values,
};
use kata_core::{CascadeEnd, Preview};
use kata_model::Selection;

const CATALOG: &str = r#"{
  "imgpath": "images",
  "initial": ["shomenuchi", "katatedori"],
  "next": {
    "shomenuchi": ["ikkyo", "iriminage"],
    "katatedori": ["shihonage"],
    "shihonage": ["omote", "ura"]
  },
  "label": {
    "shomenuchi": "Shomen uchi",
    "katatedori": "Katate dori",
    "ikkyo": "Ikkyo",
    "iriminage": "Irimi nage",
    "shihonage": "Shiho nage",
    "omote": "Omote"
  },
  "img": {
    "shomenuchi": "shomenuchi_s.png",
    "katatedori": "katatedori_s.png",
    "ikkyo": "ikkyo_s.png",
    "iriminage": "iriminage_s.png",
    "shihonage": "shihonage_s.png",
    "omote": "omote_s.png",
    "ura": "ura_s.png"
  },
  "desc": { "katatedori": "Wrist grab" }
}"#;

fn write_catalog(dir: &Path) {
    fs::write(dir.join("techniques.json"), CATALOG).unwrap();
    fs::write(
        dir.join(MANIFEST_FILE),
        "[catalog]\nsource = \"techniques.json\"\n\n[display]\nplaceholder_image = \"images/choose_s.png\"\n",
    )
    .unwrap();
}

#[test]
fn explicit_catalog_path_wins() {
    assert_eq!(catalog_path(Some(Path::new("x.xml"))), Path::new("x.xml"));
}

#[test]
fn walk_applies_values_and_cascades() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();
    let mut controller = build_controller(&loaded, None).unwrap();

    let outcomes = apply_values(&mut controller, &["katatedori".to_string()]).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].auto_selected.len(), 1);
    assert_eq!(outcomes[0].end, CascadeEnd::AwaitingChoice { step: 2 });

    let path: Vec<&str> = controller.path().into_iter().map(|v| v.as_str()).collect();
    assert_eq!(path, vec!["katatedori", "shihonage"]);
    assert_eq!(controller.open_step(), Some(2));

    apply_values(&mut controller, &["ura".to_string()]).unwrap();
    assert!(controller.is_complete());
    let preview = controller.on_thumbnail_hover(2).unwrap();
    assert_eq!(preview, &Preview::Image("images/ura_m.png".to_string()));
}

#[test]
fn placeholder_flag_overrides_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();
    assert_eq!(
        display_options(&loaded, None).placeholder_image,
        "images/choose_s.png"
    );
    let controller = build_controller(&loaded, Some("pick_s.gif")).unwrap();
    assert_eq!(controller.options().placeholder_image, "pick_s.gif");
}

#[test]
fn rejected_walk_leaves_controller_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();
    let mut controller = build_controller(&loaded, None).unwrap();

    let err = apply_values(
        &mut controller,
        &["shomenuchi".to_string(), "shihonage".to_string()],
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("apply selections"));
    assert_eq!(controller.steps().len(), 1);
    assert!(controller.path().is_empty());
}

#[test]
fn step_change_prunes_later_steps() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();
    let mut controller = build_controller(&loaded, None).unwrap();
    apply_values(&mut controller, &["katatedori".to_string(), "ura".to_string()]).unwrap();
    assert_eq!(controller.steps().len(), 3);

    let outcomes = apply_step_changes(&mut controller, &["0=shomenuchi".to_string()]).unwrap();
    assert_eq!(outcomes[0].pruned, 2);
    assert_eq!(outcomes[0].end, CascadeEnd::AwaitingChoice { step: 1 });
    assert_eq!(controller.open_step(), Some(1));

    apply_step_changes(&mut controller, &["1=iriminage".to_string(), "1=-----".to_string()])
        .unwrap();
    let path: Vec<&str> = controller.path().into_iter().map(|v| v.as_str()).collect();
    assert_eq!(path, vec!["shomenuchi"]);
    assert_eq!(controller.open_step(), Some(1));
}

#[test]
fn rejected_step_change_leaves_controller_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();
    let mut controller = build_controller(&loaded, None).unwrap();
    apply_values(&mut controller, &["katatedori".to_string()]).unwrap();
    let before = controller.steps().to_vec();

    // Step 1 holds the sole candidate shihonage and offers no sentinel.
    let err = apply_step_changes(
        &mut controller,
        &["2=omote".to_string(), "1=-----".to_string()],
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("change step 1 to -----"));
    assert_eq!(controller.steps(), before.as_slice());
    assert_eq!(controller.open_step(), Some(2));
}

#[test]
fn parses_step_changes() {
    assert_eq!(
        parse_step_change("2=-----").unwrap(),
        (2, Selection::Unselected)
    );
    let (step, selection) = parse_step_change(" 0 =ikkyo").unwrap();
    assert_eq!(step, 0);
    assert_eq!(selection.to_string(), "ikkyo");
    assert!(parse_step_change("ikkyo").is_err());
    assert!(parse_step_change("x=ikkyo").is_err());
    assert!(parse_step_change("1=").is_err());
}

#[test]
fn sentinel_is_not_a_value() {
    assert!(parse_values(&["-----".to_string()]).is_err());
}

#[test]
fn lists_candidates_with_fallback_labels() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let loaded = open_catalog(Some(dir.path()), LoadMode::Strict).unwrap();

    let initial = candidates(&loaded.catalog, None).unwrap();
    assert_eq!(initial.len(), 2);
    assert_eq!(initial[1].description.as_deref(), Some("Wrist grab"));
    assert!(!initial[1].terminal);

    let after = candidates(&loaded.catalog, Some("shihonage")).unwrap();
    let ura = &after[1];
    assert_eq!(ura.value.as_str(), "ura");
    assert_eq!(ura.label, "ura");
    assert!(ura.label_missing);
    assert_eq!(ura.image.as_deref(), Some("images/ura_s.png"));
    assert!(ura.terminal);

    assert!(candidates(&loaded.catalog, Some("ura")).unwrap().is_empty());
    assert!(candidates(&loaded.catalog, Some("kotegaeshi")).is_err());
}
