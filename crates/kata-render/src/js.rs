//! Legacy data script.
//!
//! Pages built before the HTML renderer read the catalog from global arrays:
//! `attacks` (the initial list), `next`, `img`, `label` and `desc`.

use chrono::{SecondsFormat, Utc};

use kata_model::Catalog;

/// Script for the catalog, stamped with the current time.
pub fn export_js(catalog: &Catalog) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    generate(catalog, Some(&timestamp))
}

/// Script for the catalog without the time stamp, for reproducible output.
pub fn export_js_no_timestamp(catalog: &Catalog) -> String {
    generate(catalog, None)
}

fn generate(catalog: &Catalog, timestamp: Option<&str>) -> String {
    let mut out = String::new();
    match timestamp {
        Some(timestamp) => out.push_str(&format!("// Technique tables generated {timestamp}\n")),
        None => out.push_str("// Technique tables\n"),
    }
    out.push_str("  var attacks = new Array();\n");
    out.push_str("  var next = new Array();\n");
    out.push_str("  var img = new Array();\n");
    out.push_str("  var label = new Array();\n");
    out.push_str("  var desc = new Array();\n\n");

    for (index, value) in catalog.initial().iter().enumerate() {
        out.push_str(&format!("  attacks[{index}]={};\n", quote(value.as_str())));
    }

    for value in catalog.all_values() {
        let key = quote(value.as_str());
        out.push('\n');
        if let Some(img) = catalog.image(value.as_str()) {
            out.push_str(&format!("  img[{key}]={};\n", quote(img)));
        }
        if let Some(label) = catalog.label(value.as_str()) {
            out.push_str(&format!("  label[{key}]={};\n", quote(label)));
        }
        if let Some(desc) = catalog.description(value.as_str()) {
            out.push_str(&format!("  desc[{key}]={};\n", quote(desc)));
        }
        let targets = catalog.candidates_after(value.as_str());
        if !targets.is_empty() {
            out.push_str(&format!("  next[{key}]= new Array();\n"));
            for (index, target) in targets.iter().enumerate() {
                out.push_str(&format!(
                    "  next[{key}][{index}]={};\n",
                    quote(target.as_str())
                ));
            }
        }
    }
    out
}

/// Single-quoted JavaScript string literal.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            // Keep `</script>` from closing an inline script block.
            '<' if chars.peek() == Some(&'/') => quoted.push_str("<\\"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}
