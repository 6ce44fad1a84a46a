//! Output generation for the technique selector.

pub mod html;
pub mod js;

pub use html::{PREVIEW_ID, RenderOptions, TABLE_ID, image_id, render_widget, select_id};
pub use js::{export_js, export_js_no_timestamp};
