//! XML technique hierarchy.
//!
//! The document element carries an optional `imgpath` attribute. Every
//! element below it with an `id` attribute is a technique; its direct
//! children are the techniques that may follow it, in document order, and
//! the document element's children are the top-level techniques.
//!
//! ```xml
//! <techniques imgpath="images/">
//!   <technique id="shomenuchi" label="Shomen uchi" img="shomenuchi_s.png">
//!     <technique id="iriminage" label="Irimi nage" img="iriminage_s.png"/>
//!   </technique>
//! </techniques>
//! ```

use std::path::Path;

use kata_model::{Catalog, CatalogBuilder, IntegrityIssue, IntegrityReport, IssueKind, ValueId};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::CatalogError;

/// Catalog parsed from XML plus the structural issues seen while parsing.
#[derive(Debug, Clone)]
pub struct XmlCatalog {
    pub catalog: Catalog,
    pub issues: IntegrityReport,
}

#[derive(Debug, Default)]
struct Attrs {
    id: Option<String>,
    label: Option<String>,
    img: Option<String>,
    desc: Option<String>,
    imgpath: Option<String>,
}

#[derive(Debug)]
struct Frame {
    root: bool,
    id: Option<ValueId>,
    children: Vec<ValueId>,
}

struct Parser<'a> {
    path: &'a Path,
    builder: CatalogBuilder,
    issues: IntegrityReport,
    stack: Vec<Frame>,
    img_path: String,
    seen_root: bool,
}

pub fn parse_xml_catalog(text: &str, path: &Path) -> Result<XmlCatalog, CatalogError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut parser = Parser {
        path,
        builder: Catalog::builder(),
        issues: IntegrityReport::default(),
        stack: Vec::new(),
        img_path: String::new(),
        seen_root: false,
    };

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| xml_error(path, reader.error_position(), e))?;
        match event {
            Event::Start(start) => {
                let frame = parser.open(&start, position)?;
                parser.stack.push(frame);
            }
            Event::Empty(start) => {
                let frame = parser.open(&start, position)?;
                parser.close(frame);
            }
            Event::End(_) => {
                if let Some(frame) = parser.stack.pop() {
                    parser.close(frame);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !parser.seen_root {
        return Err(xml_error(path, 0, "document has no root element"));
    }
    if !parser.stack.is_empty() {
        return Err(xml_error(
            path,
            reader.buffer_position(),
            "unexpected end of document",
        ));
    }

    Ok(XmlCatalog {
        catalog: parser.builder.build(),
        issues: parser.issues,
    })
}

impl Parser<'_> {
    fn open(&mut self, start: &BytesStart<'_>, position: u64) -> Result<Frame, CatalogError> {
        let attrs = read_attrs(start, self.path, position)?;

        if self.stack.is_empty() {
            if self.seen_root {
                return Err(xml_error(self.path, position, "multiple root elements"));
            }
            self.seen_root = true;
            self.img_path = attrs.imgpath.unwrap_or_default();
            return Ok(Frame {
                root: true,
                id: None,
                children: Vec::new(),
            });
        }

        let Some(raw_id) = attrs.id else {
            let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
            self.issues.push(IntegrityIssue::new(
                IssueKind::MissingId,
                None,
                format!("<{name}> at byte {position} has no id; its children are not linked"),
            ));
            return Ok(Frame {
                root: false,
                id: None,
                children: Vec::new(),
            });
        };

        let value = ValueId::new(raw_id).map_err(|e| CatalogError::InvalidValue {
            path: self.path.to_path_buf(),
            message: format!("{e} (at byte {position})"),
        })?;
        if self.builder.contains_definition(value.as_str()) {
            self.issues.push(IntegrityIssue::new(
                IssueKind::DuplicateDefinition,
                Some(value.clone()),
                format!("{value} is defined again at byte {position}; the later definition wins"),
            ));
        }
        if let Some(label) = attrs.label {
            self.builder.set_label(value.clone(), label);
        }
        if let Some(img) = attrs.img {
            self.builder
                .set_image(value.clone(), join_image_path(&self.img_path, &img));
        }
        if let Some(desc) = attrs.desc {
            self.builder.set_description(value.clone(), desc);
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(value.clone());
        }

        Ok(Frame {
            root: false,
            id: Some(value),
            children: Vec::new(),
        })
    }

    fn close(&mut self, frame: Frame) {
        if frame.root {
            debug!(count = frame.children.len(), "top-level techniques");
            self.builder.set_initial(frame.children);
            return;
        }
        // A repeated id without children keeps the earlier transitions.
        if let Some(id) = frame.id {
            if !frame.children.is_empty() {
                self.builder.set_transition(id, frame.children);
            }
        }
    }
}

fn read_attrs(start: &BytesStart<'_>, path: &Path, position: u64) -> Result<Attrs, CatalogError> {
    let mut attrs = Attrs::default();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(path, position, e))?;
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(path, position, e))?
            .into_owned();
        match attr.key.as_ref() {
            b"id" => attrs.id = Some(value),
            b"label" => attrs.label = Some(value),
            b"img" => attrs.img = Some(value),
            b"desc" => attrs.desc = Some(value),
            b"imgpath" => attrs.imgpath = Some(value),
            _ => {}
        }
    }
    Ok(attrs)
}

/// Prefix an image file name with the catalog's image directory.
///
/// Absolute paths and URLs are kept as they are.
pub fn join_image_path(root: &str, file: &str) -> String {
    if root.is_empty() || file.starts_with('/') || file.contains("://") {
        return file.to_string();
    }
    if root.ends_with('/') {
        format!("{root}{file}")
    } else {
        format!("{root}/{file}")
    }
}

fn xml_error(path: &Path, position: u64, message: impl ToString) -> CatalogError {
    CatalogError::Xml {
        path: path.to_path_buf(),
        position,
        message: message.to_string(),
    }
}
