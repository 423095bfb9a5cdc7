//! Cell codec.
//!
//! A cell element carries its scalar fields as attributes and its owned
//! objects (geometry, style) as `as`-keyed child elements. The tree and
//! terminal relationships are *reference* attributes holding cell ids; this
//! codec never resolves them — wiring is the model decode's second pass, so
//! forward references and cycles cost nothing here.

use selkie_model::Cell;

use super::object::style_from_bag;
use super::{parse_bool_attr, unexpected};
use crate::element::{AS_ATTR, Element};
use crate::error::Result;
use crate::registry::{DecodeContext, EncodeContext, ObjectCodec};
use crate::value::CodecValue;

pub struct CellCodec {
    exclude: Vec<String>,
}

impl CellCodec {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
        }
    }

    /// Suppresses the named fields when encoding, e.g. to keep a derived or
    /// runtime-only field out of exported documents.
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|n| n == name)
    }
}

impl Default for CellCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for CellCodec {
    fn tag(&self) -> &str {
        "Cell"
    }

    fn excluded(&self) -> &[String] {
        &self.exclude
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element> {
        let CodecValue::Cell(cell) = value else {
            return Err(unexpected(value, "Cell"));
        };
        let mut el = Element::new("Cell");
        if let Some(id) = cell.id() {
            el.set_attr("id", id);
        }
        if let Some(v) = cell.value() {
            if !self.is_excluded("value") {
                el.set_attr("value", v);
            }
        }
        // Booleans use the historical "1"/"0" wire form; values equal to the
        // field defaults are omitted.
        if cell.is_vertex() && !self.is_excluded("vertex") {
            el.set_attr("vertex", "1");
        }
        if cell.is_edge() && !self.is_excluded("edge") {
            el.set_attr("edge", "1");
        }
        if !cell.is_connectable() && !self.is_excluded("connectable") {
            el.set_attr("connectable", "0");
        }
        if !cell.is_visible() && !self.is_excluded("visible") {
            el.set_attr("visible", "0");
        }
        if cell.is_collapsed() && !self.is_excluded("collapsed") {
            el.set_attr("collapsed", "1");
        }
        if let Some(parent) = cell.parent() {
            if !self.is_excluded("parent") {
                el.set_attr("parent", parent);
            }
        }
        if let Some(source) = cell.terminal(true) {
            if !self.is_excluded("source") {
                el.set_attr("source", source);
            }
        }
        if let Some(target) = cell.terminal(false) {
            if !self.is_excluded("target") {
                el.set_attr("target", target);
            }
        }
        if let Some(geometry) = cell.geometry() {
            if !self.is_excluded("geometry") {
                let mut child = ctx.encode_value(&CodecValue::Geometry(geometry.clone()))?;
                child.set_attr(AS_ATTR, "geometry");
                el.children.push(child);
            }
        }
        if !self.is_excluded("style") {
            // An empty style still emits its element.
            let mut child = ctx.encode_value(&CodecValue::Style(cell.style().clone()))?;
            child.set_attr(AS_ATTR, "style");
            el.children.push(child);
        }
        Ok(el)
    }

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let mut cell = Cell::default();
        if let Some(id) = element.attr("id") {
            cell.set_id(id);
        }
        if let Some(value) = element.attr("value") {
            cell.set_value(Some(value.to_string()));
        }
        cell.set_vertex(parse_bool_attr(element, "vertex", false)?);
        cell.set_edge(parse_bool_attr(element, "edge", false)?);
        cell.set_connectable(parse_bool_attr(element, "connectable", true)?);
        cell.set_visible(parse_bool_attr(element, "visible", true)?);
        cell.set_collapsed(parse_bool_attr(element, "collapsed", false)?);

        for child in &element.children {
            let field = child.field_name().map(str::to_string);
            let decoded = ctx.decode_element(child)?;
            match (field.as_deref(), decoded) {
                (Some("geometry"), CodecValue::Geometry(g)) => cell.set_geometry(Some(g)),
                (Some("style"), CodecValue::Object(bag)) => cell.set_style(style_from_bag(bag)),
                (Some("style"), CodecValue::Style(style)) => cell.set_style(style),
                (field, _) => {
                    tracing::debug!(?field, tag = %child.tag, "unrecognized cell child skipped");
                }
            }
        }
        Ok(CodecValue::Cell(Box::new(cell)))
    }
}
