//! Stylesheet codec.
//!
//! Named styles and the two default styles are encoded as `<add as="name">`
//! entries whose properties are `<add as="key" value="…" />` children. Only
//! scalar properties participate; this is the historical stylesheet element
//! form, distinct from the per-cell style bags.

use selkie_model::{Style, Stylesheet};

use super::unexpected;
use crate::element::{AS_ATTR, Element};
use crate::error::{CodecError, Result};
use crate::registry::{DecodeContext, EncodeContext, ObjectCodec};
use crate::value::{CodecValue, parse_scalar, scalar_to_attr};

const DEFAULT_VERTEX_ENTRY: &str = "defaultVertexStyle";
const DEFAULT_EDGE_ENTRY: &str = "defaultEdgeStyle";

pub struct StylesheetCodec;

impl StylesheetCodec {
    pub fn new() -> Self {
        Self
    }

    fn encode_entry(name: &str, style: &Style) -> Element {
        let mut entry = Element::new("add");
        entry.set_attr(AS_ATTR, name);
        for (key, value) in style.iter() {
            match scalar_to_attr(value) {
                Some(attr) => {
                    let mut prop = Element::new("add");
                    prop.set_attr(AS_ATTR, key);
                    prop.set_attr("value", attr);
                    entry.children.push(prop);
                }
                None => {
                    tracing::debug!(key, "non-scalar stylesheet property skipped");
                }
            }
        }
        entry
    }

    fn decode_entry(entry: &Element) -> Result<(String, Style)> {
        let name = entry
            .attr(AS_ATTR)
            .ok_or_else(|| CodecError::MissingAttribute {
                element: entry.tag.clone(),
                attribute: AS_ATTR.to_string(),
            })?;
        let mut style = Style::new();
        for prop in &entry.children {
            if prop.tag != "add" {
                tracing::debug!(tag = %prop.tag, "unexpected stylesheet property element skipped");
                continue;
            }
            let key = prop
                .attr(AS_ATTR)
                .ok_or_else(|| CodecError::MissingAttribute {
                    element: prop.tag.clone(),
                    attribute: AS_ATTR.to_string(),
                })?;
            let raw = prop.attr("value").unwrap_or_default();
            style.set(key, parse_scalar(raw));
        }
        Ok((name.to_string(), style))
    }
}

impl Default for StylesheetCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for StylesheetCodec {
    fn tag(&self) -> &str {
        "Stylesheet"
    }

    fn encode(&self, value: &CodecValue, _ctx: &EncodeContext<'_>) -> Result<Element> {
        let CodecValue::Stylesheet(sheet) = value else {
            return Err(unexpected(value, "Stylesheet"));
        };
        let mut el = Element::new("Stylesheet");
        el.children.push(Self::encode_entry(
            DEFAULT_VERTEX_ENTRY,
            sheet.default_vertex_style(),
        ));
        el.children.push(Self::encode_entry(
            DEFAULT_EDGE_ENTRY,
            sheet.default_edge_style(),
        ));
        for name in sheet.style_names() {
            if let Some(style) = sheet.style(name) {
                el.children.push(Self::encode_entry(name, style));
            }
        }
        Ok(el)
    }

    fn decode(&self, element: &Element, _ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let mut sheet = Stylesheet::new();
        for entry in &element.children {
            if entry.tag != "add" {
                tracing::debug!(tag = %entry.tag, "unexpected stylesheet entry element skipped");
                continue;
            }
            let (name, style) = Self::decode_entry(entry)?;
            match name.as_str() {
                DEFAULT_VERTEX_ENTRY => sheet.set_default_vertex_style(style),
                DEFAULT_EDGE_ENTRY => sheet.set_default_edge_style(style),
                _ => sheet.put_cell_style(name, style),
            }
        }
        Ok(CodecValue::Stylesheet(Box::new(sheet)))
    }
}
