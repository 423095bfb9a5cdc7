//! Geometry and point codecs.
//!
//! Coordinate attributes use the historical `_x`/`_y`/`_width`/`_height`
//! names; values equal to the type's defaults are omitted so the output
//! stays byte-compatible with the reference format.

use selkie_model::{Geometry, point};

use super::{parse_bool_attr, parse_number_attr, unexpected};
use crate::element::{AS_ATTR, Element};
use crate::error::Result;
use crate::registry::{DecodeContext, EncodeContext, ObjectCodec};
use crate::value::{CodecValue, format_number};

pub struct PointCodec {
    exclude: Vec<String>,
}

impl PointCodec {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
        }
    }
}

impl Default for PointCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for PointCodec {
    fn tag(&self) -> &str {
        "Point"
    }

    fn excluded(&self) -> &[String] {
        &self.exclude
    }

    fn encode(&self, value: &CodecValue, _ctx: &EncodeContext<'_>) -> Result<Element> {
        let CodecValue::Point(p) = value else {
            return Err(unexpected(value, "Point"));
        };
        let mut el = Element::new("Point");
        if p.x != 0.0 {
            el.set_attr("_x", format_number(p.x));
        }
        if p.y != 0.0 {
            el.set_attr("_y", format_number(p.y));
        }
        Ok(el)
    }

    fn decode(&self, element: &Element, _ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let x = parse_number_attr(element, "_x")?;
        let y = parse_number_attr(element, "_y")?;
        Ok(CodecValue::Point(point(x, y)))
    }
}

pub struct GeometryCodec {
    exclude: Vec<String>,
}

impl GeometryCodec {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
        }
    }

    /// Suppresses the named fields when encoding.
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

impl Default for GeometryCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for GeometryCodec {
    fn tag(&self) -> &str {
        "Geometry"
    }

    fn excluded(&self) -> &[String] {
        &self.exclude
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element> {
        let CodecValue::Geometry(g) = value else {
            return Err(unexpected(value, "Geometry"));
        };
        let mut el = Element::new("Geometry");
        if g.x != 0.0 && !self.is_excluded("x") {
            el.set_attr("_x", format_number(g.x));
        }
        if g.y != 0.0 && !self.is_excluded("y") {
            el.set_attr("_y", format_number(g.y));
        }
        if g.width != 0.0 && !self.is_excluded("width") {
            el.set_attr("_width", format_number(g.width));
        }
        if g.height != 0.0 && !self.is_excluded("height") {
            el.set_attr("_height", format_number(g.height));
        }
        if g.relative && !self.is_excluded("relative") {
            el.set_attr("relative", "1");
        }
        if let Some(offset) = &g.offset {
            if !self.is_excluded("offset") {
                let mut child = ctx.encode_value(&CodecValue::Point(*offset))?;
                child.set_attr(AS_ATTR, "offset");
                el.children.push(child);
            }
        }
        if !g.points.is_empty() && !self.is_excluded("points") {
            let items: Vec<CodecValue> = g.points.iter().map(|p| CodecValue::Point(*p)).collect();
            let mut child = ctx.encode_value(&CodecValue::Array(items))?;
            child.set_attr(AS_ATTR, "points");
            el.children.push(child);
        }
        if let Some(alt) = &g.alternate_bounds {
            if !self.is_excluded("alternateBounds") {
                let mut child = ctx.encode_value(&CodecValue::Geometry((**alt).clone()))?;
                child.set_attr(AS_ATTR, "alternateBounds");
                el.children.push(child);
            }
        }
        if let Some(p) = &g.source_point {
            if !self.is_excluded("sourcePoint") {
                let mut child = ctx.encode_value(&CodecValue::Point(*p))?;
                child.set_attr(AS_ATTR, "sourcePoint");
                el.children.push(child);
            }
        }
        if let Some(p) = &g.target_point {
            if !self.is_excluded("targetPoint") {
                let mut child = ctx.encode_value(&CodecValue::Point(*p))?;
                child.set_attr(AS_ATTR, "targetPoint");
                el.children.push(child);
            }
        }
        Ok(el)
    }

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let mut g = Geometry::new(
            parse_number_attr(element, "_x")?,
            parse_number_attr(element, "_y")?,
            parse_number_attr(element, "_width")?,
            parse_number_attr(element, "_height")?,
        );
        g.relative = parse_bool_attr(element, "relative", false)?;

        for child in &element.children {
            let field = child.field_name().map(str::to_string);
            let decoded = ctx.decode_element(child)?;
            match (field.as_deref(), decoded) {
                (Some("points"), CodecValue::Array(items)) => {
                    g.points = items
                        .into_iter()
                        .filter_map(|item| match item {
                            CodecValue::Point(p) => Some(p),
                            other => {
                                tracing::debug!(?other, "non-point entry in points array skipped");
                                None
                            }
                        })
                        .collect();
                }
                (Some("offset"), CodecValue::Point(p)) => g.offset = Some(p),
                (Some("sourcePoint"), CodecValue::Point(p)) => g.source_point = Some(p),
                (Some("targetPoint"), CodecValue::Point(p)) => g.target_point = Some(p),
                (Some("alternateBounds"), CodecValue::Geometry(alt)) => {
                    g.alternate_bounds = Some(Box::new(alt));
                }
                (field, _) => {
                    tracing::debug!(?field, tag = %child.tag, "unrecognized geometry child skipped");
                }
            }
        }
        Ok(CodecValue::Geometry(g))
    }
}

