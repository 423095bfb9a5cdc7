//! Generic object and array codecs.
//!
//! The object codec doubles as the registry fallback for unknown tags, which
//! is what keeps older/newer documents decodable: anything unrecognized
//! becomes an attribute bag instead of an error.

use selkie_model::{Style, StyleValue};

use super::unexpected;
use crate::element::{AS_ATTR, Element};
use crate::error::Result;
use crate::registry::{DecodeContext, EncodeContext, ObjectCodec};
use crate::value::{CodecValue, ObjectBag, parse_scalar, scalar_to_attr};

pub struct ObjectBagCodec {
    exclude: Vec<String>,
}

impl ObjectBagCodec {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
        }
    }

    /// Suppresses the named properties when encoding.
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

    fn encode_entries<'a>(
        &self,
        el: &mut Element,
        entries: impl Iterator<Item = (&'a str, &'a StyleValue)>,
        ctx: &EncodeContext<'_>,
    ) -> Result<()> {
        for (key, value) in entries {
            if self.is_excluded(key) {
                continue;
            }
            match scalar_to_attr(value) {
                Some(attr) => el.set_attr(key, attr),
                None => {
                    // String lists become a nested Array keyed by `as`.
                    if let StyleValue::StringList(items) = value {
                        let items = items
                            .iter()
                            .map(|s| CodecValue::String(s.clone()))
                            .collect();
                        let mut child = ctx.encode_value(&CodecValue::Array(items))?;
                        child.set_attr(AS_ATTR, key);
                        el.children.push(child);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for ObjectBagCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for ObjectBagCodec {
    fn tag(&self) -> &str {
        "Object"
    }

    fn excluded(&self) -> &[String] {
        &self.exclude
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element> {
        match value {
            CodecValue::Style(style) => {
                let mut el = Element::new("Object");
                self.encode_entries(&mut el, style.iter(), ctx)?;
                Ok(el)
            }
            CodecValue::Object(bag) => {
                let mut el = Element::new(bag.tag.clone());
                self.encode_entries(&mut el, bag.attrs.iter().map(|(k, v)| (k.as_str(), v)), ctx)?;
                for (field, nested) in &bag.fields {
                    let mut child = ctx.encode_value(nested)?;
                    child.set_attr(AS_ATTR, field.clone());
                    el.children.push(child);
                }
                Ok(el)
            }
            other => Err(unexpected(other, "generic object")),
        }
    }

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let mut bag = ObjectBag::new(element.tag.clone());
        for (name, raw) in element.attrs() {
            if name == AS_ATTR {
                continue;
            }
            bag.attrs.insert(name.to_string(), parse_scalar(raw));
        }
        for child in &element.children {
            let field = child
                .field_name()
                .unwrap_or(child.tag.as_str())
                .to_string();
            let decoded = ctx.decode_element(child)?;
            bag.fields.push((field, decoded));
        }
        Ok(CodecValue::Object(bag))
    }
}

/// Converts a decoded generic bag into a typed style map. Scalars carry the
/// documented wire ambiguity (booleans come back as numbers); a nested array
/// of strings becomes a `StringList` entry, which is how `baseStyleNames`
/// round-trips.
pub(crate) fn style_from_bag(bag: ObjectBag) -> Style {
    let mut style = Style::new();
    for (key, value) in bag.attrs {
        style.set(key, value);
    }
    for (field, nested) in bag.fields {
        if let CodecValue::Array(items) = nested {
            let strings: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    CodecValue::String(s) => Some(s),
                    other => {
                        tracing::debug!(?other, "non-string entry in style list skipped");
                        None
                    }
                })
                .collect();
            style.set(field, strings);
        }
    }
    style
}

pub struct ArrayCodec;

impl ArrayCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArrayCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectCodec for ArrayCodec {
    fn tag(&self) -> &str {
        "Array"
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element> {
        let CodecValue::Array(items) = value else {
            return Err(unexpected(value, "Array"));
        };
        let mut el = Element::new("Array");
        for item in items {
            el.children.push(ctx.encode_value(item)?);
        }
        Ok(el)
    }

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let mut items = Vec::with_capacity(element.children.len());
        for child in &element.children {
            if child.tag == "add" {
                items.push(CodecValue::String(
                    child.attr("value").unwrap_or_default().to_string(),
                ));
            } else {
                items.push(ctx.decode_element(child)?);
            }
        }
        Ok(CodecValue::Array(items))
    }
}
