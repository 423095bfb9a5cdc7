//! Dynamic values exchanged between the codec driver and per-type codecs.

use indexmap::IndexMap;
use selkie_model::{Cell, Geometry, Point, Style, StyleValue, Stylesheet};

/// A decoded or to-be-encoded object, tagged by runtime type.
///
/// `Null` stands for values that are produced or consumed in place rather
/// than returned, e.g. a model decoded directly into its target.
#[derive(Debug, Clone)]
pub enum CodecValue {
    Null,
    Cell(Box<Cell>),
    Geometry(Geometry),
    Point(Point),
    Style(Style),
    Stylesheet(Box<Stylesheet>),
    Object(ObjectBag),
    Array(Vec<CodecValue>),
    String(String),
}

/// Generic attribute bag produced by the fallback codec for untyped objects
/// and unknown tags. Scalar attributes keep the wire-side ambiguity: a
/// boolean written as `"1"` comes back as `Number(1)`.
#[derive(Debug, Clone, Default)]
pub struct ObjectBag {
    pub tag: String,
    pub attrs: IndexMap<String, StyleValue>,
    /// Nested elements, keyed by their `as` field name (falling back to the
    /// child's tag when absent).
    pub fields: Vec<(String, CodecValue)>,
}

impl ObjectBag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }
}

/// Formats a number the way JS `Number#toString` does, so `100.0` encodes as
/// `100`. This keeps the wire format identical to the reference output.
pub fn format_number(value: f64) -> String {
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(value).to_string()
}

/// Wire form of a scalar style value; `None` for lists, which encode as a
/// child `Array` element instead of an attribute.
pub fn scalar_to_attr(value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::String(s) => Some(s.clone()),
        StyleValue::Number(n) => Some(format_number(*n)),
        StyleValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        StyleValue::StringList(_) => None,
    }
}

/// Parses an attribute of an untyped bag. Numeric-looking text becomes a
/// number (this is where `"1"`/`"0"` booleans lose their type), everything
/// else stays a string.
pub fn parse_scalar(raw: &str) -> StyleValue {
    let numeric_looking = raw
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.');
    if numeric_looking {
        if let Ok(n) = raw.parse::<f64>() {
            return StyleValue::Number(n);
        }
    }
    StyleValue::String(raw.to_string())
}
