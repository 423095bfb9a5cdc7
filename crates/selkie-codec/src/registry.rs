//! Type-driven codec dispatch.
//!
//! One registry instance belongs to one session; it is built once (all
//! default codecs registered up front) and then only read. Lookup is by
//! element tag / type name; unknown tags fall back to the generic object
//! codec so newer or foreign documents still decode into attribute bags.

use rustc_hash::FxBuildHasher;
use selkie_model::GraphDataModel;

use crate::codecs::{
    ArrayCodec, CellCodec, GeometryCodec, GraphDataModelCodec, ObjectBagCodec, PointCodec,
    StylesheetCodec,
};
use crate::element::Element;
use crate::error::Result;
use crate::value::CodecValue;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// One per-type encoder/decoder pair, registered under the type's tag name.
///
/// `excluded` lists field names the codec must omit when encoding, so
/// derived or runtime-only fields stay out of documents even though they
/// exist on the in-memory object.
pub trait ObjectCodec {
    fn tag(&self) -> &str;

    fn excluded(&self) -> &[String] {
        &[]
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element>;

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue>;
}

pub struct EncodeContext<'a> {
    pub registry: &'a CodecRegistry,
    /// Set while encoding a whole model; the model codec reads it.
    pub model: Option<&'a GraphDataModel>,
}

impl EncodeContext<'_> {
    /// Encodes a nested value through the registry, dispatching on its
    /// runtime type.
    pub fn encode_value(&self, value: &CodecValue) -> Result<Element> {
        let tag = match value {
            CodecValue::Null => {
                return Ok(Element::new("Object"));
            }
            CodecValue::Cell(_) => "Cell",
            CodecValue::Geometry(_) => "Geometry",
            CodecValue::Point(_) => "Point",
            CodecValue::Style(_) => "Object",
            CodecValue::Stylesheet(_) => "Stylesheet",
            CodecValue::Object(bag) => bag.tag.as_str(),
            CodecValue::Array(_) => "Array",
            CodecValue::String(s) => {
                let mut el = Element::new("add");
                el.set_attr("value", s.clone());
                return Ok(el);
            }
        };
        self.registry.codec_for(tag).encode(value, self)
    }
}

pub struct DecodeContext<'a> {
    pub registry: &'a CodecRegistry,
    /// Set while decoding a whole model; the model codec takes it.
    pub model: Option<&'a mut GraphDataModel>,
}

impl DecodeContext<'_> {
    /// Decodes one element through the registry by tag name, falling back to
    /// the generic object codec for unknown tags.
    pub fn decode_element(&mut self, element: &Element) -> Result<CodecValue> {
        let registry = self.registry;
        registry.codec_for(&element.tag).decode(element, self)
    }
}

/// Tag name → codec table for one session.
pub struct CodecRegistry {
    codecs: HashMap<String, Box<dyn ObjectCodec>>,
    fallback: ObjectBagCodec,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// A registry with every built-in codec registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(GraphDataModelCodec::new()));
        registry.register(Box::new(CellCodec::new()));
        registry.register(Box::new(GeometryCodec::new()));
        registry.register(Box::new(PointCodec::new()));
        registry.register(Box::new(ArrayCodec::new()));
        registry.register(Box::new(ObjectBagCodec::new()));
        registry.register(Box::new(StylesheetCodec::new()));
        registry
    }

    pub fn empty() -> Self {
        Self {
            codecs: HashMap::default(),
            fallback: ObjectBagCodec::new(),
        }
    }

    /// Registers (or replaces) a codec under its own tag.
    pub fn register(&mut self, codec: Box<dyn ObjectCodec>) {
        self.codecs.insert(codec.tag().to_string(), codec);
    }

    pub fn find(&self, tag: &str) -> Option<&dyn ObjectCodec> {
        self.codecs.get(tag).map(Box::as_ref)
    }

    /// Lookup with generic fallback for forward/backward compatibility.
    pub fn codec_for(&self, tag: &str) -> &dyn ObjectCodec {
        match self.codecs.get(tag) {
            Some(codec) => codec.as_ref(),
            None => {
                tracing::debug!(tag, "no codec registered; using generic object codec");
                &self.fallback
            }
        }
    }
}
