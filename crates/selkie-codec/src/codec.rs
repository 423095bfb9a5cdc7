//! The codec driver: entry points tying a registry to a model.

use selkie_model::GraphDataModel;

use crate::element::Element;
use crate::error::{CodecError, Result};
use crate::registry::{CodecRegistry, DecodeContext, EncodeContext};
use crate::value::CodecValue;

/// Encoder/decoder bound to one registry.
///
/// The registry is built once per session and shared; the codec itself is a
/// cheap, borrowing handle.
pub struct Codec<'r> {
    registry: &'r CodecRegistry,
}

impl<'r> Codec<'r> {
    pub fn new(registry: &'r CodecRegistry) -> Self {
        Self { registry }
    }

    /// Encodes a whole model as its element tree.
    pub fn encode(&self, model: &GraphDataModel) -> Result<Element> {
        let ctx = EncodeContext {
            registry: self.registry,
            model: Some(model),
        };
        self.registry
            .codec_for("GraphDataModel")
            .encode(&CodecValue::Null, &ctx)
    }

    /// Decodes a model element tree into `model`, replacing its content.
    pub fn decode(&self, element: &Element, model: &mut GraphDataModel) -> Result<()> {
        let mut ctx = DecodeContext {
            registry: self.registry,
            model: Some(model),
        };
        match ctx.decode_element(element)? {
            CodecValue::Null => Ok(()),
            _ => Err(CodecError::UnexpectedElement {
                element: element.tag.clone(),
                context: "decoding into a model".to_string(),
            }),
        }
    }

    /// Encodes any registered value standalone (no model context).
    pub fn encode_value(&self, value: &CodecValue) -> Result<Element> {
        let ctx = EncodeContext {
            registry: self.registry,
            model: None,
        };
        ctx.encode_value(value)
    }

    /// Decodes one element standalone; unknown tags come back as generic
    /// attribute bags.
    pub fn decode_value(&self, element: &Element) -> Result<CodecValue> {
        let mut ctx = DecodeContext {
            registry: self.registry,
            model: None,
        };
        ctx.decode_element(element)
    }
}
