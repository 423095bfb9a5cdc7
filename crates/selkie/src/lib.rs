#![forbid(unsafe_code)]

//! `selkie` is a headless diagram data model.
//!
//! It bundles:
//! - `selkie-model`: the transactional cell tree/graph, stylesheet cascade
//!   and undo/redo machinery
//! - `selkie-codec`: the registry-driven XML object-graph codec
//!
//! plus [`ModelXmlSerializer`], a small convenience for moving whole models
//! in and out of XML.

pub use selkie_codec::{
    Codec, CodecError, CodecRegistry, CodecValue, Element, ObjectCodec,
};
pub use selkie_model::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] selkie_model::ModelError),
    #[error(transparent)]
    Codec(#[from] selkie_codec::CodecError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Indented output when set; the compact form has no whitespace between
    /// elements. Both decode to equal models.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Imports and exports one model as XML through a session-owned registry.
pub struct ModelXmlSerializer<'a> {
    model: &'a mut GraphDataModel,
    registry: CodecRegistry,
}

impl<'a> ModelXmlSerializer<'a> {
    pub fn new(model: &'a mut GraphDataModel) -> Self {
        Self {
            model,
            registry: CodecRegistry::new(),
        }
    }

    /// A serializer with a caller-built registry, e.g. one with extra or
    /// reconfigured codecs.
    pub fn with_registry(model: &'a mut GraphDataModel, registry: CodecRegistry) -> Self {
        Self { model, registry }
    }

    /// Replaces the model content with the document's.
    pub fn import(&mut self, xml: &str) -> Result<()> {
        let element = Element::parse(xml)?;
        Codec::new(&self.registry).decode(&element, self.model)?;
        Ok(())
    }

    pub fn export(&self, options: ExportOptions) -> Result<String> {
        let element = Codec::new(&self.registry).encode(self.model)?;
        Ok(element.to_xml(options.pretty))
    }
}
