#![forbid(unsafe_code)]

//! Generic object-graph codec for `selkie-model`.
//!
//! A registry of per-type codecs translates models, cells, geometries,
//! stylesheets, arrays and plain objects to and from a textual element tree
//! (XML on the outside). Reference fields are encoded as id attributes and
//! resolved in a second decode pass, so cyclic and forward references cost
//! nothing; unknown tags fall back to a generic attribute-bag codec for
//! format compatibility.
//!
//! The wire format is kept byte-compatible with the reference output:
//! booleans as `"1"`/`"0"`, JS-style number formatting, default-valued
//! fields omitted, and both a pretty and a compact form that decode to equal
//! graphs.

pub mod codec;
pub mod codecs;
pub mod element;
pub mod error;
pub mod registry;
pub mod value;

pub use codec::Codec;
pub use codecs::{
    ArrayCodec, CellCodec, GeometryCodec, GraphDataModelCodec, ObjectBagCodec, PointCodec,
    StylesheetCodec,
};
pub use element::{AS_ATTR, Element};
pub use error::{CodecError, Result};
pub use registry::{CodecRegistry, DecodeContext, EncodeContext, ObjectCodec};
pub use value::{CodecValue, ObjectBag, format_number, parse_scalar, scalar_to_attr};
