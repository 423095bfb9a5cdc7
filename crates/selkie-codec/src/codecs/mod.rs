//! Built-in per-type codecs.

mod cell;
mod geometry;
mod model;
mod object;
mod stylesheet;

pub use cell::CellCodec;
pub use geometry::{GeometryCodec, PointCodec};
pub use model::GraphDataModelCodec;
pub use object::{ArrayCodec, ObjectBagCodec};
pub use stylesheet::StylesheetCodec;

use crate::element::Element;
use crate::error::{CodecError, Result};
use crate::value::CodecValue;

/// Error for a codec handed a value of the wrong runtime type.
pub(crate) fn unexpected(value: &CodecValue, expected: &str) -> CodecError {
    CodecError::UnexpectedElement {
        element: format!("{value:?}"),
        context: format!("encoding a {expected}"),
    }
}

/// Numeric attribute with a zero default; a present-but-malformed value is a
/// decode failure, never a silent default.
pub(crate) fn parse_number_attr(element: &Element, name: &str) -> Result<f64> {
    match element.attr(name) {
        None => Ok(0.0),
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| CodecError::InvalidAttribute {
                element: element.tag.clone(),
                attribute: name.to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Boolean attribute in the `"1"`/`"0"` wire form. Decode coerces back to a
/// real boolean; `"true"` and `"false"` are tolerated for hand-written
/// documents.
pub(crate) fn parse_bool_attr(element: &Element, name: &str, default: bool) -> Result<bool> {
    match element.attr(name) {
        None => Ok(default),
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(raw) => Err(CodecError::InvalidAttribute {
            element: element.tag.clone(),
            attribute: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
