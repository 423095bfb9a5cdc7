//! The textual element tree.
//!
//! Codecs translate object graphs to and from this tree; XML is only the
//! outer skin. Attribute order is preserved because encoded output is
//! compared byte-for-byte against reference files.

use std::fmt::Write as _;

use crate::error::Result;

/// Attribute carried by nested child elements to name the owning field.
pub const AS_ATTR: &str = "as";

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets or replaces an attribute, preserving first-write position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The field this child element represents on its owner, if any.
    pub fn field_name(&self) -> Option<&str> {
        self.attr(AS_ATTR)
    }

    pub fn child_by_tag(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Parses an XML document into an element tree. Text content and
    /// comments are dropped: the format is attribute-only.
    pub fn parse(xml: &str) -> Result<Element> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(convert(doc.root_element()))
    }

    /// Serializes the tree; `pretty` inserts two-space indentation and
    /// newlines, the compact form has no whitespace between elements. Both
    /// forms parse back to an equal tree.
    pub fn to_xml(&self, pretty: bool) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0, pretty);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize, pretty: bool) {
        if pretty {
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, EscapeXml(value));
        }
        if self.children.is_empty() {
            out.push_str(" />");
        } else {
            out.push('>');
            if pretty {
                out.push('\n');
            }
            for child in &self.children {
                child.write_into(out, depth + 1, pretty);
            }
            if pretty {
                for _ in 0..depth {
                    out.push_str("  ");
                }
            }
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }
        if pretty {
            out.push('\n');
        }
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el.set_attr(attr.name(), attr.value());
    }
    for child in node.children().filter(roxmltree::Node::is_element) {
        el.children.push(convert(child));
    }
    el
}

struct EscapeXml<'a>(&'a str);

impl std::fmt::Display for EscapeXml<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                _ => f.write_char(ch)?,
            }
        }
        Ok(())
    }
}
