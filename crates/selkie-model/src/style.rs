//! Style property maps.
//!
//! A style is an ordered map of visual property names to scalar values.
//! Insertion order is preserved because it is observable in the encoded
//! attribute order of the XML form.

use indexmap::IndexMap;

/// Key of the style entry that lists named base styles for the cascade.
pub const BASE_STYLE_NAMES: &str = "baseStyleNames";

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Ordered list of strings; only used by `baseStyleNames` in practice.
    StringList(Vec<String>),
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::String(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::String(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Number(v as f64)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

impl From<Vec<String>> for StyleValue {
    fn from(v: Vec<String>) -> Self {
        StyleValue::StringList(v)
    }
}

/// An ordered property-name → value map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    entries: IndexMap<String, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<StyleValue> {
        self.entries.shift_remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The ordered base style names for the cascade, if any.
    pub fn base_style_names(&self) -> Option<&[String]> {
        match self.entries.get(BASE_STYLE_NAMES) {
            Some(StyleValue::StringList(names)) => Some(names),
            _ => None,
        }
    }

    pub fn set_base_style_names(&mut self, names: Vec<String>) -> &mut Self {
        self.entries
            .insert(BASE_STYLE_NAMES.to_string(), StyleValue::StringList(names));
        self
    }

    /// Copies every entry of `other` over `self` (shallow, last write wins).
    pub fn merge_from(&mut self, other: &Style) {
        for (k, v) in other.entries.iter() {
            self.entries.insert(k.clone(), v.clone());
        }
    }
}

impl FromIterator<(String, StyleValue)> for Style {
    fn from_iter<T: IntoIterator<Item = (String, StyleValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
