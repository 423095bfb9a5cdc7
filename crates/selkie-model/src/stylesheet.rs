//! Named style registry and the cascade resolver.

use indexmap::IndexMap;

use crate::style::{BASE_STYLE_NAMES, Style};

/// Registry of named styles plus the default vertex/edge styles.
///
/// Pure data; the only behavior is the cascade in [`Stylesheet::get_cell_style`].
#[derive(Debug, Clone)]
pub struct Stylesheet {
    styles: IndexMap<String, Style>,
    default_vertex_style: Style,
    default_edge_style: Style,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylesheet {
    pub fn new() -> Self {
        Self {
            styles: IndexMap::new(),
            default_vertex_style: Self::create_default_vertex_style(),
            default_edge_style: Self::create_default_edge_style(),
        }
    }

    fn create_default_vertex_style() -> Style {
        let mut style = Style::new();
        style
            .set("shape", "rectangle")
            .set("verticalAlign", "middle")
            .set("align", "center")
            .set("fillColor", "#C3D9FF")
            .set("strokeColor", "#6482B9")
            .set("fontColor", "#774400");
        style
    }

    fn create_default_edge_style() -> Style {
        let mut style = Style::new();
        style
            .set("shape", "connector")
            .set("endArrow", "classic")
            .set("verticalAlign", "middle")
            .set("align", "center")
            .set("strokeColor", "#6482B9")
            .set("fontColor", "#446299");
        style
    }

    pub fn default_vertex_style(&self) -> &Style {
        &self.default_vertex_style
    }

    pub fn set_default_vertex_style(&mut self, style: Style) {
        self.default_vertex_style = style;
    }

    pub fn default_edge_style(&self) -> &Style {
        &self.default_edge_style
    }

    pub fn set_default_edge_style(&mut self, style: Style) {
        self.default_edge_style = style;
    }

    /// Registers or overwrites a named style.
    pub fn put_cell_style(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Resolves the effective style of a cell.
    ///
    /// Merge order, shallow and last-write-wins: a copy of `default_style`,
    /// then each registered style named in the cell's `baseStyleNames` in
    /// list order (later names win on conflicts, unknown names are skipped),
    /// then the cell's own explicit properties, so direct overrides always
    /// beat named styles and defaults. `baseStyleNames` itself does not
    /// appear in the result.
    pub fn get_cell_style(&self, cell_style: &Style, default_style: &Style) -> Style {
        let mut effective = default_style.clone();
        if let Some(names) = cell_style.base_style_names() {
            for name in names {
                match self.styles.get(name) {
                    Some(named) => effective.merge_from(named),
                    None => {
                        // Deliberately permissive so partially loaded style
                        // libraries keep working.
                        tracing::trace!(name, "unknown base style name skipped");
                    }
                }
            }
        }
        for (key, value) in cell_style.iter() {
            if key == BASE_STYLE_NAMES {
                continue;
            }
            effective.set(key, value.clone());
        }
        effective
    }
}
