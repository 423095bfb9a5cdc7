//! Cells: nodes of the diagram ownership tree.
//!
//! A cell is created detached and only participates in a model once added to
//! a parent that is itself rooted there. Relationships (parent, children,
//! edge terminals) are stored as string ids into the owning model's arena,
//! the same way `dugong`-style graph containers key everything by node id.

use crate::geometry::Geometry;
use crate::style::Style;

/// A node in the ownership tree, optionally doubling as a graph edge via its
/// source/target terminal references.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) id: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) vertex: bool,
    pub(crate) edge: bool,
    pub(crate) connectable: bool,
    pub(crate) visible: bool,
    pub(crate) collapsed: bool,
    pub(crate) geometry: Option<Geometry>,
    pub(crate) style: Style,
    pub(crate) parent: Option<String>,
    pub(crate) children: Vec<String>,
    pub(crate) source: Option<String>,
    pub(crate) target: Option<String>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            id: None,
            value: None,
            vertex: false,
            edge: false,
            connectable: true,
            visible: true,
            collapsed: false,
            geometry: None,
            style: Style::new(),
            parent: None,
            children: Vec::new(),
            source: None,
            target: None,
        }
    }
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A detached vertex cell with the given id and payload.
    pub fn vertex(id: impl Into<String>, value: impl Into<String>) -> Self {
        let mut cell = Cell::new(value);
        cell.id = Some(id.into());
        cell.vertex = true;
        cell
    }

    /// A detached edge cell with the given id and payload. Edges carry an
    /// empty geometry so waypoints can be attached later.
    pub fn edge(id: impl Into<String>, value: impl Into<String>) -> Self {
        let mut cell = Cell::new(value);
        cell.id = Some(id.into());
        cell.edge = true;
        cell.geometry = Some(Geometry::default());
        cell
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn is_vertex(&self) -> bool {
        self.vertex
    }

    /// The vertex and edge flags are mutually exclusive; setting one clears
    /// the other.
    pub fn set_vertex(&mut self, vertex: bool) {
        self.vertex = vertex;
        if vertex {
            self.edge = false;
        }
    }

    pub fn is_edge(&self) -> bool {
        self.edge
    }

    pub fn set_edge(&mut self, edge: bool) {
        self.edge = edge;
        if edge {
            self.vertex = false;
        }
    }

    pub fn is_connectable(&self) -> bool {
        self.connectable
    }

    pub fn set_connectable(&mut self, connectable: bool) {
        self.connectable = connectable;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, index: usize) -> Option<&str> {
        self.children.get(index).map(String::as_str)
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// The source (`is_source == true`) or target terminal id.
    pub fn terminal(&self, is_source: bool) -> Option<&str> {
        if is_source {
            self.source.as_deref()
        } else {
            self.target.as_deref()
        }
    }
}
