//! The transactional cell model.
//!
//! Cells live in an id-indexed arena; the ownership tree and the edge
//! terminal graph are both expressed as id references, so cross-links and
//! edge-to-edge connections never fight the borrow checker. Mutations apply
//! immediately; what transactions defer is *notification*: every operation
//! appends a change record, and one coalesced [`UndoableEdit`] is published
//! when the outermost `begin_update`/`end_update` pair closes.

use rustc_hash::FxBuildHasher;

use crate::cell::Cell;
use crate::change::{
    Change, ChildChange, GeometryChange, RootChange, StyleChange, TerminalChange, UndoableEdit,
    ValueChange,
};
use crate::error::{ModelError, Result};
use crate::event::{EventKind, EventSource, ListenerId, ModelEvent};
use crate::geometry::Geometry;
use crate::style::Style;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug)]
pub struct GraphDataModel {
    cells: HashMap<String, Cell>,
    root: String,
    next_id: u64,
    update_level: u32,
    current_edit: Vec<Change>,
    replaying: bool,
    events: EventSource,
}

impl Default for GraphDataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDataModel {
    /// Creates a model holding the synthetic root (id `"0"`) with one default
    /// layer child (id `"1"`). User cells go under a layer, never directly
    /// under the root.
    pub fn new() -> Self {
        let mut cells: HashMap<String, Cell> = HashMap::default();

        let mut root = Cell::default();
        root.id = Some("0".to_string());
        root.children = vec!["1".to_string()];
        cells.insert("0".to_string(), root);

        let mut layer = Cell::default();
        layer.id = Some("1".to_string());
        layer.parent = Some("0".to_string());
        cells.insert("1".to_string(), layer);

        Self {
            cells,
            root: "0".to_string(),
            next_id: 2,
            update_level: 0,
            current_edit: Vec::new(),
            replaying: false,
            events: EventSource::new(),
        }
    }

    // ----- read access -------------------------------------------------

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_cell(&self) -> &Cell {
        self.cells
            .get(&self.root)
            .expect("the model root is always present in the arena")
    }

    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cells.contains_key(id)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.cells.get(id).and_then(|c| c.parent.as_deref())
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.cells.get(id).map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    pub fn child_count(&self, id: &str) -> usize {
        self.children(id).len()
    }

    pub fn child_at(&self, id: &str, index: usize) -> Option<&str> {
        self.children(id).get(index).map(String::as_str)
    }

    pub fn terminal(&self, edge: &str, is_source: bool) -> Option<&str> {
        self.cells.get(edge).and_then(|c| c.terminal(is_source))
    }

    pub fn is_vertex(&self, id: &str) -> bool {
        self.cells.get(id).is_some_and(Cell::is_vertex)
    }

    pub fn is_edge(&self, id: &str) -> bool {
        self.cells.get(id).is_some_and(Cell::is_edge)
    }

    pub fn geometry(&self, id: &str) -> Option<&Geometry> {
        self.cells.get(id).and_then(|c| c.geometry.as_ref())
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        self.cells.get(id).map(|c| &c.style)
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.cells.get(id).and_then(|c| c.value.as_deref())
    }

    /// Ids of `id` and all its descendants, ownership-tree pre-order.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(cur) = stack.pop() {
            if let Some(cell) = self.cells.get(&cur) {
                for child in cell.children.iter().rev() {
                    stack.push(child.clone());
                }
                out.push(cur);
            }
        }
        out
    }

    // ----- transactions ------------------------------------------------

    /// Opens (or nests into) a transaction. Notification is deferred until
    /// the matching `end_update` closes the outermost level.
    pub fn begin_update(&mut self) {
        self.update_level += 1;
    }

    /// Closes one transaction level. When the outermost level closes with
    /// pending records, fires one `Undo` capture event (unless replaying)
    /// followed by one aggregated `Change` event.
    ///
    /// Calling with no open transaction is tolerated as a no-op so unbalanced
    /// caller code cannot corrupt the nesting counter; it is still a bug on
    /// the caller's side, hence the warning.
    pub fn end_update(&mut self) {
        if self.update_level == 0 {
            tracing::warn!("end_update called with no open transaction; ignored");
            return;
        }
        self.update_level -= 1;
        if self.update_level == 0 && !self.current_edit.is_empty() {
            let edit = UndoableEdit::new(std::mem::take(&mut self.current_edit));
            if !self.replaying {
                self.events.fire(&ModelEvent {
                    kind: EventKind::Undo,
                    edit: &edit,
                });
            }
            self.events.fire(&ModelEvent {
                kind: EventKind::Change,
                edit: &edit,
            });
        }
    }

    pub fn update_level(&self) -> u32 {
        self.update_level
    }

    pub fn add_listener(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&ModelEvent<'_>) + 'static,
    ) -> ListenerId {
        self.events.add_listener(kind, handler)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    // ----- mutating operations -----------------------------------------

    /// Adds a detached cell under `parent` at `index` (append when `None`).
    ///
    /// An unset cell id is auto-assigned from a per-model monotonic counter;
    /// an explicit id must be unique in the model or the call fails leaving
    /// the model untouched. Returns the id under which the cell was added.
    pub fn add(&mut self, parent: &str, mut cell: Cell, index: Option<usize>) -> Result<String> {
        let parent_len = match self.cells.get(parent) {
            Some(p) => p.children.len(),
            None => {
                return Err(ModelError::UnknownCell {
                    id: parent.to_string(),
                });
            }
        };
        let id = match cell.id.take() {
            Some(id) if self.cells.contains_key(&id) => {
                return Err(ModelError::DuplicateId { id });
            }
            Some(id) => id,
            None => self.create_id(),
        };
        cell.id = Some(id.clone());
        cell.parent = Some(parent.to_string());
        let index = index.unwrap_or(parent_len).min(parent_len);

        self.begin_update();
        self.cells.insert(id.clone(), cell);
        if let Some(p) = self.cells.get_mut(parent) {
            p.children.insert(index, id.clone());
        }
        self.record(Change::Child(ChildChange {
            child: id.clone(),
            parent: Some(parent.to_string()),
            previous_parent: None,
            index,
            previous_index: 0,
            detached: Vec::new(),
        }));
        self.end_update();
        Ok(id)
    }

    /// Removes a cell and all its descendants.
    ///
    /// Surviving edges whose source or target pointed into the removed set
    /// lose that terminal reference; the dangling edge cell itself stays in
    /// the tree. The root cannot be removed (see `set_root`).
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if !self.cells.contains_key(id) {
            return Err(ModelError::UnknownCell { id: id.to_string() });
        }
        if id == self.root {
            return Err(ModelError::CannotRemoveRoot);
        }

        let removed: HashSet<String> = self.descendants(id).into_iter().collect();

        // Surviving edges pointing into the removed set, in tree order so
        // the change records are deterministic.
        let mut cleared: Vec<(String, bool, String)> = Vec::new();
        for cid in self.descendants(&self.root.clone()) {
            if removed.contains(&cid) {
                continue;
            }
            let cell = &self.cells[&cid];
            if let Some(s) = &cell.source {
                if removed.contains(s) {
                    cleared.push((cid.clone(), true, s.clone()));
                }
            }
            if let Some(t) = &cell.target {
                if removed.contains(t) {
                    cleared.push((cid.clone(), false, t.clone()));
                }
            }
        }

        self.begin_update();
        for (edge, is_source, old) in cleared {
            self.set_terminal_internal(&edge, None, is_source);
            self.record(Change::Terminal(TerminalChange {
                edge,
                is_source,
                terminal: None,
                previous: Some(old),
            }));
        }
        let (detached, previous_parent, previous_index) = self.extract_subtree(id);
        self.record(Change::Child(ChildChange {
            child: id.to_string(),
            parent: None,
            previous_parent,
            index: 0,
            previous_index,
            detached,
        }));
        self.end_update();
        Ok(())
    }

    /// Moves an attached cell (with its subtree) under a new parent.
    pub fn set_parent(&mut self, id: &str, parent: &str, index: Option<usize>) -> Result<()> {
        if !self.cells.contains_key(id) {
            return Err(ModelError::UnknownCell { id: id.to_string() });
        }
        if !self.cells.contains_key(parent) {
            return Err(ModelError::UnknownCell {
                id: parent.to_string(),
            });
        }
        if self.cells[id].parent.is_none() {
            // Only the root has no parent; it cannot be reparented.
            return Err(ModelError::Detached { id: id.to_string() });
        }
        // Walk up from the new parent; hitting `id` would create a cycle.
        let mut cursor = Some(parent.to_string());
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(ModelError::CyclicParent {
                    id: id.to_string(),
                    parent: parent.to_string(),
                });
            }
            cursor = self.cells.get(&ancestor).and_then(|c| c.parent.clone());
        }

        self.begin_update();
        let (previous_parent, previous_index, new_index) =
            self.move_child(id, parent, index.unwrap_or(usize::MAX));
        self.record(Change::Child(ChildChange {
            child: id.to_string(),
            parent: Some(parent.to_string()),
            previous_parent,
            index: new_index,
            previous_index,
            detached: Vec::new(),
        }));
        self.end_update();
        Ok(())
    }

    /// Connects or disconnects one terminal of an edge. Purely a graph
    /// operation: tree parentage is untouched, and the terminal may be any
    /// cell of the model including another edge.
    pub fn set_terminal(
        &mut self,
        edge: &str,
        terminal: Option<&str>,
        is_source: bool,
    ) -> Result<()> {
        if !self.cells.contains_key(edge) {
            return Err(ModelError::UnknownCell {
                id: edge.to_string(),
            });
        }
        if let Some(t) = terminal {
            if !self.cells.contains_key(t) {
                return Err(ModelError::UnknownCell { id: t.to_string() });
            }
        }
        self.begin_update();
        let previous = self.set_terminal_internal(edge, terminal.map(String::from), is_source);
        self.record(Change::Terminal(TerminalChange {
            edge: edge.to_string(),
            is_source,
            terminal: terminal.map(String::from),
            previous,
        }));
        self.end_update();
        Ok(())
    }

    pub fn set_geometry(&mut self, id: &str, geometry: Option<Geometry>) -> Result<()> {
        if !self.cells.contains_key(id) {
            return Err(ModelError::UnknownCell { id: id.to_string() });
        }
        self.begin_update();
        let previous = self.set_geometry_internal(id, geometry.clone());
        self.record(Change::Geometry(GeometryChange {
            cell: id.to_string(),
            geometry,
            previous,
        }));
        self.end_update();
        Ok(())
    }

    pub fn set_style(&mut self, id: &str, style: Style) -> Result<()> {
        if !self.cells.contains_key(id) {
            return Err(ModelError::UnknownCell { id: id.to_string() });
        }
        self.begin_update();
        let previous = self.set_style_internal(id, style.clone());
        self.record(Change::Style(StyleChange {
            cell: id.to_string(),
            style,
            previous,
        }));
        self.end_update();
        Ok(())
    }

    pub fn set_value(&mut self, id: &str, value: Option<String>) -> Result<()> {
        if !self.cells.contains_key(id) {
            return Err(ModelError::UnknownCell { id: id.to_string() });
        }
        self.begin_update();
        let previous = self.set_value_internal(id, value.clone());
        self.record(Change::Value(ValueChange {
            cell: id.to_string(),
            value,
            previous,
        }));
        self.end_update();
        Ok(())
    }

    /// Replaces the entire model content with a new root cell, returning the
    /// root's id. Decode uses this before rebuilding the tree. The emitted
    /// `Root` change is not reversible; undo managers clear their history
    /// when they see one.
    pub fn set_root(&mut self, mut root: Cell) -> String {
        let id = match root.id.take() {
            Some(id) => id,
            None => self.create_id(),
        };
        root.id = Some(id.clone());
        root.parent = None;
        root.children.clear();

        self.begin_update();
        self.cells.clear();
        self.cells.insert(id.clone(), root);
        self.root = id.clone();
        self.record(Change::Root(RootChange { root: id.clone() }));
        self.end_update();
        id
    }

    // ----- internals shared with change replay -------------------------

    fn create_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if !self.cells.contains_key(&id) {
                return id;
            }
        }
    }

    pub(crate) fn record(&mut self, change: Change) {
        self.current_edit.push(change);
    }

    pub(crate) fn begin_replay(&mut self) {
        self.replaying = true;
        self.begin_update();
    }

    pub(crate) fn end_replay(&mut self) {
        self.end_update();
        self.replaying = false;
    }

    pub(crate) fn set_terminal_internal(
        &mut self,
        edge: &str,
        terminal: Option<String>,
        is_source: bool,
    ) -> Option<String> {
        let Some(cell) = self.cells.get_mut(edge) else {
            return None;
        };
        if is_source {
            std::mem::replace(&mut cell.source, terminal)
        } else {
            std::mem::replace(&mut cell.target, terminal)
        }
    }

    pub(crate) fn set_geometry_internal(
        &mut self,
        id: &str,
        geometry: Option<Geometry>,
    ) -> Option<Geometry> {
        match self.cells.get_mut(id) {
            Some(cell) => std::mem::replace(&mut cell.geometry, geometry),
            None => None,
        }
    }

    pub(crate) fn set_style_internal(&mut self, id: &str, style: Style) -> Style {
        match self.cells.get_mut(id) {
            Some(cell) => std::mem::replace(&mut cell.style, style),
            None => Style::new(),
        }
    }

    pub(crate) fn set_value_internal(&mut self, id: &str, value: Option<String>) -> Option<String> {
        match self.cells.get_mut(id) {
            Some(cell) => std::mem::replace(&mut cell.value, value),
            None => None,
        }
    }

    /// Detaches `child` from its parent and pulls its whole subtree out of
    /// the arena. Returns the pre-order entries (the detached cell first),
    /// the old parent and the old child index.
    pub(crate) fn extract_subtree(&mut self, child: &str) -> (Vec<Cell>, Option<String>, usize) {
        let ids = self.descendants(child);
        let parent = self.cells.get(child).and_then(|c| c.parent.clone());
        let mut old_index = 0;
        if let Some(p) = &parent {
            if let Some(parent_cell) = self.cells.get_mut(p) {
                if let Some(pos) = parent_cell.children.iter().position(|c| c == child) {
                    parent_cell.children.remove(pos);
                    old_index = pos;
                }
            }
        }
        let mut entries = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(cell) = self.cells.remove(id) {
                entries.push(cell);
            }
        }
        (entries, parent, old_index)
    }

    /// Reinserts a subtree previously produced by `extract_subtree`, hanging
    /// its top cell under `parent` at `index`.
    pub(crate) fn restore_subtree(&mut self, mut entries: Vec<Cell>, parent: String, index: usize) {
        let Some(top) = entries.first_mut() else {
            return;
        };
        top.parent = Some(parent.clone());
        let top_id = top
            .id
            .clone()
            .expect("cells that were part of a model always carry an id");
        for cell in entries {
            let id = cell
                .id
                .clone()
                .expect("cells that were part of a model always carry an id");
            self.cells.insert(id, cell);
        }
        if let Some(parent_cell) = self.cells.get_mut(&parent) {
            let i = index.min(parent_cell.children.len());
            parent_cell.children.insert(i, top_id);
        }
    }

    /// Moves an attached cell to `parent` at `index` (clamped). Returns the
    /// old parent, the old child index and the effective new index.
    pub(crate) fn move_child(
        &mut self,
        child: &str,
        parent: &str,
        index: usize,
    ) -> (Option<String>, usize, usize) {
        let old_parent = self.cells.get(child).and_then(|c| c.parent.clone());
        let mut old_index = 0;
        if let Some(p) = &old_parent {
            if let Some(parent_cell) = self.cells.get_mut(p) {
                if let Some(pos) = parent_cell.children.iter().position(|c| c == child) {
                    parent_cell.children.remove(pos);
                    old_index = pos;
                }
            }
        }
        if let Some(cell) = self.cells.get_mut(child) {
            cell.parent = Some(parent.to_string());
        }
        let mut new_index = 0;
        if let Some(parent_cell) = self.cells.get_mut(parent) {
            new_index = index.min(parent_cell.children.len());
            parent_cell.children.insert(new_index, child.to_string());
        }
        (old_parent, old_index, new_index)
    }
}
