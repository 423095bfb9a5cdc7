//! Reversible change records.
//!
//! Every mutating model operation appends one record to the pending edit of
//! the open transaction. A record stores both the applied and the previous
//! state; [`Change::execute`] applies the stored previous state and swaps the
//! two, so executing twice toggles between the before/after states. Undo runs
//! the records of an edit in reverse, redo runs them forward, both through
//! the same internal mutators the original operations used.

use crate::cell::Cell;
use crate::geometry::Geometry;
use crate::model::GraphDataModel;
use crate::style::Style;

/// One atomic, reversible change record.
#[derive(Debug, Clone)]
pub enum Change {
    /// The model root was replaced wholesale (decode does this). Not
    /// reversible; undo managers drop their history when they see one.
    Root(RootChange),
    /// A cell was added, removed or reparented.
    Child(ChildChange),
    Terminal(TerminalChange),
    Geometry(GeometryChange),
    Style(StyleChange),
    Value(ValueChange),
}

impl Change {
    pub(crate) fn execute(&mut self, model: &mut GraphDataModel) {
        match self {
            Change::Root(_) => {}
            Change::Child(c) => c.execute(model),
            Change::Terminal(c) => c.execute(model),
            Change::Geometry(c) => c.execute(model),
            Change::Style(c) => c.execute(model),
            Change::Value(c) => c.execute(model),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RootChange {
    pub root: String,
}

/// Covers add (`previous_parent == None`), remove (`parent == None`) and
/// reparent (both set). While the subtree is out of the model its cells live
/// in `detached`, pre-order with the moved cell first, so the record owns
/// everything needed to reinstate it.
#[derive(Debug, Clone)]
pub struct ChildChange {
    pub child: String,
    pub parent: Option<String>,
    pub previous_parent: Option<String>,
    pub index: usize,
    pub previous_index: usize,
    pub(crate) detached: Vec<Cell>,
}

impl ChildChange {
    fn execute(&mut self, model: &mut GraphDataModel) {
        match (&self.previous_parent, &self.parent) {
            (None, Some(_)) => {
                // Reverting an add: pull the subtree out of the arena.
                let (entries, _, _) = model.extract_subtree(&self.child);
                self.detached = entries;
            }
            (Some(parent), None) => {
                // Reverting a remove: put the held subtree back.
                let entries = std::mem::take(&mut self.detached);
                model.restore_subtree(entries, parent.clone(), self.previous_index);
            }
            (Some(parent), Some(_)) => {
                model.move_child(&self.child, parent, self.previous_index);
            }
            (None, None) => unreachable!("child change with neither side attached"),
        }
        std::mem::swap(&mut self.parent, &mut self.previous_parent);
        std::mem::swap(&mut self.index, &mut self.previous_index);
    }
}

#[derive(Debug, Clone)]
pub struct TerminalChange {
    pub edge: String,
    pub is_source: bool,
    pub terminal: Option<String>,
    pub previous: Option<String>,
}

impl TerminalChange {
    fn execute(&mut self, model: &mut GraphDataModel) {
        model.set_terminal_internal(&self.edge, self.previous.clone(), self.is_source);
        std::mem::swap(&mut self.terminal, &mut self.previous);
    }
}

#[derive(Debug, Clone)]
pub struct GeometryChange {
    pub cell: String,
    pub geometry: Option<Geometry>,
    pub previous: Option<Geometry>,
}

impl GeometryChange {
    fn execute(&mut self, model: &mut GraphDataModel) {
        model.set_geometry_internal(&self.cell, self.previous.clone());
        std::mem::swap(&mut self.geometry, &mut self.previous);
    }
}

#[derive(Debug, Clone)]
pub struct StyleChange {
    pub cell: String,
    pub style: Style,
    pub previous: Style,
}

impl StyleChange {
    fn execute(&mut self, model: &mut GraphDataModel) {
        model.set_style_internal(&self.cell, self.previous.clone());
        std::mem::swap(&mut self.style, &mut self.previous);
    }
}

#[derive(Debug, Clone)]
pub struct ValueChange {
    pub cell: String,
    pub value: Option<String>,
    pub previous: Option<String>,
}

impl ValueChange {
    fn execute(&mut self, model: &mut GraphDataModel) {
        model.set_value_internal(&self.cell, self.previous.clone());
        std::mem::swap(&mut self.value, &mut self.previous);
    }
}

/// The coalesced, reversible batch of records for one outermost transaction.
#[derive(Debug, Clone, Default)]
pub struct UndoableEdit {
    changes: Vec<Change>,
}

impl UndoableEdit {
    pub(crate) fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether this edit replaced the model root.
    pub fn has_root_change(&self) -> bool {
        self.changes.iter().any(|c| matches!(c, Change::Root(_)))
    }

    /// Replays the inverse of every record, newest first, inside one
    /// replay-marked transaction. The model fires a fresh `Change` event for
    /// the replay and suppresses the `Undo` capture event.
    pub fn undo(&mut self, model: &mut GraphDataModel) {
        model.begin_replay();
        for change in self.changes.iter_mut().rev() {
            change.execute(model);
            model.record(change.clone());
        }
        model.end_replay();
    }

    /// Replays every record forward again; the toggle inverse of [`undo`].
    ///
    /// [`undo`]: UndoableEdit::undo
    pub fn redo(&mut self, model: &mut GraphDataModel) {
        model.begin_replay();
        for change in self.changes.iter_mut() {
            change.execute(model);
            model.record(change.clone());
        }
        model.end_replay();
    }
}
