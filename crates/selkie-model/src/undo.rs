//! Bounded undo/redo history over coalesced edits.

use crate::change::UndoableEdit;
use crate::model::GraphDataModel;

/// Stores the edits published at transaction close and replays them.
///
/// The caller feeds edits in via [`undoable_edit_happened`], typically from a
/// listener on the model's `Undo` event. Replay goes back through the model's
/// mutating machinery, so each `undo`/`redo` publishes one fresh `Change`
/// event of its own; the model suppresses the `Undo` capture event during
/// replay, so nothing is re-recorded here.
///
/// [`undoable_edit_happened`]: UndoManager::undoable_edit_happened
#[derive(Debug, Default)]
pub struct UndoManager {
    history: Vec<UndoableEdit>,
    /// Position of the next edit to record; everything at and past it is the
    /// redo tail.
    index_of_next_add: usize,
    size: usize,
}

impl UndoManager {
    pub const DEFAULT_SIZE: usize = 100;

    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_SIZE)
    }

    /// A manager keeping at most `size` edits; the oldest is dropped first.
    pub fn with_size(size: usize) -> Self {
        Self {
            history: Vec::new(),
            index_of_next_add: 0,
            size: size.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index_of_next_add > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index_of_next_add < self.history.len()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.index_of_next_add = 0;
    }

    /// Records a freshly published edit, dropping the redo tail and evicting
    /// the oldest entries past the size bound. An edit that replaced the
    /// model root is not replayable, so it clears the whole history instead.
    pub fn undoable_edit_happened(&mut self, edit: UndoableEdit) {
        if edit.has_root_change() {
            self.clear();
            return;
        }
        self.history.truncate(self.index_of_next_add);
        self.history.push(edit);
        if self.history.len() > self.size {
            let overflow = self.history.len() - self.size;
            self.history.drain(..overflow);
        }
        self.index_of_next_add = self.history.len();
    }

    /// Replays the inverse of the most recent edit. Returns whether an edit
    /// was available.
    pub fn undo(&mut self, model: &mut GraphDataModel) -> bool {
        if self.index_of_next_add == 0 {
            return false;
        }
        self.index_of_next_add -= 1;
        self.history[self.index_of_next_add].undo(model);
        true
    }

    /// Replays the next undone edit forward again. Returns whether an edit
    /// was available.
    pub fn redo(&mut self, model: &mut GraphDataModel) -> bool {
        if self.index_of_next_add >= self.history.len() {
            return false;
        }
        self.history[self.index_of_next_add].redo(model);
        self.index_of_next_add += 1;
        true
    }
}
