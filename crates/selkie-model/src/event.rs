//! Change notification plumbing.
//!
//! Each model owns one listener list. Dispatch is synchronous, in
//! subscription order, on the caller's thread; there are no timers or queued
//! deliveries, so a listener always observes the model state produced by the
//! transaction that triggered it.

use crate::change::UndoableEdit;

/// Events fired when the outermost transaction closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Capture point for undo machinery. Not fired while an edit is being
    /// replayed, so replaying never re-captures itself.
    Undo,
    /// Aggregated change notification; fired for every closed outermost
    /// transaction, including replays.
    Change,
}

/// Payload passed to listeners: the coalesced edit for one outermost
/// transaction.
pub struct ModelEvent<'a> {
    pub kind: EventKind,
    pub edit: &'a UndoableEdit,
}

/// Token returned by [`EventSource::add_listener`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ListenerEntry {
    id: ListenerId,
    kind: EventKind,
    handler: Box<dyn FnMut(&ModelEvent<'_>)>,
}

/// A per-model list of subscribed listeners.
#[derive(Default)]
pub struct EventSource {
    entries: Vec<ListenerEntry>,
    next_id: u64,
}

impl std::fmt::Debug for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource")
            .field("listeners", &self.entries.len())
            .finish()
    }
}

impl EventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&ModelEvent<'_>) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ListenerEntry {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns whether a listener with this id was present.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn fire(&mut self, event: &ModelEvent<'_>) {
        for entry in &mut self.entries {
            if entry.kind == event.kind {
                (entry.handler)(event);
            }
        }
    }
}
