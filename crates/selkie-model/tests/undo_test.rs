use std::cell::RefCell;
use std::rc::Rc;

use selkie_model::{
    Cell, EventKind, Geometry, GraphDataModel, Style, UndoManager, UndoableEdit,
};

/// Feeds every published `Undo` capture event into a shared buffer, the way
/// an application wires the model to an [`UndoManager`].
fn capture_edits(model: &mut GraphDataModel) -> Rc<RefCell<Vec<UndoableEdit>>> {
    let edits: Rc<RefCell<Vec<UndoableEdit>>> = Rc::default();
    let seen = Rc::clone(&edits);
    model.add_listener(EventKind::Undo, move |evt| {
        seen.borrow_mut().push(evt.edit.clone());
    });
    edits
}

fn drain_into(manager: &mut UndoManager, edits: &Rc<RefCell<Vec<UndoableEdit>>>) {
    for edit in edits.borrow_mut().drain(..) {
        manager.undoable_edit_happened(edit);
    }
}

#[test]
fn undo_reverts_an_add_and_redo_reapplies_it() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("v1", "hello"), None).unwrap();
    drain_into(&mut manager, &edits);

    assert!(manager.undo(&mut model));
    assert!(!model.contains("v1"));
    assert_eq!(model.child_count("1"), 0);

    assert!(manager.redo(&mut model));
    assert!(model.contains("v1"));
    assert_eq!(model.value("v1"), Some("hello"));
    assert_eq!(model.children("1"), ["v1".to_string()]);
}

#[test]
fn undo_of_remove_restores_the_subtree_and_cleared_terminals() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.begin_update();
    model.add("1", Cell::vertex("v1", "v1"), None).unwrap();
    model.add("v1", Cell::vertex("port", "p"), None).unwrap();
    model.add("1", Cell::vertex("v2", "v2"), None).unwrap();
    model.add("1", Cell::edge("e1", "e"), None).unwrap();
    model.set_terminal("e1", Some("v1"), true).unwrap();
    model.set_terminal("e1", Some("v2"), false).unwrap();
    model
        .set_geometry("v1", Some(Geometry::new(10.0, 20.0, 80.0, 40.0)))
        .unwrap();
    model.end_update();
    drain_into(&mut manager, &edits);

    model.remove("v1").unwrap();
    drain_into(&mut manager, &edits);
    assert!(!model.contains("port"));
    assert_eq!(model.terminal("e1", true), None);

    assert!(manager.undo(&mut model));
    assert!(model.contains("v1"));
    assert!(model.contains("port"), "descendants come back with the subtree");
    assert_eq!(model.parent("port"), Some("v1"));
    assert_eq!(model.terminal("e1", true), Some("v1"));
    assert_eq!(
        model.geometry("v1").map(|g| (g.x, g.y, g.width, g.height)),
        Some((10.0, 20.0, 80.0, 40.0)),
        "restored cells keep their geometry"
    );
    // v1 returns to its original slot before v2.
    assert_eq!(model.child_at("1", 0), Some("v1"));
}

#[test]
fn undo_of_reparent_restores_parent_and_index() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.begin_update();
    model.add("1", Cell::vertex("a", "a"), None).unwrap();
    model.add("1", Cell::vertex("b", "b"), None).unwrap();
    model.add("1", Cell::vertex("c", "c"), None).unwrap();
    model.end_update();
    drain_into(&mut manager, &edits);

    model.set_parent("a", "c", None).unwrap();
    drain_into(&mut manager, &edits);
    assert_eq!(model.parent("a"), Some("c"));

    assert!(manager.undo(&mut model));
    assert_eq!(model.parent("a"), Some("1"));
    assert_eq!(
        model.children("1"),
        ["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn undo_of_property_changes_is_an_exact_inverse() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("v1", "before"), None).unwrap();
    drain_into(&mut manager, &edits);

    model.begin_update();
    model.set_value("v1", Some("after".into())).unwrap();
    model
        .set_geometry("v1", Some(Geometry::new(1.0, 2.0, 3.0, 4.0)))
        .unwrap();
    let mut style = Style::new();
    style.set("fillColor", "red");
    model.set_style("v1", style).unwrap();
    model.end_update();
    drain_into(&mut manager, &edits);

    assert!(manager.undo(&mut model));
    assert_eq!(model.value("v1"), Some("before"));
    assert!(model.geometry("v1").is_none());
    assert!(model.style("v1").is_some_and(Style::is_empty));

    assert!(manager.redo(&mut model));
    assert_eq!(model.value("v1"), Some("after"));
    assert_eq!(model.geometry("v1").map(|g| g.width), Some(3.0));
}

#[test]
fn replay_fires_change_but_no_undo_capture() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let changes = Rc::new(RefCell::new(0usize));
    let seen = Rc::clone(&changes);
    model.add_listener(EventKind::Change, move |_| {
        *seen.borrow_mut() += 1;
    });
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("v1", "v1"), None).unwrap();
    drain_into(&mut manager, &edits);
    assert_eq!(*changes.borrow(), 1);

    manager.undo(&mut model);
    assert_eq!(*changes.borrow(), 2, "replay publishes a fresh Change event");
    assert!(
        edits.borrow().is_empty(),
        "replay must not be captured as a new undoable edit"
    );

    manager.redo(&mut model);
    assert_eq!(*changes.borrow(), 3);
    assert!(edits.borrow().is_empty());
}

#[test]
fn repeated_undo_redo_round_trips() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("v1", "v1"), None).unwrap();
    model.set_value("v1", Some("renamed".into())).unwrap();
    drain_into(&mut manager, &edits);

    for _ in 0..3 {
        assert!(manager.undo(&mut model));
        assert!(manager.undo(&mut model));
        assert!(!manager.undo(&mut model), "history exhausted");
        assert!(!model.contains("v1"));

        assert!(manager.redo(&mut model));
        assert!(manager.redo(&mut model));
        assert!(!manager.redo(&mut model));
        assert_eq!(model.value("v1"), Some("renamed"));
    }
}

#[test]
fn a_new_edit_discards_the_redo_tail() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("a", "a"), None).unwrap();
    model.add("1", Cell::vertex("b", "b"), None).unwrap();
    drain_into(&mut manager, &edits);

    manager.undo(&mut model);
    assert!(manager.can_redo());

    model.add("1", Cell::vertex("c", "c"), None).unwrap();
    drain_into(&mut manager, &edits);
    assert!(!manager.can_redo(), "diverging edit invalidates the redo tail");
    assert!(!model.contains("b"));
    assert!(model.contains("c"));
}

#[test]
fn history_is_bounded_and_evicts_the_oldest_edit() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::with_size(2);

    model.add("1", Cell::vertex("a", "a"), None).unwrap();
    model.add("1", Cell::vertex("b", "b"), None).unwrap();
    model.add("1", Cell::vertex("c", "c"), None).unwrap();
    drain_into(&mut manager, &edits);

    assert!(manager.undo(&mut model));
    assert!(manager.undo(&mut model));
    assert!(!manager.undo(&mut model), "the oldest edit was evicted");
    assert!(model.contains("a"), "the evicted add is no longer undoable");
    assert!(!model.contains("b"));
    assert!(!model.contains("c"));
}

#[test]
fn a_root_change_clears_the_history() {
    let mut model = GraphDataModel::new();
    let edits = capture_edits(&mut model);
    let mut manager = UndoManager::new();

    model.add("1", Cell::vertex("a", "a"), None).unwrap();
    drain_into(&mut manager, &edits);
    assert!(manager.can_undo());

    model.set_root(Cell::default());
    drain_into(&mut manager, &edits);
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
}

#[test]
fn undo_on_an_empty_history_reports_false() {
    let mut model = GraphDataModel::new();
    let mut manager = UndoManager::new();
    assert!(!manager.undo(&mut model));
    assert!(!manager.redo(&mut model));
}
