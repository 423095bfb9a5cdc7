#![forbid(unsafe_code)]

//! Headless diagram data model.
//!
//! Design goals:
//! - a mutable tree-plus-graph cell structure (ownership tree, independent
//!   source/target terminal references) with nested atomic updates
//! - coalesced change notification and undo/redo capture at transaction
//!   boundaries
//! - a stylesheet cascade with the permissive merge semantics diagram tools
//!   rely on
//!
//! Everything is single-threaded and synchronous: operations run to
//! completion on the caller's thread, and notifications are delivered in the
//! order transactions close. Serialization lives in `selkie-codec`.

pub mod cell;
pub mod change;
pub mod error;
pub mod event;
pub mod geometry;
pub mod model;
pub mod style;
pub mod stylesheet;
pub mod undo;

pub use cell::Cell;
pub use change::{
    Change, ChildChange, GeometryChange, RootChange, StyleChange, TerminalChange, UndoableEdit,
    ValueChange,
};
pub use error::{ModelError, Result};
pub use event::{EventKind, EventSource, ListenerId, ModelEvent};
pub use geometry::{Geometry, Point, point};
pub use model::GraphDataModel;
pub use style::{BASE_STYLE_NAMES, Style, StyleValue};
pub use stylesheet::Stylesheet;
pub use undo::UndoManager;
