//! Core state engine for a card design editor.
//!
//! This crate owns the working state of one open design document: its
//! elements (front and back side), canvas properties, selection, bounded
//! undo/redo history, and persistence through a pluggable [`DesignStore`].
//! It is UI-agnostic; a frontend drives the [`DesignEngine`] and re-renders
//! from its accessors when notified of changes.

pub mod design;
pub mod element;
pub mod engine;
pub mod history;
pub mod storage;
pub mod transform;

pub use design::{CanvasSize, Design, DEFAULT_CANVAS_BACKGROUND};
pub use element::{
    generate_id, is_near_position, is_same_position, Element, ElementId, ElementKind, ImageData,
    Position, ShapeData, TextData, POSITION_MERGE_THRESHOLD,
};
pub use engine::{ChangeKind, DesignEngine, ElementUpdate, DUPLICATE_OFFSET};
pub use history::{History, HistoryState, MAX_HISTORY};
pub use storage::{BoxFuture, DesignPatch, DesignStore, MemoryStore, StoreError, StoreResult};
pub use transform::{
    GroupMoveState, GroupResizeState, PositionUpdate, SizeUpdate, MIN_ELEMENT_SIZE,
};
