//! The design engine: owner of the working document state.
//!
//! All mutations of a design in the editor flow through this type. It holds
//! the two element lists (front and back side), canvas properties, the
//! selection, and the undo/redo [`History`], and talks to a [`DesignStore`]
//! for persistence. UI layers read state through the accessors and issue
//! mutation calls; they never mutate elements in place.
//!
//! Commit policy: a history snapshot is recorded before every element
//! add/update/delete, z-order change, and canvas change, and once at the end
//! of a drag or resize gesture. Live position and dimension writes during a
//! gesture do not touch history.

use crate::design::{CanvasSize, Design};
use crate::element::{generate_id, Element, ElementId, ElementKind, Position};
use crate::history::{History, HistoryState};
use crate::storage::{DesignPatch, DesignStore, StoreError};
use crate::transform::PositionUpdate;
use kurbo::Vec2;
use log::{debug, warn};
use std::sync::Arc;

/// Offset applied to a duplicated element's position.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// What part of the engine state a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A whole document was loaded, reset, or replaced.
    Document,
    /// Element lists changed.
    Elements,
    /// Selection changed.
    Selection,
    /// Canvas size or background changed.
    Canvas,
    /// State was restored from history.
    History,
    /// Loading flag, error, or persisted metadata changed.
    Persistence,
}

/// Callback invoked after every engine mutation.
pub type ChangeCallback = Box<dyn FnMut(ChangeKind) + Send>;

/// Partial update to an element's common fields or data payload.
///
/// Only the set fields are written. Replacing `kind` swaps the whole data
/// payload; merging inside the payload is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct ElementUpdate {
    pub position: Option<Position>,
    pub z_index: Option<i32>,
    pub is_locked: Option<bool>,
    pub is_visible: Option<bool>,
    pub kind: Option<ElementKind>,
}

impl ElementUpdate {
    /// Update that replaces the data payload.
    pub fn kind(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Update that toggles visibility.
    pub fn visibility(visible: bool) -> Self {
        Self {
            is_visible: Some(visible),
            ..Self::default()
        }
    }

    /// Update that toggles the lock flag.
    pub fn locked(locked: bool) -> Self {
        Self {
            is_locked: Some(locked),
            ..Self::default()
        }
    }

    fn apply_to(&self, element: &mut Element) {
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(is_locked) = self.is_locked {
            element.is_locked = is_locked;
        }
        if let Some(is_visible) = self.is_visible {
            element.is_visible = is_visible;
        }
        if let Some(kind) = &self.kind {
            element.kind = kind.clone();
        }
    }
}

/// State container for one open design document.
pub struct DesignEngine<S: DesignStore> {
    store: Arc<S>,
    elements: Vec<Element>,
    backside_elements: Vec<Element>,
    selected_element_id: Option<ElementId>,
    canvas_size: CanvasSize,
    canvas_background: String,
    design: Option<Design>,
    is_loading: bool,
    error: Option<String>,
    is_dragging: bool,
    history: History,
    revision: u64,
    on_change: Option<ChangeCallback>,
}

impl<S: DesignStore> DesignEngine<S> {
    /// Create an engine with a fresh untitled design.
    pub fn new(store: Arc<S>) -> Self {
        let fresh = Design::untitled();
        let mut engine = Self {
            store,
            elements: Vec::new(),
            backside_elements: Vec::new(),
            selected_element_id: None,
            canvas_size: fresh.canvas_size,
            canvas_background: fresh.canvas_background,
            design: None,
            is_loading: false,
            error: None,
            is_dragging: false,
            history: History::new(),
            revision: 0,
            on_change: None,
        };
        let seed = engine.snapshot();
        engine.history.reset(seed);
        engine
    }

    // ---- accessors -------------------------------------------------------

    /// Front-side elements.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Back-side elements.
    pub fn backside_elements(&self) -> &[Element] {
        &self.backside_elements
    }

    /// Elements of the requested side.
    pub fn side(&self, backside: bool) -> &[Element] {
        if backside {
            &self.backside_elements
        } else {
            &self.elements
        }
    }

    /// Currently selected element, if any.
    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.selected_element_id
    }

    /// Canvas dimensions.
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// Canvas background color.
    pub fn canvas_background(&self) -> &str {
        &self.canvas_background
    }

    /// Persisted metadata of the open design, if it has been saved or loaded.
    pub fn design(&self) -> Option<&Design> {
        self.design.as_ref()
    }

    /// True while a persistence call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last persistence error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True between `start_drag` and `end_drag`.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Monotonic counter bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True if undo would change state. Enforces the real bound; the
    /// history cursor alone is advisory.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
            || self
                .history
                .current()
                .map(|current| !self.live_matches(current))
                .unwrap_or(false)
    }

    /// True if redo would change state.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Register the change callback invoked after every mutation.
    pub fn set_on_change(&mut self, callback: impl FnMut(ChangeKind) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    // ---- document lifecycle ----------------------------------------------

    /// Replace the working state from a full design, or clear to a fresh
    /// untitled one. Resets history to a single snapshot of the new state.
    pub fn set_design(&mut self, design: Option<Design>) {
        match design {
            Some(design) => {
                self.elements = design.elements.clone();
                self.backside_elements = design.backside_elements.clone();
                self.canvas_size = design.canvas_size;
                self.canvas_background = design.canvas_background.clone();
                self.design = Some(design);
            }
            None => {
                let fresh = Design::untitled();
                self.elements = Vec::new();
                self.backside_elements = Vec::new();
                self.canvas_size = fresh.canvas_size;
                self.canvas_background = fresh.canvas_background;
                self.design = None;
            }
        }
        self.selected_element_id = None;
        self.error = None;
        self.is_dragging = false;
        let seed = self.snapshot();
        self.history.reset(seed);
        self.notify(ChangeKind::Document);
    }

    /// Open a design document.
    pub fn load_design(&mut self, design: Design) {
        debug!(
            "loading design {}",
            design.id.as_deref().unwrap_or("<unsaved>")
        );
        self.set_design(Some(design));
    }

    /// Clear to a fresh untitled design with default canvas properties.
    pub fn reset_design(&mut self) {
        debug!("resetting to untitled design");
        self.set_design(None);
    }

    // ---- selection and gestures ------------------------------------------

    /// Select an element, or clear the selection with `None`.
    pub fn set_selected_element(&mut self, id: Option<ElementId>) {
        self.selected_element_id = id;
        self.notify(ChangeKind::Selection);
    }

    /// Enter a drag or resize gesture.
    pub fn start_drag(&mut self) {
        self.is_dragging = true;
        self.notify(ChangeKind::Selection);
    }

    /// Leave the gesture and record its single history commit.
    pub fn end_drag(&mut self) {
        if !self.is_dragging {
            return;
        }
        self.is_dragging = false;
        self.commit();
        self.notify(ChangeKind::History);
    }

    // ---- element mutations -----------------------------------------------

    /// Insert a fully-formed element and select it.
    ///
    /// The caller supplies the id and z-index; the engine does not assign
    /// them.
    pub fn add_element(&mut self, element: Element, backside: bool) {
        self.commit();
        let id = element.id;
        self.side_mut(backside).push(element);
        self.selected_element_id = Some(id);
        self.notify(ChangeKind::Elements);
    }

    /// Apply a partial update to an element. Unknown ids are a no-op.
    pub fn update_element(&mut self, id: ElementId, update: ElementUpdate, backside: bool) {
        if !self.side(backside).iter().any(|e| e.id == id) {
            return;
        }
        self.commit();
        if let Some(element) = self.side_mut(backside).iter_mut().find(|e| e.id == id) {
            update.apply_to(element);
        }
        self.notify(ChangeKind::Elements);
    }

    /// Live position write during a drag. No history commit; locked
    /// elements are skipped.
    pub fn update_element_position(&mut self, id: ElementId, position: Position, backside: bool) {
        if let Some(element) = self
            .side_mut(backside)
            .iter_mut()
            .find(|e| e.id == id && !e.is_locked)
        {
            element.position = position;
            self.notify(ChangeKind::Elements);
        }
    }

    /// Apply a batch of live position writes in one state update.
    ///
    /// Selection is preserved; no history commit. Locked elements and
    /// unknown ids are skipped.
    pub fn update_multiple_element_positions(
        &mut self,
        updates: &[PositionUpdate],
        backside: bool,
    ) {
        let list = self.side_mut(backside);
        for update in updates {
            if let Some(element) = list
                .iter_mut()
                .find(|e| e.id == update.id && !e.is_locked)
            {
                element.position = update.position;
            }
        }
        self.notify(ChangeKind::Elements);
    }

    /// Live size write during a resize. No history commit; locked elements
    /// are skipped.
    pub fn update_element_dimensions(
        &mut self,
        id: ElementId,
        width: f64,
        height: f64,
        backside: bool,
    ) {
        if let Some(element) = self
            .side_mut(backside)
            .iter_mut()
            .find(|e| e.id == id && !e.is_locked)
        {
            element.set_size(width, height);
            self.notify(ChangeKind::Elements);
        }
    }

    /// Remove an element. Template-locked elements and unknown ids are a
    /// no-op. Clears the selection if it pointed at the element.
    pub fn delete_element(&mut self, id: ElementId, backside: bool) {
        let Some(element) = self.side(backside).iter().find(|e| e.id == id) else {
            return;
        };
        if element.is_template_locked {
            debug!("refusing to delete template-locked element {}", id);
            return;
        }
        self.commit();
        self.side_mut(backside).retain(|e| e.id != id);
        if self.selected_element_id == Some(id) {
            self.selected_element_id = None;
        }
        self.notify(ChangeKind::Elements);
    }

    /// Clone an element with a new id, a small positive offset, and the
    /// topmost z-index. The duplicate becomes selected.
    pub fn duplicate_element(&mut self, id: ElementId, backside: bool) -> Option<ElementId> {
        let (mut copy, top_z) = {
            let list = self.side(backside);
            let source = list.iter().find(|e| e.id == id)?;
            let top_z = list.iter().map(|e| e.z_index).max().unwrap_or(0);
            (source.clone(), top_z)
        };
        self.commit();
        copy.id = generate_id();
        copy.position = copy.position + Vec2::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        copy.z_index = top_z + 1;
        let new_id = copy.id;
        self.side_mut(backside).push(copy);
        self.selected_element_id = Some(new_id);
        self.notify(ChangeKind::Elements);
        Some(new_id)
    }

    /// Swap the element's z-index with its next-higher neighbor. No-op at
    /// the top.
    pub fn move_element_forward(&mut self, id: ElementId, backside: bool) {
        self.reorder_element(id, backside, true);
    }

    /// Swap the element's z-index with its next-lower neighbor. No-op at
    /// the bottom.
    pub fn move_element_backward(&mut self, id: ElementId, backside: bool) {
        self.reorder_element(id, backside, false);
    }

    fn reorder_element(&mut self, id: ElementId, backside: bool, forward: bool) {
        // The neighbor is defined by sorted z-index, not array adjacency.
        let (neighbor_id, neighbor_z, own_z) = {
            let list = self.side(backside);
            let Some(own_z) = list.iter().find(|e| e.id == id).map(|e| e.z_index) else {
                return;
            };
            let neighbor = if forward {
                list.iter()
                    .filter(|e| e.z_index > own_z)
                    .min_by_key(|e| e.z_index)
            } else {
                list.iter()
                    .filter(|e| e.z_index < own_z)
                    .max_by_key(|e| e.z_index)
            };
            match neighbor {
                Some(n) => (n.id, n.z_index, own_z),
                None => return,
            }
        };
        self.commit();
        let list = self.side_mut(backside);
        for element in list.iter_mut() {
            if element.id == id {
                element.z_index = neighbor_z;
            } else if element.id == neighbor_id {
                element.z_index = own_z;
            }
        }
        // Keep array order consistent with paint order.
        list.sort_by_key(|e| e.z_index);
        self.notify(ChangeKind::Elements);
    }

    // ---- canvas mutations ------------------------------------------------

    /// Set the canvas background color.
    pub fn set_canvas_background(&mut self, color: impl Into<String>) {
        self.commit();
        self.canvas_background = color.into();
        self.notify(ChangeKind::Canvas);
    }

    /// Set the canvas dimensions.
    pub fn set_canvas_size(&mut self, size: CanvasSize) {
        self.commit();
        self.canvas_size = size;
        self.notify(ChangeKind::Canvas);
    }

    // ---- history ---------------------------------------------------------

    /// Restore the previous history state. No-op at the lower bound.
    pub fn undo(&mut self) {
        let live = self.snapshot();
        if let Some(state) = self.history.undo(&live) {
            self.restore(state);
            self.notify(ChangeKind::History);
        }
    }

    /// Restore the next history state. No-op at the tail.
    pub fn redo(&mut self) {
        if let Some(state) = self.history.redo() {
            self.restore(state);
            self.notify(ChangeKind::History);
        }
    }

    // ---- persistence -----------------------------------------------------

    /// Merge the working state into the design metadata and persist it.
    ///
    /// Creates the design on first save, updates it afterwards. On success
    /// the returned canonical design is adopted verbatim; on failure the
    /// in-memory state is left unchanged and `error` is set.
    pub async fn save_design(&mut self) -> Option<Design> {
        self.is_loading = true;
        self.error = None;
        self.notify(ChangeKind::Persistence);

        let store = Arc::clone(&self.store);
        let merged = self.merged_design();
        let result = match merged.id.clone() {
            Some(id) => match store.update_design(&id, DesignPatch::from_design(&merged)).await {
                Ok(Some(saved)) => Ok(saved),
                Ok(None) => Err(StoreError::NotFound(id)),
                Err(e) => Err(e),
            },
            None => store.create_design(merged).await,
        };

        self.is_loading = false;
        match result {
            Ok(saved) => {
                self.design = Some(saved.clone());
                self.notify(ChangeKind::Persistence);
                Some(saved)
            }
            Err(e) => {
                warn!("failed to save design: {}", e);
                self.error = Some(e.to_string());
                self.notify(ChangeKind::Persistence);
                None
            }
        }
    }

    /// Fetch a design from the store and open it. Returns whether the
    /// design was loaded.
    pub async fn open_design(&mut self, id: &str) -> bool {
        self.is_loading = true;
        self.error = None;
        self.notify(ChangeKind::Persistence);

        let store = Arc::clone(&self.store);
        let result = store.get_design(id).await;

        self.is_loading = false;
        match result {
            Ok(Some(design)) => {
                self.load_design(design);
                true
            }
            Ok(None) => {
                self.error = Some(format!("Design not found: {}", id));
                self.notify(ChangeKind::Persistence);
                false
            }
            Err(e) => {
                warn!("failed to open design {}: {}", id, e);
                self.error = Some(e.to_string());
                self.notify(ChangeKind::Persistence);
                false
            }
        }
    }

    // ---- internals -------------------------------------------------------

    fn side_mut(&mut self, backside: bool) -> &mut Vec<Element> {
        if backside {
            &mut self.backside_elements
        } else {
            &mut self.elements
        }
    }

    fn snapshot(&self) -> HistoryState {
        HistoryState {
            elements: self.elements.clone(),
            backside_elements: self.backside_elements.clone(),
            canvas_size: self.canvas_size,
            canvas_background: self.canvas_background.clone(),
        }
    }

    fn live_matches(&self, state: &HistoryState) -> bool {
        state.elements == self.elements
            && state.backside_elements == self.backside_elements
            && state.canvas_size == self.canvas_size
            && state.canvas_background == self.canvas_background
    }

    fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    fn restore(&mut self, state: HistoryState) {
        self.elements = state.elements;
        self.backside_elements = state.backside_elements;
        self.canvas_size = state.canvas_size;
        self.canvas_background = state.canvas_background;
        // Drop the selection if its element no longer exists on either side.
        if let Some(selected) = self.selected_element_id {
            let exists = self
                .elements
                .iter()
                .chain(self.backside_elements.iter())
                .any(|e| e.id == selected);
            if !exists {
                self.selected_element_id = None;
            }
        }
    }

    fn merged_design(&self) -> Design {
        let mut design = self.design.clone().unwrap_or_else(Design::untitled);
        design.elements = self.elements.clone();
        design.backside_elements = self.backside_elements.clone();
        design.canvas_size = self.canvas_size;
        design.canvas_background = self.canvas_background.clone();
        design
    }

    fn notify(&mut self, kind: ChangeKind) {
        self.revision += 1;
        if let Some(callback) = self.on_change.as_mut() {
            callback(kind);
        }
    }
}
