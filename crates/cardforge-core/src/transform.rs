//! Group move and resize math for multi-element gestures.
//!
//! A gesture captures baseline geometry at its start and derives every
//! intermediate update from that baseline, never from the previous frame,
//! so pointer sampling rate cannot introduce drift or compounding rounding
//! error.

use crate::element::{Element, ElementId, Position};
use kurbo::Vec2;

/// Minimum element size on either axis after a group resize.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// A pending position write for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    pub id: ElementId,
    pub position: Position,
}

/// A pending size write for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeUpdate {
    pub id: ElementId,
    pub width: f64,
    pub height: f64,
}

/// Baseline for moving a set of selected elements together.
///
/// The anchor is the element under the pointer; every other member follows
/// the anchor's net delta.
#[derive(Debug, Clone)]
pub struct GroupMoveState {
    anchor_start: Position,
    start_positions: Vec<(ElementId, Position)>,
}

impl GroupMoveState {
    /// Capture start positions for the selection at gesture start.
    ///
    /// Returns `None` if the anchor is not in `elements`. Selected ids with
    /// no matching element are skipped.
    pub fn begin(anchor_id: ElementId, selected: &[ElementId], elements: &[Element]) -> Option<Self> {
        let anchor_start = elements.iter().find(|e| e.id == anchor_id)?.position;
        let start_positions = selected
            .iter()
            .filter_map(|id| {
                elements
                    .iter()
                    .find(|e| e.id == *id)
                    .map(|e| (e.id, e.position))
            })
            .collect();
        Some(Self {
            anchor_start,
            start_positions,
        })
    }

    /// Net drag delta for the anchor's current position.
    pub fn delta(&self, anchor_current: Position) -> Vec2 {
        anchor_current - self.anchor_start
    }

    /// Positions for every selection member, shifted by the anchor's net
    /// delta. Computed from start positions, not accumulated per frame.
    pub fn position_updates(&self, anchor_current: Position) -> Vec<PositionUpdate> {
        let delta = self.delta(anchor_current);
        self.start_positions
            .iter()
            .map(|&(id, start)| PositionUpdate {
                id,
                position: start + delta,
            })
            .collect()
    }
}

/// Baseline for resizing a set of selected elements together.
///
/// The scale is derived from the anchor's start dimensions and applied to
/// each member's own start size.
#[derive(Debug, Clone)]
pub struct GroupResizeState {
    anchor_start_width: f64,
    anchor_start_height: f64,
    start_sizes: Vec<(ElementId, f64, f64)>,
}

impl GroupResizeState {
    /// Capture start sizes for the selection at gesture start.
    pub fn begin(anchor_id: ElementId, selected: &[ElementId], elements: &[Element]) -> Option<Self> {
        let anchor = elements.iter().find(|e| e.id == anchor_id)?;
        let (anchor_start_width, anchor_start_height) = anchor.size();
        let start_sizes = selected
            .iter()
            .filter_map(|id| {
                elements.iter().find(|e| e.id == *id).map(|e| {
                    let (w, h) = e.size();
                    (e.id, w, h)
                })
            })
            .collect();
        Some(Self {
            anchor_start_width: anchor_start_width.max(1.0),
            anchor_start_height: anchor_start_height.max(1.0),
            start_sizes,
        })
    }

    /// Sizes for every selection member given the anchor's net resize delta.
    ///
    /// Each axis scales independently and floors at [`MIN_ELEMENT_SIZE`].
    pub fn size_updates(&self, dx: f64, dy: f64) -> Vec<SizeUpdate> {
        let scale_x = (self.anchor_start_width + dx) / self.anchor_start_width;
        let scale_y = (self.anchor_start_height + dy) / self.anchor_start_height;
        self.start_sizes
            .iter()
            .map(|&(id, w, h)| SizeUpdate {
                id,
                width: (w * scale_x).max(MIN_ELEMENT_SIZE),
                height: (h * scale_y).max(MIN_ELEMENT_SIZE),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeData, ShapeType};
    use kurbo::Point;

    fn shape_at(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::shape(Point::new(x, y), ShapeData::new(ShapeType::Rectangle, w, h))
    }

    #[test]
    fn test_group_move_same_vector_for_all() {
        let elements = vec![
            shape_at(0.0, 0.0, 40.0, 40.0),
            shape_at(100.0, 50.0, 40.0, 40.0),
            shape_at(200.0, 200.0, 40.0, 40.0),
        ];
        let ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        let state = GroupMoveState::begin(ids[0], &ids, &elements).unwrap();

        // Many intermediate moves; only the net anchor position matters.
        for step in 1..=7 {
            let _ = state.position_updates(Point::new(step as f64, step as f64));
        }
        let updates = state.position_updates(Point::new(10.0, -5.0));
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].position, Point::new(10.0, -5.0));
        assert_eq!(updates[1].position, Point::new(110.0, 45.0));
        assert_eq!(updates[2].position, Point::new(210.0, 195.0));
    }

    #[test]
    fn test_group_move_unknown_anchor() {
        let elements = vec![shape_at(0.0, 0.0, 40.0, 40.0)];
        let ids = vec![elements[0].id];
        assert!(GroupMoveState::begin(crate::element::generate_id(), &ids, &elements).is_none());
    }

    #[test]
    fn test_group_resize_scales_from_start_sizes() {
        let elements = vec![
            shape_at(0.0, 0.0, 100.0, 50.0),
            shape_at(0.0, 0.0, 60.0, 80.0),
        ];
        let ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        let state = GroupResizeState::begin(ids[0], &ids, &elements).unwrap();

        // Anchor grows by (+100, +50): scale 2.0 on both axes.
        let updates = state.size_updates(100.0, 50.0);
        assert_eq!(updates[0].width, 200.0);
        assert_eq!(updates[0].height, 100.0);
        assert_eq!(updates[1].width, 120.0);
        assert_eq!(updates[1].height, 160.0);
    }

    #[test]
    fn test_group_resize_clamps_small_members() {
        let elements = vec![
            shape_at(0.0, 0.0, 100.0, 100.0),
            shape_at(0.0, 0.0, 30.0, 200.0),
        ];
        let ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        let state = GroupResizeState::begin(ids[0], &ids, &elements).unwrap();

        // Anchor shrinks to half: 30 * 0.5 = 15 floors at 20, per axis.
        let updates = state.size_updates(-50.0, -50.0);
        assert_eq!(updates[1].width, MIN_ELEMENT_SIZE);
        assert_eq!(updates[1].height, 100.0);
        // The anchor itself scales normally.
        assert_eq!(updates[0].width, 50.0);
        assert_eq!(updates[0].height, 50.0);
    }

    #[test]
    fn test_group_resize_independent_axes() {
        let elements = vec![shape_at(0.0, 0.0, 100.0, 50.0)];
        let ids = vec![elements[0].id];
        let state = GroupResizeState::begin(ids[0], &ids, &elements).unwrap();

        let updates = state.size_updates(100.0, 0.0);
        assert_eq!(updates[0].width, 200.0);
        assert_eq!(updates[0].height, 50.0);
    }
}
