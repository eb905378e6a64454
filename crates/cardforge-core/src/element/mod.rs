//! Element definitions for the card canvas.

mod image;
mod shape;
mod text;

pub use image::{ImageData, ImageLayout, ObjectFit};
pub use shape::{ShapeData, ShapeType};
pub use text::{FontStyle, FontWeight, TextAlign, TextData};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Position of an element on the canvas (origin top-left).
pub type Position = Point;

/// Distance threshold under which two positions are considered the same.
pub const POSITION_MERGE_THRESHOLD: f64 = 5.0;

/// Generate a fresh element id, unique within a session.
pub fn generate_id() -> ElementId {
    Uuid::new_v4()
}

/// True if both axis deltas between `a` and `b` are within `threshold`.
pub fn is_same_position(a: Position, b: Position, threshold: f64) -> bool {
    (a.x - b.x).abs() <= threshold && (a.y - b.y).abs() <= threshold
}

/// [`is_same_position`] with the default snap/merge threshold.
pub fn is_near_position(a: Position, b: Position) -> bool {
    is_same_position(a, b, POSITION_MERGE_THRESHOLD)
}

/// Type-specific payload of an element.
///
/// Serializes as `{"type": "text", "data": {...}}` to match the persisted
/// document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ElementKind {
    Text(TextData),
    Image(ImageData),
    Shape(ShapeData),
}

/// One placed object (text, image, or shape) on a canvas side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier, immutable after creation.
    pub id: ElementId,
    /// Top-left corner position on the canvas.
    pub position: Position,
    /// Paint and selection order. Not required to be contiguous.
    pub z_index: i32,
    /// Blocks drag, resize, and text editing when set.
    #[serde(default)]
    pub is_locked: bool,
    /// Render-only flag. A hidden element can still be selected.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// Marks non-deletable template-origin content.
    #[serde(default)]
    pub is_template_locked: bool,
    /// Type-specific data.
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn default_visible() -> bool {
    true
}

impl Element {
    /// Create a text element at the given position.
    pub fn text(position: Position, data: TextData) -> Self {
        Self::new(position, ElementKind::Text(data))
    }

    /// Create an image element at the given position.
    pub fn image(position: Position, data: ImageData) -> Self {
        Self::new(position, ElementKind::Image(data))
    }

    /// Create a shape element at the given position.
    pub fn shape(position: Position, data: ShapeData) -> Self {
        Self::new(position, ElementKind::Shape(data))
    }

    fn new(position: Position, kind: ElementKind) -> Self {
        Self {
            id: generate_id(),
            position,
            z_index: 0,
            is_locked: false,
            is_visible: true,
            is_template_locked: false,
            kind,
        }
    }

    /// Set the z-index (builder style).
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Mark as template-locked (builder style).
    pub fn template_locked(mut self) -> Self {
        self.is_template_locked = true;
        self
    }

    /// Display size `(width, height)` of the element.
    ///
    /// Circles report their width on both axes. Text falls back to the
    /// character-count estimate when no explicit box has been set.
    pub fn size(&self) -> (f64, f64) {
        match &self.kind {
            ElementKind::Text(t) => t.box_size(),
            ElementKind::Image(i) => (i.width, i.height),
            ElementKind::Shape(s) => s.size(),
        }
    }

    /// Write a new display size into the element's data.
    pub fn set_size(&mut self, width: f64, height: f64) {
        match &mut self.kind {
            ElementKind::Text(t) => {
                t.width = width;
                t.height = height;
            }
            ElementKind::Image(i) => {
                i.width = width;
                i.height = height;
            }
            ElementKind::Shape(s) => {
                s.width = width;
                s.height = height;
            }
        }
    }

    /// Approximate bounding box in canvas coordinates.
    ///
    /// Image and shape bounds are exact; text bounds are an estimate unless
    /// an explicit box has been set. Not pixel-accurate against a real text
    /// layout engine.
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    /// Check if a point (in canvas coordinates) falls inside the element.
    pub fn contains(&self, point: Position) -> bool {
        self.bounds().contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_position_threshold() {
        let a = Point::new(10.0, 10.0);
        assert!(is_same_position(a, Point::new(14.0, 7.0), 5.0));
        assert!(!is_same_position(a, Point::new(16.0, 10.0), 5.0));
        // Both axes must be within the threshold.
        assert!(!is_same_position(a, Point::new(10.0, 20.0), 5.0));
        assert!(is_near_position(a, Point::new(12.0, 12.0)));
    }

    #[test]
    fn test_shape_bounds() {
        let elem = Element::shape(
            Point::new(10.0, 20.0),
            ShapeData::new(ShapeType::Rectangle, 100.0, 50.0),
        );
        let bounds = elem.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
        assert!(elem.contains(Point::new(50.0, 40.0)));
        assert!(!elem.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_circle_size_equal_axes() {
        let mut elem = Element::shape(Point::ZERO, ShapeData::new(ShapeType::Circle, 80.0, 30.0));
        assert_eq!(elem.size(), (80.0, 80.0));
        elem.set_size(60.0, 45.0);
        assert_eq!(elem.size(), (60.0, 60.0));
    }

    #[test]
    fn test_element_kind_serde_tag() {
        let elem = Element::text(Point::new(5.0, 5.0), TextData::new("Name"));
        let json = serde_json::to_value(&elem).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["data"]["content"], "Name");
        assert_eq!(json["isVisible"], true);

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, elem);
    }
}
