//! Shape element data.

use serde::{Deserialize, Serialize};

/// Geometric shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

/// Data for a shape element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeData {
    /// Shape variant.
    pub shape_type: ShapeType,
    /// Width of the shape.
    pub width: f64,
    /// Height of the shape. Circles ignore this and use the width.
    pub height: f64,
    /// Fill color (CSS color string).
    pub background_color: String,
    /// Border width in pixels (0 = no border).
    #[serde(default)]
    pub border_width: f64,
    /// Border color (CSS color string).
    #[serde(default = "default_border_color")]
    pub border_color: String,
    /// Corner radius. Only meaningful for rectangles.
    #[serde(default)]
    pub border_radius: f64,
    /// Fill opacity, 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_border_color() -> String {
    "#000000".to_string()
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeData {
    /// Create shape data with default styling.
    pub fn new(shape_type: ShapeType, width: f64, height: f64) -> Self {
        Self {
            shape_type,
            width,
            height,
            background_color: "#cccccc".to_string(),
            border_width: 0.0,
            border_color: default_border_color(),
            border_radius: 0.0,
            opacity: 1.0,
        }
    }

    /// Set the fill color (builder style).
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the border (builder style).
    pub fn with_border(mut self, width: f64, color: impl Into<String>) -> Self {
        self.border_width = width;
        self.border_color = color.into();
        self
    }

    /// Set the corner radius (builder style).
    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = radius;
        self
    }

    /// Set the opacity, clamped to 0..=1 (builder style).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Display size. Circles are square: the width drives both axes.
    pub fn size(&self) -> (f64, f64) {
        match self.shape_type {
            ShapeType::Circle => (self.width, self.width),
            _ => (self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_square() {
        let circle = ShapeData::new(ShapeType::Circle, 50.0, 90.0);
        assert_eq!(circle.size(), (50.0, 50.0));
        let rect = ShapeData::new(ShapeType::Rectangle, 50.0, 90.0);
        assert_eq!(rect.size(), (50.0, 90.0));
    }

    #[test]
    fn test_opacity_clamped() {
        let shape = ShapeData::new(ShapeType::Triangle, 10.0, 10.0).with_opacity(1.7);
        assert!((shape.opacity - 1.0).abs() < f64::EPSILON);
        let shape = shape.with_opacity(-0.5);
        assert!(shape.opacity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_shape() {
        let shape = ShapeData::new(ShapeType::Rectangle, 40.0, 20.0)
            .with_background("#ff0000")
            .with_border(2.0, "#333333")
            .with_border_radius(4.0);
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["shapeType"], "rectangle");
        assert_eq!(json["backgroundColor"], "#ff0000");
        assert_eq!(json["borderRadius"], 4.0);
    }
}
