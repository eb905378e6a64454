//! Text element data.

use serde::{Deserialize, Serialize};

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
}

/// Font style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Data for a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Font family name (CSS).
    pub font_family: String,
    /// Text color (CSS color string).
    pub color: String,
    /// Font style.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Horizontal alignment within the box.
    #[serde(default)]
    pub text_align: TextAlign,
    /// Layout box width. Zero means "size to content".
    #[serde(default)]
    pub width: f64,
    /// Layout box height. Zero means "size to content".
    #[serde(default)]
    pub height: f64,
}

impl TextData {
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;
    /// Smallest usable font size.
    pub const MIN_FONT_SIZE: f64 = 8.0;
    /// Largest usable font size.
    pub const MAX_FONT_SIZE: f64 = 72.0;

    /// Create text data with default styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::default(),
            font_family: "Inter".to_string(),
            color: "#000000".to_string(),
            font_style: FontStyle::default(),
            text_align: TextAlign::default(),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Set the font size, clamped to the usable range (builder style).
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size.clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        self
    }

    /// Set the font weight (builder style).
    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set the text color (builder style).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set an explicit layout box (builder style).
    pub fn with_box(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Layout box size, falling back to the content estimate when no
    /// explicit box has been set.
    pub fn box_size(&self) -> (f64, f64) {
        let width = if self.width > 0.0 {
            self.width
        } else {
            self.estimated_width()
        };
        let height = if self.height > 0.0 {
            self.height
        } else {
            self.estimated_height()
        };
        (width, height)
    }

    /// Approximate width from the widest line's character count.
    ///
    /// A rough estimate; actual width depends on the font.
    pub fn estimated_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        // Average character width as a fraction of the font size,
        // empirically determined per weight.
        let char_width_factor = match self.font_weight {
            FontWeight::Light => 0.50,
            FontWeight::Normal => 0.52,
            FontWeight::Medium => 0.55,
            FontWeight::Bold => 0.58,
        };

        max_line_len as f64 * self.font_size * char_width_factor
    }

    /// Approximate height from the line count.
    pub fn estimated_height(&self) -> f64 {
        let line_count = self.content.lines().count().max(1);
        let line_count = if self.content.ends_with('\n') {
            line_count + 1
        } else {
            line_count
        };
        // Line height is typically 1.2x the font size.
        line_count as f64 * self.font_size * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let text = TextData::new("Hello");
        assert_eq!(text.content, "Hello");
        assert!((text.font_size - TextData::DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
        assert_eq!(text.font_weight, FontWeight::Normal);
        assert_eq!(text.text_align, TextAlign::Left);
    }

    #[test]
    fn test_font_size_clamped() {
        let small = TextData::new("x").with_font_size(2.0);
        assert!((small.font_size - TextData::MIN_FONT_SIZE).abs() < f64::EPSILON);
        let big = TextData::new("x").with_font_size(500.0);
        assert!((big.font_size - TextData::MAX_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_uses_widest_line() {
        let one = TextData::new("abc");
        let two = TextData::new("abc\nabcdef");
        assert!(two.estimated_width() > one.estimated_width());
        assert!(two.estimated_height() > one.estimated_height());
    }

    #[test]
    fn test_explicit_box_wins() {
        let text = TextData::new("Hello world").with_box(120.0, 40.0);
        assert_eq!(text.box_size(), (120.0, 40.0));
    }

    #[test]
    fn test_bolder_is_wider() {
        let normal = TextData::new("sample");
        let bold = TextData::new("sample").with_font_weight(FontWeight::Bold);
        assert!(bold.estimated_width() > normal.estimated_width());
    }
}
