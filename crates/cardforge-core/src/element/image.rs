//! Image element data.

use serde::{Deserialize, Serialize};

/// Frame the image is masked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    Square,
    Circle,
    #[default]
    Rectangle,
}

/// How the image fills its frame (CSS object-fit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    Fill,
    Contain,
    #[default]
    Cover,
    None,
    ScaleDown,
}

/// Data for an image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Image source (URL or object URL).
    pub src: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Frame mask applied to the image.
    #[serde(default)]
    pub layout: ImageLayout,
    /// Fixed aspect ratio (width / height), if the frame enforces one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    /// How the image fills the frame.
    #[serde(default)]
    pub object_fit: ObjectFit,
    /// Focal point within the frame (CSS object-position).
    #[serde(default = "default_object_position")]
    pub object_position: String,
}

fn default_object_position() -> String {
    "center".to_string()
}

impl ImageData {
    /// Create image data with default framing.
    pub fn new(src: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            src: src.into(),
            alt: String::new(),
            width,
            height,
            layout: ImageLayout::default(),
            aspect_ratio: None,
            object_fit: ObjectFit::default(),
            object_position: default_object_position(),
        }
    }

    /// Set the frame mask (builder style).
    pub fn with_layout(mut self, layout: ImageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Fix the aspect ratio (builder style).
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Set the alt text (builder style).
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }
}
