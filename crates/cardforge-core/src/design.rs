//! The persisted design document.

use crate::element::Element;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default card canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 400;
/// Default card canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Default canvas background color.
pub const DEFAULT_CANVAS_BACKGROUND: &str = "#ffffff";

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// A complete two-sided card design, the unit of persistence.
///
/// The engine's working state is a projection of exactly one `Design`:
/// front side = `elements`, back side = `backside_elements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    /// Store-assigned identifier. `None` until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Design title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Front-side elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Back-side elements.
    #[serde(default)]
    pub backside_elements: Vec<Element>,
    /// Canvas dimensions.
    #[serde(default)]
    pub canvas_size: CanvasSize,
    /// Canvas background color (CSS color string).
    #[serde(default = "default_background")]
    pub canvas_background: String,
    /// Store-assigned creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Store-assigned last-update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the design is shared via a public link.
    #[serde(default)]
    pub is_shared: bool,
}

fn default_background() -> String {
    DEFAULT_CANVAS_BACKGROUND.to_string()
}

impl Design {
    /// A fresh, unsaved design with default canvas properties.
    pub fn untitled() -> Self {
        Self {
            id: None,
            title: "Untitled design".to_string(),
            description: None,
            elements: Vec::new(),
            backside_elements: Vec::new(),
            canvas_size: CanvasSize::default(),
            canvas_background: default_background(),
            created_at: None,
            updated_at: None,
            is_shared: false,
        }
    }

    /// Set the title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::untitled()
    }
}
