use serde::{Deserialize, Serialize};

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 400;
pub const STROKE_WIDTH: u32 = 2;
pub const STROKE_COLOR: &str = "#000000";
pub const FILL_COLOR: &str = "rgba(255, 255, 255, 0)";
pub const BACKGROUND_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    Freedraw,
}

impl DrawingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawingMode::Freedraw => "freedraw",
        }
    }
}

/// Freehand doodle surface shown next to a generated sketch.
///
/// Strokes live only in the browser; nothing is sent back or exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingSurface {
    pub key: String,
    pub width: u32,
    pub height: u32,
    pub stroke_width: u32,
    pub stroke_color: String,
    pub fill_color: String,
    pub background_color: String,
    pub drawing_mode: DrawingMode,
    pub display_toolbar: bool,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self {
            key: "canvas".to_string(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            stroke_width: STROKE_WIDTH,
            stroke_color: STROKE_COLOR.to_string(),
            fill_color: FILL_COLOR.to_string(),
            background_color: BACKGROUND_COLOR.to_string(),
            drawing_mode: DrawingMode::Freedraw,
            display_toolbar: true,
        }
    }
}
