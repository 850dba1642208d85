use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Solid axis-aligned rectangle.
    FillRect { rect: Rect, color: Color },
    Text(TextCmd),
}

/// A run of text. `origin` is the top-left of the first line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Font name as registered with [`FontSystem`](crate::text::FontSystem).
    pub font: String,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    /// Wrap width; `None` lays the text out on its explicit lines only.
    pub max_width: Option<f32>,
}
