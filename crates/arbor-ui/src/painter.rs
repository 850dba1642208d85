use arbor_engine::coords::{Rect, Vec2};
use arbor_engine::paint::Color;
use arbor_engine::scene::{DrawList, TextCmd};

use crate::config::UiConfig;

/// Stateful drawing facade handed to [`View::on_draw`](crate::view::View::on_draw).
///
/// Holds a current font, font size and fill colour, like a classic 2D
/// context; each primitive records a command into the frame's `DrawList`
/// using that state.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    config: &'a UiConfig,
    font: String,
    font_size: f32,
    fill: Color,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, config: &'a UiConfig) -> Self {
        Self {
            draw_list,
            config,
            font: config.default_font.clone(),
            font_size: config.font_size(),
            fill: config.text_color,
        }
    }

    /// Defaults for views that leave font, size or colour unset.
    #[inline]
    pub fn config(&self) -> &'a UiConfig {
        self.config
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn set_font(&mut self, name: &str) {
        if self.font != name {
            self.font.clear();
            self.font.push_str(name);
        }
    }

    #[inline]
    pub fn font(&self) -> &str {
        &self.font
    }

    #[inline]
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    #[inline]
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    #[inline]
    pub fn fill_color(&self) -> Color {
        self.fill
    }

    // ── primitives ────────────────────────────────────────────────────────

    /// Solid rectangle in the current fill colour. Transparent fills are skipped.
    pub fn fill_rect(&mut self, rect: Rect) {
        if !self.fill.is_transparent() && !rect.is_empty() {
            self.draw_list.push_fill_rect(rect, self.fill);
        }
    }

    /// Text at `origin` (top-left of the first line) in the current font,
    /// size and fill colour.
    pub fn draw_text(&mut self, text: &str, origin: Vec2, max_width: Option<f32>) {
        self.draw_list.push_text(TextCmd {
            text: text.to_owned(),
            font: self.font.clone(),
            size: self.font_size,
            color: self.fill,
            origin,
            max_width,
        });
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }
}
