use std::borrow::Cow;

use arbor_engine::coords::Vec2;
use arbor_engine::paint::Color;

use crate::error::ViewError;
use crate::measure::MeasureSpec;
use crate::painter::Painter;
use crate::view::{LayoutCtx, View, ViewBase};

/// A run of text.
///
/// Font, size and colour fall back to the [`UiConfig`](crate::config::UiConfig)
/// defaults until set. Single-line labels (the default) render line breaks as
/// spaces and never wrap; multiline labels break on `\n` and wrap to the
/// width their parent allows.
///
/// # Example
/// ```rust,ignore
/// let title = Label::new("Settings").with_font("serif").with_font_size(24.0)?;
/// ```
pub struct Label {
    base: ViewBase,
    text: String,
    font: Option<String>,
    font_size: Option<f32>,
    color: Option<Color>,
    multiline: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ViewBase::new(),
            text: text.into(),
            font: None,
            font_size: None,
            color: None,
            multiline: false,
        }
    }

    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.set_font(name);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Result<Self, ViewError> {
        self.set_font_size(size)?;
        Ok(self)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.set_multiline(multiline);
        self
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.base.invalidate();
        }
    }

    // ── font ──────────────────────────────────────────────────────────────

    /// Font name, or `None` while the configured default applies.
    #[inline]
    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    pub fn set_font(&mut self, name: impl Into<String>) {
        self.font = Some(name.into());
        self.base.invalidate();
    }

    #[inline]
    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// Errors with [`ViewError::InvalidFontSize`] unless `size` is finite and positive.
    pub fn set_font_size(&mut self, size: f32) -> Result<(), ViewError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ViewError::InvalidFontSize(size));
        }
        self.font_size = Some(size);
        self.base.invalidate();
        Ok(())
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Colour changes never affect size, so no re-measure is scheduled.
    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    #[inline]
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn set_multiline(&mut self, multiline: bool) {
        if self.multiline != multiline {
            self.multiline = multiline;
            self.base.invalidate();
        }
    }

    fn display_text(&self) -> Cow<'_, str> {
        if !self.multiline && self.text.contains('\n') {
            Cow::Owned(self.text.replace('\n', " "))
        } else {
            Cow::Borrowed(&self.text)
        }
    }
}

impl View for Label {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec, ctx: &LayoutCtx<'_>) -> Vec2 {
        let pad = self.base.padding();
        let font = self.font.as_deref().unwrap_or(&ctx.config.default_font);
        let size = self.font_size.unwrap_or(ctx.config.font_size());
        let max_width = if self.multiline { width.shrink(pad.h()).bound() } else { None };

        let content = ctx.fonts.measure_text(&self.display_text(), font, size, max_width);
        Vec2::new(width.resolve(content.x + pad.h()), height.resolve(content.y + pad.v()))
    }

    fn on_draw(&self, painter: &mut Painter<'_>) {
        let config = painter.config();
        let bounds = self.base.bounds();
        let pad = self.base.padding();

        painter.set_font(self.font.as_deref().unwrap_or(&config.default_font));
        painter.set_font_size(self.font_size.unwrap_or(config.font_size()));
        painter.set_fill_color(self.color.unwrap_or(config.text_color));

        let origin = Vec2::new(bounds.left() + pad.left, bounds.top() + pad.top);
        let max_width = self.multiline.then(|| (bounds.width() - pad.h()).max(0.0));
        painter.draw_text(&self.display_text(), origin, max_width);
    }

    fn type_name(&self) -> &'static str {
        "Label"
    }
}
