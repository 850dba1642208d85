use arbor_engine::paint::Color;
use arbor_engine::text::FallbackMetrics;

use crate::error::ViewError;

/// Defaults the view tree falls back on when a view does not say otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Font name used by labels that never called `set_font`.
    pub default_font: String,
    /// Always finite and positive; set through [`with_font_size`](Self::with_font_size).
    font_size: f32,
    pub text_color: Color,
    /// Metrics for font names that were never loaded.
    pub fallback_metrics: FallbackMetrics,
}

impl UiConfig {
    pub fn default_font(mut self, name: impl Into<String>) -> Self {
        self.default_font = name.into();
        self
    }

    /// Font size used by labels that never called `set_font_size`.
    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Errors with [`ViewError::InvalidFontSize`] unless `size` is finite and positive.
    pub fn with_font_size(mut self, size: f32) -> Result<Self, ViewError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ViewError::InvalidFontSize(size));
        }
        self.font_size = size;
        Ok(self)
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn fallback_metrics(mut self, metrics: FallbackMetrics) -> Self {
        self.fallback_metrics = metrics;
        self
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_font: "sans".to_owned(),
            font_size: 16.0,
            text_color: Color::BLACK,
            fallback_metrics: FallbackMetrics::default(),
        }
    }
}
