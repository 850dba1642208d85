use std::collections::HashMap;

use crate::coords::Vec2;
use crate::handle::{Handle, Release};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FontLoadError {
    #[error("font name must not be empty")]
    EmptyName,
    #[error("failed to parse font `{name}`: {reason}")]
    Parse { name: String, reason: String },
}

/// Metrics used for fonts that were never loaded.
///
/// Keeps layout deterministic in headless runs: every glyph advances
/// `advance × size` and every line is `line_height × size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FallbackMetrics {
    fn default() -> Self {
        Self { advance: 0.5, line_height: 1.2 }
    }
}

/// Fonts registered by name.
///
/// Views only ever hold a font *name*; the registry itself is owned by the
/// host (through `UiScene`) and lent to measure and draw passes.
pub struct FontSystem {
    fonts: HashMap<String, Handle<fontdue::Font>>,
    fallback: FallbackMetrics,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::with_fallback(FallbackMetrics::default())
    }

    pub fn with_fallback(fallback: FallbackMetrics) -> Self {
        Self { fonts: HashMap::new(), fallback }
    }

    #[inline]
    pub fn fallback(&self) -> FallbackMetrics {
        self.fallback
    }

    /// Parses a TrueType / OpenType font and registers it under `name`.
    ///
    /// Re-registering a name replaces the entry; handles previously returned
    /// by [`font`](Self::font) keep the old font alive.
    pub fn load_font(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<(), FontLoadError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FontLoadError::EmptyName);
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse { name: name.clone(), reason: e.to_string() })?;
        match replace_shared(&mut self.fonts, name.clone(), Handle::new(font)) {
            Some(Release::Destroyed) => log::debug!("replaced font `{name}`"),
            Some(Release::Alive(n)) => log::debug!("replaced font `{name}`; {n} handle(s) keep the old one alive"),
            None => log::debug!("registered font `{name}`"),
        }
        Ok(())
    }

    #[inline]
    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Shared reference to a registered font.
    pub fn font(&self, name: &str) -> Option<Handle<fontdue::Font>> {
        self.fonts.get(name).map(Handle::retain)
    }

    /// Height of one line of text at `size`.
    pub fn line_height(&self, name: &str, size: f32) -> f32 {
        self.fonts
            .get(name)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| m.new_line_size)
            .unwrap_or(size * self.fallback.line_height)
    }

    /// Bounding box of `text` laid out at `size`.
    ///
    /// `\n` always starts a new line. With `max_width`, lines also wrap at
    /// that width. Empty text still occupies one line.
    #[must_use]
    pub fn measure_text(&self, text: &str, name: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        match self.fonts.get(name) {
            Some(font) => Self::measure_with_font(font, text, size, max_width),
            None => self.measure_fallback(text, size, max_width),
        }
    }

    fn measure_with_font(font: &fontdue::Font, text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let line = font.horizontal_line_metrics(size).map_or(size * 1.2, |m| m.new_line_size);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, line);
        }

        // Pen position after each glyph rather than the bitmap's right edge,
        // so the result is a valid max_width for the same text.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w, layout.height().max(line))
    }

    fn measure_fallback(&self, text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        let advance = size * self.fallback.advance;
        let line = size * self.fallback.line_height;
        let per_line = max_width
            .filter(|w| w.is_finite() && advance > 0.0)
            .map(|w| ((w / advance).floor() as usize).max(1));

        let mut rows = 0usize;
        let mut widest = 0usize;
        for l in text.split('\n') {
            let n = l.chars().count();
            match per_line {
                Some(cap) if n > cap => {
                    rows += n.div_ceil(cap);
                    widest = widest.max(cap);
                }
                _ => {
                    rows += 1;
                    widest = widest.max(n);
                }
            }
        }
        Vec2::new(widest as f32 * advance, rows as f32 * line)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert `value` under `name`, releasing any handle it displaces.
fn replace_shared<T>(map: &mut HashMap<String, Handle<T>>, name: String, value: Handle<T>) -> Option<Release> {
    map.insert(name, value).map(Handle::release)
}
