use arbor_engine::coords::{Rect, Vec2};
use arbor_engine::scene::DrawList;
use arbor_engine::text::{FontLoadError, FontSystem};

use crate::config::UiConfig;
use crate::measure::MeasureSpec;
use crate::painter::Painter;
use crate::view::{invalidate_tree, LayoutCtx, ViewHandle};

/// Per-frame driver for a view tree.
///
/// Owns the shared resources measure, layout and draw need (fonts, config)
/// and the `DrawList` each [`frame`](Self::frame) records into. The tree
/// itself stays with the caller, who mutates it between frames.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new();
/// ui.load_font("sans", include_bytes!("Inter.ttf"))?;
///
/// let root = view_handle(LinearLayout::vertical().with_params(params)?);
/// // Each frame:
/// let draw_list = ui.frame(&root, viewport);
/// backend.replay(draw_list);
/// ```
pub struct UiScene {
    /// Public so a host backend can rasterize glyphs from the same fonts the
    /// layout measured with.
    pub font_system: FontSystem,
    /// Commands recorded by the most recent [`frame`](Self::frame).
    pub draw_list: DrawList,
    config: UiConfig,
    fonts_changed: bool,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            font_system: FontSystem::with_fallback(config.fallback_metrics),
            draw_list: DrawList::new(),
            config,
            fonts_changed: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Register a font under `name`. Trees measured before this call are
    /// re-measured on the next frame.
    pub fn load_font(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<(), FontLoadError> {
        let name = name.into();
        self.font_system.load_font(name.as_str(), bytes)?;
        log::debug!("loaded font `{name}` ({} bytes)", bytes.len());
        self.fonts_changed = true;
        Ok(())
    }

    /// Measure `root` at exactly `viewport`, then lay it out at the origin.
    ///
    /// Returns the root's measured size, which may be smaller than the
    /// viewport when the root has fixed-pixel params.
    pub fn layout(&mut self, root: &ViewHandle, viewport: Vec2) -> Vec2 {
        let Some(cell) = root.get() else {
            log::warn!("layout called with a null root");
            return Vec2::zero();
        };
        if std::mem::take(&mut self.fonts_changed) {
            invalidate_tree(root);
        }

        let ctx = LayoutCtx::new(&self.font_system, &self.config);
        let mut view = cell.borrow_mut();
        let size = view.measure(MeasureSpec::Exactly(viewport.x), MeasureSpec::Exactly(viewport.y), &ctx);
        view.layout(Rect::from_origin_size(Vec2::zero(), size), &ctx);
        log::trace!("frame layout {}x{} in viewport {}x{}", size.x, size.y, viewport.x, viewport.y);
        size
    }

    /// Run measure, layout and draw on `root`, in that order.
    ///
    /// The returned `&mut DrawList` is owned by the scene and valid until the
    /// next call.
    #[must_use]
    pub fn frame(&mut self, root: &ViewHandle, viewport: Vec2) -> &mut DrawList {
        self.draw_list.clear();
        self.layout(root, viewport);
        if let Some(cell) = root.get() {
            let mut painter = Painter::new(&mut self.draw_list, &self.config);
            cell.borrow().draw(&mut painter);
        }
        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::layout_params::{Dimension, LayoutParams};
    use crate::linear_layout::LinearLayout;
    use crate::view::{typed_handle, view_handle, IntoViewHandle, LayoutState, View, Visibility};
    use crate::view_group::ViewGroup;
    use crate::widgets::Label;
    use arbor_engine::handle::Handle;
    use arbor_engine::paint::Color;
    use arbor_engine::scene::DrawCmd;

    fn column_of(texts: &[&str]) -> anyhow::Result<(LinearLayout, Vec<Handle<RefCell<Label>>>)> {
        let params = LayoutParams::new(Dimension::FillParent, Dimension::FillParent);
        let mut column = LinearLayout::vertical().with_params(params)?;
        let mut labels = Vec::new();
        for text in texts {
            let label = typed_handle(Label::new(*text));
            column.add_child(label.clone().into_view())?;
            labels.push(label);
        }
        Ok((column, labels))
    }

    #[test]
    fn null_root_yields_empty_frame() {
        let mut ui = UiScene::new();
        assert!(ui.frame(&ViewHandle::null(), Vec2::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn root_params_shape_the_viewport() {
        let mut ui = UiScene::new();
        let label = typed_handle(Label::new("hi"));
        label
            .borrow_mut()
            .base_mut()
            .set_layout_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(40.0)))
            .unwrap();
        let root = label.clone().into_view();

        let size = ui.layout(&root, Vec2::new(320.0, 240.0));
        assert_eq!(size, Vec2::new(320.0, 40.0));
        assert_eq!(label.borrow().bounds(), Rect::new(0.0, 0.0, 320.0, 40.0));
    }

    #[test]
    fn background_is_drawn_before_content() {
        let mut ui = UiScene::new();
        let label = Label::new("x");
        let root = view_handle(label);
        root.borrow_mut().base_mut().set_background(Some(Color::WHITE));

        let list = ui.frame(&root, Vec2::new(50.0, 50.0));
        assert_eq!(list.len(), 2);
        assert!(matches!(list.items()[0].cmd, DrawCmd::FillRect { color, .. } if color == Color::WHITE));
        assert!(matches!(list.items()[1].cmd, DrawCmd::Text(_)));
    }

    #[test]
    fn font_load_failure_is_reported() {
        let mut ui = UiScene::new();
        assert!(ui.load_font("broken", b"not a font").is_err());
        assert!(matches!(ui.load_font("", b""), Err(FontLoadError::EmptyName)));
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_draws_in_tree_order() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let (mut column, _labels) = column_of(&["top", "bottom"])?;
        column.base_mut().set_background(Some(Color::from_hex(0x202020ff)));
        let root = view_handle(column);
        let line = ui.font_system.line_height("sans", 16.0);

        let list = ui.frame(&root, Vec2::new(200.0, 100.0));
        assert_eq!(list.len(), 3);
        assert!(matches!(&list.items()[0].cmd, DrawCmd::FillRect { rect, .. } if *rect == Rect::new(0.0, 0.0, 200.0, 100.0)));

        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts[0].text, "top");
        assert_eq!(texts[1].text, "bottom");
        assert_eq!(texts[0].origin, Vec2::zero());
        assert_eq!(texts[1].origin.y, line);
        Ok(())
    }

    #[test]
    fn invisible_children_keep_their_slot() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let (column, labels) = column_of(&["a", "b", "c"])?;
        labels[1].borrow_mut().base_mut().set_visibility(Visibility::Invisible);
        let root = view_handle(column);

        let line = ui.font_system.line_height("sans", 16.0);
        let list = ui.frame(&root, Vec2::new(200.0, 200.0));
        let origins: Vec<f32> = list.texts().map(|t| t.origin.y).collect();
        assert_eq!(origins, vec![0.0, 2.0 * line]);
        Ok(())
    }

    #[test]
    fn gone_children_give_up_their_slot() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let (column, labels) = column_of(&["a", "b", "c"])?;
        let root = view_handle(column);
        let line = ui.font_system.line_height("sans", 16.0);

        let _ = ui.frame(&root, Vec2::new(200.0, 200.0));
        labels[1].borrow_mut().base_mut().set_visibility(Visibility::Gone);

        let list = ui.frame(&root, Vec2::new(200.0, 200.0));
        let origins: Vec<f32> = list.texts().map(|t| t.origin.y).collect();
        assert_eq!(origins, vec![0.0, line]);
        Ok(())
    }

    #[test]
    fn clipping_group_scopes_child_commands() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let mut group = ViewGroup::new().with_params(LayoutParams::new(Dimension::Px(40.0), Dimension::Px(20.0)))?;
        group.set_clip_children(true);
        group.add_child(view_handle(Label::new("much too long for the box")))?;
        let root = view_handle(group);

        let list = ui.frame(&root, Vec2::new(400.0, 400.0));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(0.0, 0.0, 40.0, 20.0)));
        Ok(())
    }

    #[test]
    fn resized_viewport_relayouts_fill_root() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let (column, labels) = column_of(&["x"])?;
        let root = view_handle(column);

        assert_eq!(ui.layout(&root, Vec2::new(300.0, 200.0)), Vec2::new(300.0, 200.0));
        assert_eq!(ui.layout(&root, Vec2::new(120.0, 80.0)), Vec2::new(120.0, 80.0));
        assert_eq!(root.borrow().bounds(), Rect::new(0.0, 0.0, 120.0, 80.0));
        assert_eq!(labels[0].borrow().base().state(), LayoutState::LaidOut);
        Ok(())
    }

    #[test]
    fn fill_root_row_keeps_fixed_child_inside_viewport() -> anyhow::Result<()> {
        let mut ui = UiScene::new();
        let mut row = LinearLayout::horizontal().with_params(LayoutParams::new(Dimension::FillParent, Dimension::FillParent))?;
        let fill = typed_handle(Label::new("grow"));
        let fixed = typed_handle(Label::new("ok"));
        row.add_child_with_params(fill.clone().into_view(), LayoutParams::linear(Dimension::FillParent, Dimension::WrapContent, 1.0))?;
        row.add_child_with_params(fixed.clone().into_view(), LayoutParams::linear(Dimension::Px(100.0), Dimension::WrapContent, 1.0))?;
        let root = view_handle(row);

        let list = ui.frame(&root, Vec2::new(300.0, 50.0));
        let origins: Vec<f32> = list.texts().map(|t| t.origin.x).collect();
        assert_eq!(origins, vec![0.0, 200.0]);
        assert_eq!(fill.borrow().bounds().width(), 200.0);
        assert!(fixed.borrow().bounds().right() <= 300.0);
        Ok(())
    }
}
