use std::cell::RefCell;

use arbor_engine::coords::{Rect, Vec2};
use arbor_engine::handle::{Handle, WeakHandle};

use crate::error::ViewError;
use crate::layout_params::{inset_rect, LayoutParams};
use crate::measure::MeasureSpec;
use crate::painter::Painter;
use crate::view::{LayoutCtx, View, ViewBase, ViewHandle};

// ── GroupLayout ───────────────────────────────────────────────────────────

/// Layout policy plugged into a [`ViewGroup`].
///
/// The group owns the children and the tree bookkeeping; the policy decides
/// which params kinds are legal and how children are sized and placed.
pub trait GroupLayout: 'static {
    /// Name used in logs and [`ViewError::UnsupportedLayoutParams`].
    fn name(&self) -> &'static str;

    /// Params given to children added without any.
    fn generate_default_layout_params(&self) -> LayoutParams;

    /// Gate checked when a child joins the group or its params change.
    fn accept_child_layout_params(&self, params: &LayoutParams) -> bool;

    /// Measure every child and return the content size (padding excluded).
    ///
    /// `width` / `height` are the group's own refined specs minus padding.
    fn measure_children(
        &mut self,
        children: &[ViewHandle],
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &LayoutCtx<'_>,
    ) -> Vec2;

    /// Lay out every child inside `content` (the group's bounds minus padding).
    fn layout_children(&mut self, children: &[ViewHandle], content: Rect, ctx: &LayoutCtx<'_>);
}

// ── FrameLayout ───────────────────────────────────────────────────────────

/// Default policy: every child is placed at the content origin (offset by
/// its margins) and the group wraps the largest child.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLayout;

impl GroupLayout for FrameLayout {
    fn name(&self) -> &'static str {
        "ViewGroup"
    }

    fn generate_default_layout_params(&self) -> LayoutParams {
        LayoutParams::default()
    }

    fn accept_child_layout_params(&self, _params: &LayoutParams) -> bool {
        true
    }

    fn measure_children(
        &mut self,
        children: &[ViewHandle],
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &LayoutCtx<'_>,
    ) -> Vec2 {
        let mut content = Vec2::zero();
        for child in children {
            let mut view = child.borrow_mut();
            if view.base().is_gone() {
                continue;
            }
            let m = view.base().layout_params().margins();
            let size = view.measure(width.loosen().shrink(m.h()), height.loosen().shrink(m.v()), ctx);
            content.x = content.x.max(size.x + m.h());
            content.y = content.y.max(size.y + m.v());
        }
        content
    }

    fn layout_children(&mut self, children: &[ViewHandle], content: Rect, ctx: &LayoutCtx<'_>) {
        for child in children {
            let mut view = child.borrow_mut();
            if view.base().is_gone() {
                continue;
            }
            let m = view.base().layout_params().margins();
            let size = view.measured_size();
            let rect = Rect::new(content.left() + m.left, content.top() + m.top, size.x, size.y);
            view.layout(rect, ctx);
        }
    }
}

// ── ViewGroup ─────────────────────────────────────────────────────────────

/// Composite view: an ordered list of owned children plus a layout policy.
///
/// Insertion order is traversal order for measure and layout and paint order
/// for draw (first child at the back).
///
/// # Example
/// ```rust,ignore
/// let mut root = ViewGroup::new();
/// root.base_mut().set_layout_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(500.0)))?;
/// root.add_child(view_handle(Label::new("hello")))?;
/// ```
pub struct ViewGroup<L: GroupLayout = FrameLayout> {
    base: ViewBase,
    children: Vec<ViewHandle>,
    focused: WeakHandle<RefCell<dyn View>>,
    clip_children: bool,
    layout: L,
}

impl ViewGroup<FrameLayout> {
    pub fn new() -> Self {
        Self::with_layout(FrameLayout)
    }
}

impl Default for ViewGroup<FrameLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: GroupLayout> ViewGroup<L> {
    pub fn with_layout(layout: L) -> Self {
        Self {
            base: ViewBase::new(),
            children: Vec::new(),
            focused: WeakHandle::new(),
            clip_children: false,
            layout,
        }
    }

    /// Builder form of [`ViewBase::set_layout_params`], for root groups.
    pub fn with_params(mut self, params: LayoutParams) -> Result<Self, ViewError> {
        self.base.set_layout_params(params)?;
        Ok(self)
    }

    #[inline]
    pub fn layout_policy(&self) -> &L {
        &self.layout
    }

    /// Mutable access to the policy. Invalidates the group.
    pub fn layout_policy_mut(&mut self) -> &mut L {
        self.base.invalidate();
        &mut self.layout
    }

    #[inline]
    pub fn generate_default_layout_params(&self) -> LayoutParams {
        self.layout.generate_default_layout_params()
    }

    #[inline]
    pub fn accept_child_layout_params(&self, params: &LayoutParams) -> bool {
        self.layout.accept_child_layout_params(params)
    }

    fn check_params(&self, params: &LayoutParams) -> Result<(), ViewError> {
        params.validate()?;
        if !self.layout.accept_child_layout_params(params) {
            log::warn!("{} rejected {:?} layout params", self.layout.name(), params.kind());
            return Err(ViewError::UnsupportedLayoutParams {
                group: self.layout.name(),
                kind: params.kind(),
            });
        }
        Ok(())
    }

    // ── adding children ───────────────────────────────────────────────────

    /// Append `child`, keeping its params if it has some, otherwise giving it
    /// the policy's defaults.
    pub fn add_child(&mut self, child: ViewHandle) -> Result<(), ViewError> {
        self.attach(self.children.len(), child, None)
    }

    /// Append `child` with explicit params.
    pub fn add_child_with_params(&mut self, child: ViewHandle, params: LayoutParams) -> Result<(), ViewError> {
        self.attach(self.children.len(), child, Some(params))
    }

    /// Insert `child` at `index` (0 = back of the paint order).
    pub fn insert_child(&mut self, index: usize, child: ViewHandle) -> Result<(), ViewError> {
        self.attach(index, child, None)
    }

    fn attach(&mut self, index: usize, child: ViewHandle, explicit: Option<LayoutParams>) -> Result<(), ViewError> {
        let len = self.children.len();
        if index > len {
            return Err(ViewError::IndexOutOfRange { index, len });
        }
        let cell = child.get().ok_or(ViewError::NullHandle)?;

        // A borrowed node in the child's subtree is this group (or one of its
        // ancestors, which are borrowed while the call runs).
        if subtree_is_borrowed(&child) {
            log::warn!("{} refused to adopt one of its ancestors", self.layout.name());
            return Err(ViewError::Cycle);
        }

        let mut view = cell.borrow_mut();
        if view.base().is_attached() {
            return Err(ViewError::AlreadyAttached);
        }

        match explicit {
            Some(params) => {
                self.check_params(&params)?;
                view.base_mut().adopt_layout_params(&Handle::new(params));
            }
            None if view.base().has_layout_params() => {
                self.check_params(&view.base().layout_params())?;
                view.base_mut().invalidate();
            }
            None => {
                let params = Handle::new(self.layout.generate_default_layout_params());
                view.base_mut().adopt_layout_params(&params);
            }
        }
        view.base_mut().set_attached(true);
        log::debug!("{} attached {} at index {index}", self.layout.name(), view.type_name());
        drop(view);

        self.children.insert(index, child);
        self.base.invalidate();
        Ok(())
    }

    /// Replace the params of an existing child.
    pub fn set_child_layout_params(&mut self, child: &ViewHandle, params: LayoutParams) -> Result<(), ViewError> {
        let index = self.index_of(child).ok_or(ViewError::NotAChild)?;
        self.check_params(&params)?;
        self.children[index].borrow_mut().base_mut().adopt_layout_params(&Handle::new(params));
        self.base.invalidate();
        Ok(())
    }

    // ── removing children ─────────────────────────────────────────────────

    /// Detach `child` and hand ownership back to the caller.
    pub fn remove_child(&mut self, child: &ViewHandle) -> Result<ViewHandle, ViewError> {
        let index = self.index_of(child).ok_or(ViewError::NotAChild)?;
        self.remove_child_at(index)
    }

    pub fn remove_child_at(&mut self, index: usize) -> Result<ViewHandle, ViewError> {
        let len = self.children.len();
        if index >= len {
            return Err(ViewError::IndexOutOfRange { index, len });
        }
        let child = self.children.remove(index);
        detach(&child);
        if self.focused.points_to(&child) {
            self.focused = WeakHandle::new();
        }
        self.base.invalidate();
        log::debug!("{} removed child at index {index}", self.layout.name());
        Ok(child)
    }

    /// Detach every child. Children with no other owner are dropped here.
    pub fn remove_all_children(&mut self) {
        for child in self.children.drain(..) {
            detach(&child);
        }
        self.focused = WeakHandle::new();
        self.base.invalidate();
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn child_at(&self, index: usize) -> Option<&ViewHandle> {
        self.children.get(index)
    }

    pub fn index_of(&self, child: &ViewHandle) -> Option<usize> {
        self.children.iter().position(|c| c == child)
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// Remember `child` as focused. Does not keep it alive.
    pub fn set_focused_child(&mut self, child: &ViewHandle) -> Result<(), ViewError> {
        if self.index_of(child).is_none() {
            return Err(ViewError::NotAChild);
        }
        self.focused = child.downgrade();
        Ok(())
    }

    pub fn focused_child(&self) -> Option<ViewHandle> {
        self.focused.upgrade()
    }

    pub fn clear_focus(&mut self) {
        self.focused = WeakHandle::new();
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Clip children to this group's bounds while drawing.
    pub fn set_clip_children(&mut self, clip: bool) {
        self.clip_children = clip;
    }
}

impl<L: GroupLayout> View for ViewGroup<L> {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec, ctx: &LayoutCtx<'_>) -> Vec2 {
        let pad = self.base.padding();
        let content = self.layout.measure_children(&self.children, width.shrink(pad.h()), height.shrink(pad.v()), ctx);
        Vec2::new(width.resolve(content.x + pad.h()), height.resolve(content.y + pad.v()))
    }

    fn on_layout(&mut self, bounds: Rect, ctx: &LayoutCtx<'_>) {
        let content = inset_rect(bounds, self.base.padding());
        self.layout.layout_children(&self.children, content, ctx);
    }

    fn on_draw(&self, painter: &mut Painter<'_>) {
        if self.clip_children {
            painter.push_clip(self.base.bounds());
        }
        for child in &self.children {
            child.borrow().draw(painter);
        }
        if self.clip_children {
            painter.pop_clip();
        }
    }

    fn children(&self) -> &[ViewHandle] {
        &self.children
    }

    fn type_name(&self) -> &'static str {
        self.layout.name()
    }
}

fn subtree_is_borrowed(node: &ViewHandle) -> bool {
    match node.try_borrow() {
        Err(_) => true,
        Ok(view) => view.children().iter().any(subtree_is_borrowed),
    }
}

fn detach(child: &ViewHandle) {
    child.borrow_mut().base_mut().set_attached(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::error::ViewError;
    use crate::layout_params::{Dimension, Edges, LinearLayoutParams};
    use crate::testing::{block, Block};
    use crate::view::{typed_handle, view_handle, IntoViewHandle, LayoutState};
    use crate::widgets::Label;
    use arbor_engine::text::FontSystem;

    fn ctx_parts() -> (FontSystem, UiConfig) {
        (FontSystem::new(), UiConfig::default())
    }

    // ── tree mutation ─────────────────────────────────────────────────────

    #[test]
    fn add_child_synthesizes_default_params() {
        let mut group = ViewGroup::new();
        let child = block(10.0, 10.0);
        group.add_child(child.clone()).unwrap();

        let view = child.borrow();
        assert!(view.base().is_attached());
        assert_eq!(view.base().layout_params(), LayoutParams::default());
        assert_eq!(group.child_count(), 1);
    }

    #[test]
    fn child_keeps_its_own_params() {
        let mut group = ViewGroup::new();
        let child = block(10.0, 10.0);
        let params = LayoutParams::new(Dimension::Px(3.0), Dimension::Px(4.0));
        child.borrow_mut().base_mut().set_layout_params(params).unwrap();
        group.add_child(child.clone()).unwrap();
        assert_eq!(child.borrow().base().layout_params(), params);
    }

    #[test]
    fn attached_child_rejects_direct_params_change() {
        let mut group = ViewGroup::new();
        let child = block(1.0, 1.0);
        group.add_child(child.clone()).unwrap();
        let err = child.borrow_mut().base_mut().set_layout_params(LayoutParams::default());
        assert_eq!(err, Err(ViewError::ParamsOwnedByParent));

        let fixed = LayoutParams::new(Dimension::Px(8.0), Dimension::Px(8.0));
        group.set_child_layout_params(&child, fixed).unwrap();
        assert_eq!(child.borrow().base().layout_params(), fixed);
    }

    #[test]
    fn child_cannot_join_two_groups() {
        let mut a = ViewGroup::new();
        let mut b = ViewGroup::new();
        let child = block(1.0, 1.0);
        a.add_child(child.clone()).unwrap();
        assert_eq!(b.add_child(child.clone()), Err(ViewError::AlreadyAttached));

        // Moving goes through remove → add.
        let moved = a.remove_child(&child).unwrap();
        b.add_child(moved).unwrap();
        assert_eq!(a.child_count(), 0);
        assert_eq!(b.index_of(&child), Some(0));
    }

    #[test]
    fn group_cannot_adopt_itself_or_an_ancestor() {
        let outer = typed_handle(ViewGroup::new());
        let inner = typed_handle(ViewGroup::new());
        let outer_view = outer.clone().into_view();
        outer.borrow_mut().add_child(inner.clone().into_view()).unwrap();

        let err = outer.borrow_mut().add_child(outer_view.clone());
        assert_eq!(err, Err(ViewError::Cycle));

        let err = inner.borrow_mut().add_child(outer_view.clone());
        assert_eq!(err, Err(ViewError::Cycle));
        assert_eq!(inner.borrow().child_count(), 0);
        assert_eq!(outer.borrow().child_count(), 1);
    }

    #[test]
    fn null_and_out_of_range_are_rejected() {
        let mut group = ViewGroup::new();
        assert_eq!(group.add_child(Handle::null()), Err(ViewError::NullHandle));
        assert_eq!(
            group.insert_child(3, block(1.0, 1.0)),
            Err(ViewError::IndexOutOfRange { index: 3, len: 0 })
        );
        assert_eq!(group.remove_child_at(0).unwrap_err(), ViewError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn insert_child_respects_order() {
        let mut group = ViewGroup::new();
        let a = block(1.0, 1.0);
        let b = block(2.0, 2.0);
        let c = block(3.0, 3.0);
        group.add_child(a.clone()).unwrap();
        group.add_child(c.clone()).unwrap();
        group.insert_child(1, b.clone()).unwrap();
        assert_eq!(group.index_of(&a), Some(0));
        assert_eq!(group.index_of(&b), Some(1));
        assert_eq!(group.index_of(&c), Some(2));
    }

    #[test]
    fn removing_last_owner_drops_child() {
        let mut group = ViewGroup::new();
        let child = block(1.0, 1.0);
        let watcher = child.downgrade();
        group.add_child(child).unwrap();
        assert!(watcher.upgrade().is_some());
        group.remove_all_children();
        assert!(watcher.upgrade().is_none());
    }

    #[test]
    fn removed_child_is_detached() {
        let mut group = ViewGroup::new();
        let child = block(1.0, 1.0);
        group.add_child(child.clone()).unwrap();
        let back = group.remove_child_at(0).unwrap();
        assert_eq!(back, child);
        assert!(!child.borrow().base().is_attached());
        assert_eq!(group.remove_child(&child).unwrap_err(), ViewError::NotAChild);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_is_non_owning_and_cleared_on_remove() {
        let mut group = ViewGroup::new();
        let child = block(1.0, 1.0);
        let stranger = block(1.0, 1.0);
        group.add_child(child.clone()).unwrap();

        assert_eq!(group.set_focused_child(&stranger), Err(ViewError::NotAChild));
        group.set_focused_child(&child).unwrap();
        assert_eq!(group.focused_child(), Some(child.clone()));
        assert_eq!(child.use_count(), 2);

        group.remove_child(&child).unwrap();
        assert!(group.focused_child().is_none());
    }

    // ── params gate ───────────────────────────────────────────────────────

    #[test]
    fn default_group_accepts_every_kind() {
        let group = ViewGroup::new();
        for params in [
            LayoutParams::default(),
            LayoutParams::with_margins(Dimension::WrapContent, Dimension::WrapContent, Edges::all(1.0)),
            LinearLayoutParams::new(Dimension::WrapContent, Dimension::WrapContent).into(),
        ] {
            assert!(group.accept_child_layout_params(&params));
        }
    }

    #[test]
    fn invalid_params_leave_children_untouched() {
        let mut group = ViewGroup::new();
        group.add_child(block(1.0, 1.0)).unwrap();
        let bad = LayoutParams::new(Dimension::Px(f32::NAN), Dimension::WrapContent);
        let child = block(2.0, 2.0);
        assert!(matches!(group.add_child_with_params(child.clone(), bad), Err(ViewError::InvalidDimension(_))));
        assert_eq!(group.child_count(), 1);
        assert!(!child.borrow().base().is_attached());
    }

    // ── measure / layout ──────────────────────────────────────────────────

    #[test]
    fn wraps_largest_child_plus_margins_and_padding() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new();
        group.base_mut().set_padding(Edges::all(5.0));
        group.add_child(block(40.0, 10.0)).unwrap();
        group
            .add_child_with_params(
                block(20.0, 30.0),
                LayoutParams::with_margins(Dimension::WrapContent, Dimension::WrapContent, Edges::all(2.0)),
            )
            .unwrap();

        let size = group.measure(MeasureSpec::AtMost(500.0), MeasureSpec::AtMost(500.0), &ctx);
        assert_eq!(size, Vec2::new(50.0, 44.0)); // max(40, 24) + 10, max(10, 34) + 10
    }

    #[test]
    fn exact_spec_and_fill_params_impose_size() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new()
            .with_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(120.0)))
            .unwrap();
        group.add_child(block(10.0, 10.0)).unwrap();
        let size = group.measure(MeasureSpec::Exactly(300.0), MeasureSpec::Exactly(400.0), &ctx);
        assert_eq!(size, Vec2::new(300.0, 120.0));
    }

    #[test]
    fn children_are_placed_at_content_origin() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new();
        group.base_mut().set_padding(Edges::symmetric(4.0, 6.0));
        let child = block(10.0, 10.0);
        group
            .add_child_with_params(
                child.clone(),
                LayoutParams::with_margins(Dimension::WrapContent, Dimension::WrapContent, Edges::all(1.0)),
            )
            .unwrap();

        let size = group.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified, &ctx);
        group.layout(Rect::from_origin_size(Vec2::new(100.0, 200.0), size), &ctx);

        assert_eq!(child.borrow().bounds(), Rect::new(107.0, 205.0, 10.0, 10.0));
        assert_eq!(child.borrow().base().state(), LayoutState::LaidOut);
    }

    #[test]
    fn invalidated_child_triggers_remeasure() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new();
        let child = typed_handle(Block::new(10.0, 10.0));
        group.add_child(child.clone().into_view()).unwrap();

        let spec = MeasureSpec::AtMost(100.0);
        assert_eq!(group.measure(spec, spec, &ctx), Vec2::new(10.0, 10.0));
        assert_eq!(group.measure(spec, spec, &ctx), Vec2::new(10.0, 10.0));
        assert_eq!(child.borrow().measure_calls(), 1);

        child.borrow_mut().set_size(30.0, 10.0);
        assert!(group.needs_measure());
        assert_eq!(group.measure(spec, spec, &ctx), Vec2::new(30.0, 10.0));
        assert_eq!(child.borrow().measure_calls(), 2);
    }

    #[test]
    fn gone_children_take_no_space() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new();
        let big = block(90.0, 90.0);
        group.add_child(block(10.0, 10.0)).unwrap();
        group.add_child(big.clone()).unwrap();
        big.borrow_mut().base_mut().set_visibility(crate::view::Visibility::Gone);

        let size = group.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified, &ctx);
        assert_eq!(size, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn negative_space_clamps_to_zero() {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);
        let mut group = ViewGroup::new();
        group.base_mut().set_padding(Edges::all(50.0));
        let child = block(10.0, 10.0);
        group
            .add_child_with_params(child.clone(), LayoutParams::new(Dimension::MatchParent, Dimension::MatchParent))
            .unwrap();
        group.measure(MeasureSpec::Exactly(40.0), MeasureSpec::Exactly(40.0), &ctx);
        assert_eq!(child.borrow().measured_size(), Vec2::zero());
    }

    // ── labels in a group ─────────────────────────────────────────────────

    #[test]
    fn fill_group_with_multiline_label() -> anyhow::Result<()> {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);

        let mut group = ViewGroup::new().with_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(500.0)))?;
        let label = typed_handle(Label::new("A\nB\nC").multiline(true));
        group.add_child_with_params(
            label.clone().into_view(),
            LayoutParams::new(Dimension::FillParent, Dimension::WrapContent),
        )?;

        let size = group.measure(MeasureSpec::Exactly(800.0), MeasureSpec::Exactly(600.0), &ctx);
        assert_eq!(size, Vec2::new(800.0, 500.0));

        let line = fonts.line_height(&config.default_font, config.font_size());
        let measured = label.borrow().measured_size();
        assert_eq!(measured.x, 800.0);
        assert_eq!(measured.y, 3.0 * line);

        group.layout(Rect::from_origin_size(Vec2::zero(), size), &ctx);
        assert_eq!(label.borrow().bounds(), Rect::new(0.0, 0.0, 800.0, 3.0 * line));
        assert_eq!(label.borrow().base().state(), LayoutState::LaidOut);
        Ok(())
    }

    #[test]
    fn label_height_is_clamped_by_exact_parent() -> anyhow::Result<()> {
        let (fonts, config) = ctx_parts();
        let ctx = LayoutCtx::new(&fonts, &config);

        let mut group = ViewGroup::new().with_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(30.0)))?;
        let label = typed_handle(Label::new("A\nB\nC\nD").multiline(true));
        group.add_child_with_params(
            label.clone().into_view(),
            LayoutParams::new(Dimension::FillParent, Dimension::WrapContent),
        )?;

        group.measure(MeasureSpec::Exactly(800.0), MeasureSpec::Exactly(600.0), &ctx);
        assert_eq!(label.borrow().measured_size().y, 30.0);
        Ok(())
    }

    // ── ownership through the tree ────────────────────────────────────────

    #[test]
    fn clearing_group_releases_unshared_children() -> anyhow::Result<()> {
        let mut group = ViewGroup::new();
        let kept = view_handle(Label::new("kept"));
        let orphan = view_handle(Label::new("orphan"));
        let orphan_watch = orphan.downgrade();

        group.add_child(kept.clone())?;
        group.add_child(orphan)?;
        assert_eq!(kept.use_count(), 2);

        group.remove_all_children();
        assert!(orphan_watch.upgrade().is_none());
        assert_eq!(kept.use_count(), 1);
        assert!(!kept.borrow().base().is_attached());
        Ok(())
    }

    #[test]
    fn shared_params_follow_assignment() -> anyhow::Result<()> {
        let params = Handle::new(LayoutParams::new(Dimension::Px(10.0), Dimension::Px(20.0)));
        let mut a = Label::new("a");
        let mut b = Label::new("b");
        a.base_mut().share_layout_params(&params)?;
        b.base_mut().share_layout_params(&params)?;
        assert_eq!(params.use_count(), 3);

        b.base_mut().set_layout_params(LayoutParams::default())?;
        assert_eq!(params.use_count(), 2);
        assert_eq!(a.base().layout_params_handle(), &params);
        Ok(())
    }
}
