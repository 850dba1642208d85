use std::cell::RefCell;
use std::rc::Rc;

use arbor_engine::coords::{Rect, Vec2};
use arbor_engine::handle::Handle;
use arbor_engine::paint::Color;
use arbor_engine::text::FontSystem;

use crate::config::UiConfig;
use crate::error::ViewError;
use crate::layout_params::{Edges, LayoutParams};
use crate::measure::MeasureSpec;
use crate::painter::Painter;

// ── handles ───────────────────────────────────────────────────────────────

/// Shared, type-erased owner of a view. Groups hold their children as these.
pub type ViewHandle = Handle<RefCell<dyn View>>;

/// Move `view` to the heap and return the first handle to it.
pub fn view_handle<V: View>(view: V) -> ViewHandle {
    let rc: Rc<RefCell<dyn View>> = Rc::new(RefCell::new(view));
    Handle::from_rc(rc)
}

/// Typed handle, for callers that keep talking to a concrete view after
/// adding it to a group (e.g. to change a label's text).
pub fn typed_handle<V: View>(view: V) -> Handle<RefCell<V>> {
    Handle::new(RefCell::new(view))
}

/// Erase a typed view handle. The result shares the original count.
pub trait IntoViewHandle {
    fn into_view(self) -> ViewHandle;
}

impl<V: View> IntoViewHandle for Handle<RefCell<V>> {
    fn into_view(self) -> ViewHandle {
        self.map_rc(|rc| rc as Rc<RefCell<dyn View>>)
    }
}

/// Mark every node under `root` for re-measure.
///
/// Needed after something all views read changes at once, such as the font
/// registry.
pub fn invalidate_tree(root: &ViewHandle) {
    let Some(cell) = root.get() else { return };
    let mut view = cell.borrow_mut();
    view.invalidate();
    for child in view.children() {
        invalidate_tree(child);
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Shared resources lent to measure and layout.
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    pub config: &'a UiConfig,
}

impl<'a> LayoutCtx<'a> {
    pub fn new(fonts: &'a FontSystem, config: &'a UiConfig) -> Self {
        Self { fonts, config }
    }
}

// ── view state ───────────────────────────────────────────────────────────

/// Where a view is in the per-frame pipeline.
///
/// Drawing repeats every frame from `LaidOut`; invalidation drops back to
/// `Unmeasured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutState {
    #[default]
    Unmeasured,
    Measured,
    LaidOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes up space but is not drawn.
    Invisible,
    /// Takes no space and is not drawn.
    Gone,
}

/// State every view carries: params, cached measure and layout results.
#[derive(Debug)]
pub struct ViewBase {
    params: Handle<LayoutParams>,
    measured: Vec2,
    bounds: Rect,
    last_specs: Option<(MeasureSpec, MeasureSpec)>,
    dirty: bool,
    state: LayoutState,
    padding: Edges,
    background: Option<Color>,
    visibility: Visibility,
    attached: bool,
}

impl ViewBase {
    pub fn new() -> Self {
        Self {
            params: Handle::null(),
            measured: Vec2::zero(),
            bounds: Rect::default(),
            last_specs: None,
            dirty: true,
            state: LayoutState::Unmeasured,
            padding: Edges::default(),
            background: None,
            visibility: Visibility::Visible,
            attached: false,
        }
    }

    // ── layout params ─────────────────────────────────────────────────────

    /// The view's params, or content-sized defaults when none are set yet.
    #[inline]
    pub fn layout_params(&self) -> LayoutParams {
        self.params.get().copied().unwrap_or_default()
    }

    #[inline]
    pub fn layout_params_handle(&self) -> &Handle<LayoutParams> {
        &self.params
    }

    #[inline]
    pub fn has_layout_params(&self) -> bool {
        !self.params.is_null()
    }

    /// Set params on a detached view (typically a root).
    ///
    /// Attached views change params through their group, which re-checks the kind.
    pub fn set_layout_params(&mut self, params: LayoutParams) -> Result<(), ViewError> {
        self.share_layout_params(&Handle::new(params))
    }

    /// Like [`set_layout_params`](Self::set_layout_params) but shares an existing params object.
    pub fn share_layout_params(&mut self, params: &Handle<LayoutParams>) -> Result<(), ViewError> {
        if self.attached {
            return Err(ViewError::ParamsOwnedByParent);
        }
        params.get().ok_or(ViewError::NullHandle)?.validate()?;
        self.adopt_layout_params(params);
        Ok(())
    }

    pub(crate) fn adopt_layout_params(&mut self, params: &Handle<LayoutParams>) {
        self.params.assign(params);
        self.invalidate();
    }

    // ── cached results ────────────────────────────────────────────────────

    #[inline]
    pub fn measured_size(&self) -> Vec2 {
        self.measured
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop cached sizes; the next measure recomputes this view.
    pub fn invalidate(&mut self) {
        self.dirty = true;
        self.state = LayoutState::Unmeasured;
    }

    fn finish_measure(&mut self, size: Vec2, width: MeasureSpec, height: MeasureSpec) {
        self.measured = size;
        self.last_specs = Some((width, height));
        self.dirty = false;
        self.state = LayoutState::Measured;
    }

    fn finish_layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.state = LayoutState::LaidOut;
    }

    fn cache_hit(&self, width: MeasureSpec, height: MeasureSpec) -> bool {
        self.state != LayoutState::Unmeasured && self.last_specs == Some((width, height))
    }

    // ── decoration ────────────────────────────────────────────────────────

    #[inline]
    pub fn padding(&self) -> Edges {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Edges) {
        if self.padding != padding {
            self.padding = padding;
            self.invalidate();
        }
    }

    #[inline]
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_gone(&self) -> bool {
        self.visibility == Visibility::Gone
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        let resized = (self.visibility == Visibility::Gone) != (visibility == Visibility::Gone);
        self.visibility = visibility;
        if resized {
            self.invalidate();
        }
    }

    // ── tree membership ───────────────────────────────────────────────────

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new()
    }
}

// ── View trait ───────────────────────────────────────────────────────────

/// A node in the view tree.
///
/// Implementors supply [`base`](Self::base) / [`base_mut`](Self::base_mut)
/// and the `on_*` hooks. The driver methods [`measure`](Self::measure),
/// [`layout`](Self::layout) and [`draw`](Self::draw) handle caching, own-params
/// refinement and state bookkeeping, and are not meant to be overridden.
///
/// ```rust,ignore
/// struct Swatch { base: ViewBase, side: f32 }
///
/// impl View for Swatch {
///     fn base(&self) -> &ViewBase { &self.base }
///     fn base_mut(&mut self) -> &mut ViewBase { &mut self.base }
///     fn on_measure(&mut self, w: MeasureSpec, h: MeasureSpec, _: &LayoutCtx<'_>) -> Vec2 {
///         Vec2::new(w.resolve(self.side), h.resolve(self.side))
///     }
/// }
/// ```
pub trait View: 'static {
    fn base(&self) -> &ViewBase;

    fn base_mut(&mut self) -> &mut ViewBase;

    /// Compute the measured size.
    ///
    /// `width` / `height` have already been refined by this view's own
    /// params, so a leaf usually just resolves its content size against them.
    /// Must be deterministic for identical inputs.
    fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec, ctx: &LayoutCtx<'_>) -> Vec2;

    /// Position children inside `bounds`. Leaves have nothing to do.
    fn on_layout(&mut self, _bounds: Rect, _ctx: &LayoutCtx<'_>) {}

    /// Emit this view's content. Called after the background is filled.
    fn on_draw(&self, _painter: &mut Painter<'_>) {}

    /// Children in traversal (and paint) order.
    fn children(&self) -> &[ViewHandle] {
        &[]
    }

    /// Short name for logs and error messages.
    fn type_name(&self) -> &'static str {
        "View"
    }

    /// `true` if this view or anything below it was invalidated.
    fn needs_measure(&self) -> bool {
        self.base().is_dirty() || self.children().iter().any(|c| c.borrow().needs_measure())
    }

    fn invalidate(&mut self) {
        self.base_mut().invalidate();
    }

    #[inline]
    fn measured_size(&self) -> Vec2 {
        self.base().measured_size()
    }

    #[inline]
    fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    /// Measure pass entry point.
    ///
    /// Returns the cached size when nothing below this view changed and the
    /// specs equal the previous call's. Results are clamped to `>= 0`.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec, ctx: &LayoutCtx<'_>) -> Vec2 {
        if self.base().is_gone() {
            self.base_mut().finish_measure(Vec2::zero(), width, height);
            return Vec2::zero();
        }
        if self.base().cache_hit(width, height) && !self.needs_measure() {
            return self.base().measured_size();
        }

        let params = self.base().layout_params();
        let (w, h) = (width.refine(params.width()), height.refine(params.height()));
        let size = self.on_measure(w, h, ctx).non_negative();
        log::trace!("{} measured {}x{} under {:?} x {:?}", self.type_name(), size.x, size.y, w, h);

        self.base_mut().finish_measure(size, width, height);
        size
    }

    /// Layout pass entry point: assign absolute bounds, then place children.
    ///
    /// When the bounds moved to a size other than the measured one and the
    /// params are content-relative, the cached measure is stale; the view is
    /// re-measured at the new size before children are positioned.
    fn layout(&mut self, bounds: Rect, ctx: &LayoutCtx<'_>) {
        let base = self.base();
        let stale = bounds != base.bounds()
            && bounds.size != base.measured_size()
            && base.layout_params().is_content_relative()
            && !base.is_gone();
        if stale {
            log::trace!("{} re-measuring for new bounds {:?}", self.type_name(), bounds);
            self.measure(MeasureSpec::Exactly(bounds.width()), MeasureSpec::Exactly(bounds.height()), ctx);
        }

        self.base_mut().finish_layout(bounds);
        if !self.base().is_gone() {
            self.on_layout(bounds, ctx);
        }
    }

    /// Draw pass entry point: background, then [`on_draw`](Self::on_draw).
    fn draw(&self, painter: &mut Painter<'_>) {
        let base = self.base();
        if base.visibility() != Visibility::Visible {
            return;
        }
        debug_assert_eq!(base.state(), LayoutState::LaidOut, "{} drawn before layout", self.type_name());
        if let Some(bg) = base.background() {
            painter.set_fill_color(bg);
            painter.fill_rect(base.bounds());
        }
        self.on_draw(painter);
    }
}
