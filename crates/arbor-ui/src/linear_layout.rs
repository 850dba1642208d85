use arbor_engine::coords::{Rect, Vec2};

use crate::layout_params::{Dimension, Edges, LayoutParams, LinearLayoutParams, ParamsKind};
use crate::measure::MeasureSpec;
use crate::view::{LayoutCtx, View, ViewHandle};
use crate::view_group::{GroupLayout, ViewGroup};

// ── Orientation ───────────────────────────────────────────────────────────

/// Primary axis of a [`LinearLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Children placed left to right (default).
    #[default]
    Horizontal,
    /// Children placed top to bottom.
    Vertical,
}

impl Orientation {
    #[inline]
    fn main(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    #[inline]
    fn cross(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// Build a `Vec2` from main/cross components.
    #[inline]
    fn compose(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(main, cross),
            Self::Vertical => Vec2::new(cross, main),
        }
    }

    /// (main, cross) dimensions of `params`.
    fn dims(self, params: &LayoutParams) -> (Dimension, Dimension) {
        match self {
            Self::Horizontal => (params.width(), params.height()),
            Self::Vertical => (params.height(), params.width()),
        }
    }

    /// (leading, total) margin on the main axis.
    fn main_margins(self, m: Edges) -> (f32, f32) {
        match self {
            Self::Horizontal => (m.left, m.h()),
            Self::Vertical => (m.top, m.v()),
        }
    }

    /// (leading, total) margin on the cross axis.
    fn cross_margins(self, m: Edges) -> (f32, f32) {
        match self {
            Self::Horizontal => (m.top, m.v()),
            Self::Vertical => (m.left, m.h()),
        }
    }

    /// Forward (main, cross) specs to a child as (width, height).
    fn measure(self, child: &mut dyn View, main: MeasureSpec, cross: MeasureSpec, ctx: &LayoutCtx<'_>) -> Vec2 {
        match self {
            Self::Horizontal => child.measure(main, cross, ctx),
            Self::Vertical => child.measure(cross, main, ctx),
        }
    }
}

// ── Linear ────────────────────────────────────────────────────────────────

/// Layout policy that places children one after another along an axis.
///
/// With a bounded main axis, measuring runs these rounds over the children:
///
/// 1. every child that is neither `MatchParent` nor `FillParent` on the main
///    axis is measured against the space still unused;
/// 2. `FillParent` children, in list order, take all of the space left;
/// 3. `MatchParent` children split what is left after that in proportion to
///    their weight and are measured at `Exactly` their share;
/// 4. when the cross axis is not fixed, `MatchParent`-cross children are
///    measured again at `AtMost` the tallest sibling.
///
/// An unconstrained main axis measures every child at its content size in
/// round 1. Under a cross spec that is not `Exactly`, `MatchParent`-cross
/// children are first measured at their content extent; round 4 caps the
/// stretch at the cross bound.
///
/// Round 4 is not repeated, even if a child changes its main size in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear {
    orientation: Orientation,
    spacing: f32,
}

impl Linear {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation, spacing: 0.0 }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Cross spec handed to a child before the stretch round.
    fn cross_child_spec(&self, cross: MeasureSpec, params: &LayoutParams) -> MeasureSpec {
        let (_, cross_dim) = self.orientation.dims(params);
        if cross_dim == Dimension::MatchParent && !cross.is_exact() {
            return MeasureSpec::Unspecified;
        }
        cross.loosen().shrink(self.orientation.cross_margins(params.margins()).1)
    }
}

/// Horizontal or vertical box with weighted `MatchParent` children.
///
/// # Example
/// ```rust,ignore
/// let mut row = LinearLayout::horizontal();
/// row.add_child_with_params(a, LayoutParams::linear(Dimension::MatchParent, Dimension::WrapContent, 1.0))?;
/// row.add_child_with_params(b, LayoutParams::linear(Dimension::MatchParent, Dimension::WrapContent, 2.0))?;
/// ```
pub type LinearLayout = ViewGroup<Linear>;

impl ViewGroup<Linear> {
    pub fn horizontal() -> Self {
        Self::with_layout(Linear::new(Orientation::Horizontal))
    }

    pub fn vertical() -> Self {
        Self::with_layout(Linear::new(Orientation::Vertical))
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.layout_policy().orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.layout_policy_mut().orientation = orientation;
    }

    /// Gap inserted between consecutive visible children.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.layout_policy_mut().spacing = spacing.max(0.0);
    }
}

impl GroupLayout for Linear {
    fn name(&self) -> &'static str {
        "LinearLayout"
    }

    fn generate_default_layout_params(&self) -> LayoutParams {
        LinearLayoutParams::new(Dimension::WrapContent, Dimension::WrapContent).into()
    }

    fn accept_child_layout_params(&self, params: &LayoutParams) -> bool {
        params.kind() == ParamsKind::Linear
    }

    fn measure_children(
        &mut self,
        children: &[ViewHandle],
        width: MeasureSpec,
        height: MeasureSpec,
        ctx: &LayoutCtx<'_>,
    ) -> Vec2 {
        let o = self.orientation;
        let (main, cross) = match o {
            Orientation::Horizontal => (width, height),
            Orientation::Vertical => (height, width),
        };
        let visible: Vec<&ViewHandle> = children.iter().filter(|c| !c.borrow().base().is_gone()).collect();
        let gaps = self.spacing * visible.len().saturating_sub(1) as f32;
        let bounded = main.bound().is_some();

        // Round 1: everything that neither fills nor takes a weighted share.
        let mut used = gaps;
        let mut filling: Vec<&ViewHandle> = Vec::new();
        let mut weighted: Vec<(&ViewHandle, f32)> = Vec::new();
        for &child in &visible {
            let mut view = child.borrow_mut();
            let params = view.base().layout_params();
            let (main_dim, _) = o.dims(&params);
            let (_, main_margin) = o.main_margins(params.margins());

            match main_dim {
                Dimension::FillParent if bounded => {
                    filling.push(child);
                    continue;
                }
                Dimension::MatchParent if bounded => {
                    weighted.push((child, params.weight().unwrap_or(1.0)));
                    used += main_margin;
                    continue;
                }
                _ => {}
            }

            let remaining = main.bound().map(|b| (b - used).max(0.0));
            let main_spec = match remaining {
                Some(r) => MeasureSpec::AtMost(r).shrink(main_margin),
                None => MeasureSpec::Unspecified,
            };
            let size = o.measure(&mut *view, main_spec, self.cross_child_spec(cross, &params), ctx);
            used += o.main(size) + main_margin;
        }

        // Round 2: fill children consume the rest, first come first served.
        for child in filling {
            let mut view = child.borrow_mut();
            let params = view.base().layout_params();
            let (_, main_margin) = o.main_margins(params.margins());
            let remaining = main.bound().map_or(0.0, |b| (b - used).max(0.0));
            let main_spec = MeasureSpec::AtMost(remaining).shrink(main_margin);
            let size = o.measure(&mut *view, main_spec, self.cross_child_spec(cross, &params), ctx);
            used += o.main(size) + main_margin;
        }

        // Round 3: weighted split of whatever is left over.
        if !weighted.is_empty() {
            let available = main.bound().map_or(0.0, |b| (b - used).max(0.0));
            let total_weight: f32 = weighted.iter().map(|(_, w)| w).sum();
            let count = weighted.len() as f32;
            log::trace!("LinearLayout splitting {available} across {} weighted children", weighted.len());

            for (child, weight) in weighted {
                let share = if total_weight > 0.0 { available / total_weight * weight } else { available / count };
                let mut view = child.borrow_mut();
                let params = view.base().layout_params();
                let size = o.measure(
                    &mut *view,
                    MeasureSpec::Exactly(share),
                    self.cross_child_spec(cross, &params),
                    ctx,
                );
                used += o.main(size);
            }
        }

        let tallest = visible
            .iter()
            .map(|c| {
                let view = c.borrow();
                o.cross(view.measured_size()) + o.cross_margins(view.base().layout_params().margins()).1
            })
            .fold(0.0f32, f32::max);
        let max_cross = cross.bound().map_or(tallest, |b| tallest.min(b));

        // Round 4: MatchParent-cross children take the tallest sibling's extent.
        if !cross.is_exact() {
            for child in &visible {
                let mut view = child.borrow_mut();
                let params = view.base().layout_params();
                let (_, cross_dim) = o.dims(&params);
                let (_, cross_margin) = o.cross_margins(params.margins());
                let measured = view.measured_size();
                if cross_dim != Dimension::MatchParent || o.cross(measured) + cross_margin == max_cross {
                    continue;
                }
                let main_spec = MeasureSpec::Exactly(o.main(measured));
                let cross_spec = MeasureSpec::AtMost((max_cross - cross_margin).max(0.0));
                let before = o.main(measured);
                let size = o.measure(&mut *view, main_spec, cross_spec, ctx);
                used += o.main(size) - before;
            }
        }

        o.compose(used, max_cross)
    }

    fn layout_children(&mut self, children: &[ViewHandle], content: Rect, ctx: &LayoutCtx<'_>) {
        let o = self.orientation;
        let mut cursor = o.main(content.origin);
        let cross_origin = o.cross(content.origin);

        for child in children {
            let mut view = child.borrow_mut();
            if view.base().is_gone() {
                continue;
            }
            let margins = view.base().layout_params().margins();
            let (main_lead, main_total) = o.main_margins(margins);
            let (cross_lead, _) = o.cross_margins(margins);
            let size = view.measured_size();

            let origin = o.compose(cursor + main_lead, cross_origin + cross_lead);
            view.layout(Rect::from_origin_size(origin, size), ctx);
            cursor += o.main(size) + main_total + self.spacing;
        }
    }
}
