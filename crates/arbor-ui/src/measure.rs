use crate::layout_params::Dimension;

/// How a parent constrains one axis of a child during measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    Exactly,
    AtMost,
    Unspecified,
}

/// One axis constraint: a [`MeasureMode`] together with its size.
///
/// Sizes are logical pixels and never negative; constructors clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    /// The view must be exactly this size.
    Exactly(f32),
    /// The view may be any size up to this one.
    AtMost(f32),
    /// No constraint; the view reports its content size.
    Unspecified,
}

#[inline]
fn clamp_size(size: f32) -> f32 {
    if size.is_finite() { size.max(0.0) } else { 0.0 }
}

impl MeasureSpec {
    /// Build from a mode/size pair. `size` is ignored for `Unspecified`.
    pub fn new(mode: MeasureMode, size: f32) -> Self {
        match mode {
            MeasureMode::Exactly => Self::Exactly(clamp_size(size)),
            MeasureMode::AtMost => Self::AtMost(clamp_size(size)),
            MeasureMode::Unspecified => Self::Unspecified,
        }
    }

    #[inline]
    pub fn mode(self) -> MeasureMode {
        match self {
            Self::Exactly(_) => MeasureMode::Exactly,
            Self::AtMost(_) => MeasureMode::AtMost,
            Self::Unspecified => MeasureMode::Unspecified,
        }
    }

    /// The size carried by the spec; zero for `Unspecified`.
    #[inline]
    pub fn size(self) -> f32 {
        self.bound().unwrap_or(0.0)
    }

    /// Upper bound on the axis, if there is one.
    #[inline]
    pub fn bound(self) -> Option<f32> {
        match self {
            Self::Exactly(s) | Self::AtMost(s) => Some(s),
            Self::Unspecified => None,
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exactly(_))
    }

    /// Subtract `amount` (padding, margins) from the size, clamping at zero.
    #[must_use]
    pub fn shrink(self, amount: f32) -> Self {
        match self {
            Self::Exactly(s) => Self::Exactly(clamp_size(s - amount)),
            Self::AtMost(s) => Self::AtMost(clamp_size(s - amount)),
            Self::Unspecified => Self::Unspecified,
        }
    }

    /// `Exactly(s)` becomes `AtMost(s)`; the other modes are unchanged.
    ///
    /// Parents hand children the space they *may* use; each child then
    /// tightens it again according to its own [`Dimension`].
    #[must_use]
    pub fn loosen(self) -> Self {
        match self {
            Self::Exactly(s) => Self::AtMost(s),
            other => other,
        }
    }

    /// Tighten an incoming spec with a view's own sizing policy on that axis.
    ///
    /// | dimension                  | Exactly(s)  | AtMost(s)   | Unspecified |
    /// |----------------------------|-------------|-------------|-------------|
    /// | `Px(n)`                    | Exactly(n)  | Exactly(n)  | Exactly(n)  |
    /// | `WrapContent`              | AtMost(s)   | AtMost(s)   | Unspecified |
    /// | `MatchParent`/`FillParent` | Exactly(s)  | Exactly(s)  | Unspecified |
    #[must_use]
    pub fn refine(self, dim: Dimension) -> Self {
        match (dim, self) {
            (Dimension::Px(n), _) => Self::Exactly(clamp_size(n)),
            (Dimension::WrapContent, spec) => spec.loosen(),
            (Dimension::MatchParent | Dimension::FillParent, Self::AtMost(s)) => Self::Exactly(s),
            (Dimension::MatchParent | Dimension::FillParent, spec) => spec,
        }
    }

    /// Final size for content of natural size `content` under this spec.
    #[inline]
    pub fn resolve(self, content: f32) -> f32 {
        let content = clamp_size(content);
        match self {
            Self::Exactly(s) => s,
            Self::AtMost(s) => content.min(s),
            Self::Unspecified => content,
        }
    }
}
