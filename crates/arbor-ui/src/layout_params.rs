//! Per-child sizing policy.
//!
//! Every attached view carries exactly one [`LayoutParams`]. The enum variant
//! is the params *kind*; a group declares which kinds it understands and
//! rejects the rest when the child is added, so measure and layout never
//! have to re-check.

use arbor_engine::coords::Rect;

use crate::error::ViewError;

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, margins).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }

    fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left].iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Shrink a rect by `edges`, clamping the size at zero.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

// ── Dimension ─────────────────────────────────────────────────────────────

/// Requested size on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fixed size in logical pixels.
    Px(f32),
    /// Size to fit the content.
    WrapContent,
    /// Take whatever size the parent resolves for this child. Inside a
    /// [`LinearLayout`](crate::linear_layout::LinearLayout) the primary-axis
    /// share is proportional to the child's weight.
    MatchParent,
    /// Consume all space still available in the parent.
    FillParent,
}

impl Dimension {
    /// `true` for policies whose result depends on the space the view is given.
    #[inline]
    pub fn is_content_relative(self) -> bool {
        matches!(self, Dimension::WrapContent | Dimension::FillParent)
    }
}

// ── params kinds ──────────────────────────────────────────────────────────

/// Discriminant of [`LayoutParams`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamsKind {
    Basic,
    Margin,
    Linear,
}

/// Width/height plus margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginLayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Edges,
}

impl MarginLayoutParams {
    pub fn new(width: Dimension, height: Dimension, margins: Edges) -> Self {
        Self { width, height, margins }
    }
}

/// Params understood by [`LinearLayout`](crate::linear_layout::LinearLayout).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearLayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Edges,
    /// Share of leftover primary-axis space for `MatchParent` children.
    pub weight: f32,
}

impl LinearLayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height, margins: Edges::default(), weight: 1.0 }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn margins(mut self, margins: Edges) -> Self {
        self.margins = margins;
        self
    }
}

/// Sizing policy attached to a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutParams {
    Basic { width: Dimension, height: Dimension },
    Margin(MarginLayoutParams),
    Linear(LinearLayoutParams),
}

impl LayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self::Basic { width, height }
    }

    pub fn with_margins(width: Dimension, height: Dimension, margins: Edges) -> Self {
        Self::Margin(MarginLayoutParams::new(width, height, margins))
    }

    pub fn linear(width: Dimension, height: Dimension, weight: f32) -> Self {
        Self::Linear(LinearLayoutParams::new(width, height).weight(weight))
    }

    #[inline]
    pub fn kind(&self) -> ParamsKind {
        match self {
            Self::Basic { .. } => ParamsKind::Basic,
            Self::Margin(_) => ParamsKind::Margin,
            Self::Linear(_) => ParamsKind::Linear,
        }
    }

    #[inline]
    pub fn width(&self) -> Dimension {
        match *self {
            Self::Basic { width, .. } => width,
            Self::Margin(p) => p.width,
            Self::Linear(p) => p.width,
        }
    }

    #[inline]
    pub fn height(&self) -> Dimension {
        match *self {
            Self::Basic { height, .. } => height,
            Self::Margin(p) => p.height,
            Self::Linear(p) => p.height,
        }
    }

    /// Margins, zero for kinds that have none.
    #[inline]
    pub fn margins(&self) -> Edges {
        match *self {
            Self::Basic { .. } => Edges::default(),
            Self::Margin(p) => p.margins,
            Self::Linear(p) => p.margins,
        }
    }

    /// Weight for linear params, `None` otherwise.
    #[inline]
    pub fn weight(&self) -> Option<f32> {
        match self {
            Self::Linear(p) => Some(p.weight),
            _ => None,
        }
    }

    /// `true` if either axis depends on the space the view is given.
    #[inline]
    pub fn is_content_relative(&self) -> bool {
        self.width().is_content_relative() || self.height().is_content_relative()
    }

    /// Reject values no layout pass can honour.
    pub fn validate(&self) -> Result<(), ViewError> {
        for dim in [self.width(), self.height()] {
            match dim {
                Dimension::Px(n) if !(n.is_finite() && n >= 0.0) => {
                    return Err(ViewError::InvalidDimension(n));
                }
                _ => {}
            }
        }
        if !self.margins().is_valid() {
            return Err(ViewError::InvalidMargins(self.margins()));
        }
        match self.weight() {
            Some(w) if !(w.is_finite() && w >= 0.0) => Err(ViewError::InvalidWeight(w)),
            _ => Ok(()),
        }
    }
}

impl Default for LayoutParams {
    /// Content-sized on both axes.
    fn default() -> Self {
        Self::new(Dimension::WrapContent, Dimension::WrapContent)
    }
}

impl From<MarginLayoutParams> for LayoutParams {
    fn from(p: MarginLayoutParams) -> Self {
        Self::Margin(p)
    }
}

impl From<LinearLayoutParams> for LayoutParams {
    fn from(p: LinearLayoutParams) -> Self {
        Self::Linear(p)
    }
}
