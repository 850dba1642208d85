use crate::layout_params::{Edges, ParamsKind};

/// Configuration error raised at a tree-mutation call.
///
/// Measure, layout and draw never fail; anything that could make geometry
/// undefined is rejected here, before the view joins the tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("{group} does not accept {kind:?} layout params")]
    UnsupportedLayoutParams { group: &'static str, kind: ParamsKind },

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f32),

    #[error("pixel dimension must be finite and non-negative, got {0}")]
    InvalidDimension(f32),

    #[error("margins must be finite and non-negative, got {0:?}")]
    InvalidMargins(Edges),

    #[error("layout weight must be finite and non-negative, got {0}")]
    InvalidWeight(f32),

    #[error("view handle is null")]
    NullHandle,

    #[error("view is already attached to a parent")]
    AlreadyAttached,

    #[error("a view cannot be added to itself or to one of its descendants")]
    Cycle,

    #[error("view is not a child of this group")]
    NotAChild,

    #[error("child index {index} is out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("layout params of an attached view are set through its parent")]
    ParamsOwnedByParent,
}
