//! Arbor UI: a retained view tree with a measure → layout → draw protocol.
//!
//! Views are shared through [`ViewHandle`](view::ViewHandle)s. A group owns
//! one handle per child; application code may keep further handles to the
//! views it wants to update later. A view is dropped when its last handle is.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use arbor_ui::prelude::*;
//!
//! let mut ui = UiScene::new();
//!
//! let mut root = ViewGroup::new()
//!     .with_params(LayoutParams::new(Dimension::FillParent, Dimension::Px(500.0)))?;
//! let label = typed_handle(Label::new("Hello\nworld").multiline(true));
//! root.add_child_with_params(
//!     label.clone().into_view(),
//!     LayoutParams::new(Dimension::FillParent, Dimension::WrapContent),
//! )?;
//! let root = view_handle(root);
//!
//! // Each frame:
//! let draw_list = ui.frame(&root, Vec2::new(800.0, 600.0));
//!
//! // Between frames:
//! label.borrow_mut().set_text("Goodbye");
//! ```
//!
//! # Custom views
//!
//! Implement [`View`](view::View) with a [`ViewBase`](view::ViewBase) field and an
//! `on_measure` that resolves the content size against the incoming specs.
//! Custom containers implement [`GroupLayout`](view_group::GroupLayout) and
//! plug into [`ViewGroup`](view_group::ViewGroup).

pub mod config;
pub mod error;
pub mod layout_params;
pub mod linear_layout;
pub mod measure;
pub mod painter;
pub mod scene;
pub mod view;
pub mod view_group;
pub mod widgets;

#[cfg(test)]
mod testing;

/// Everything needed to build a tree, in one import.
pub mod prelude {
    pub use crate::config::UiConfig;
    pub use crate::error::ViewError;
    pub use crate::layout_params::{
        Dimension, Edges, LayoutParams, LinearLayoutParams, MarginLayoutParams, ParamsKind,
    };
    pub use crate::linear_layout::{Linear, LinearLayout, Orientation};
    pub use crate::measure::{MeasureMode, MeasureSpec};
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::view::{
        typed_handle, view_handle, IntoViewHandle, LayoutCtx, LayoutState, View, ViewBase, ViewHandle,
        Visibility,
    };
    pub use crate::view_group::{FrameLayout, GroupLayout, ViewGroup};
    pub use crate::widgets::Label;

    pub use arbor_engine::coords::{Rect, Vec2};
    pub use arbor_engine::handle::{Handle, Release, WeakHandle};
    pub use arbor_engine::paint::Color;
    pub use arbor_engine::scene::{DrawCmd, DrawList};
}
