//! Geometry shared by the draw stream and the view tree.
//!
//! Logical pixels, origin top-left, +X right, +Y down.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
