//! Colours consumed by the draw stream.

mod color;

pub use color::Color;
