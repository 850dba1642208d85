//! Recorded draw stream.
//!
//! The view tree never talks to a graphics API. `draw` passes append
//! [`DrawCmd`]s to a [`DrawList`], which a host backend replays in order.
//! Emission order is paint order (back to front).

mod cmd;
mod list;

pub use cmd::{DrawCmd, TextCmd};
pub use list::{DrawItem, DrawList};
