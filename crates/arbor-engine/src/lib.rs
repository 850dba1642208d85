//! Arbor engine crate.
//!
//! Leaf crate for the pieces the view tree builds on: shared-ownership
//! handles, geometry, colours, the recorded draw stream and font metrics.
//! Windowing and GPU presentation live outside this workspace; a host
//! application replays the [`scene::DrawList`] with whatever backend it owns.

pub mod handle;
pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod text;
