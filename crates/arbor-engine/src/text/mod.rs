//! Font registry and text measurement.

mod font_system;

pub use font_system::{FallbackMetrics, FontLoadError, FontSystem};
