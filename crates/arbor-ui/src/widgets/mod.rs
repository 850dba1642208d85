//! Leaf views.

pub mod label;

pub use label::Label;
