//! Domain types for BarLens

pub mod bar;

pub use bar::{Bar, BarSet};
