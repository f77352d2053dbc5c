//! Runs a configured indicator set over a bar set.

pub mod precompute;

pub use precompute::{compute_warmup, precompute};
