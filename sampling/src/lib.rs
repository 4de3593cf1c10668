//! Seeded randomness and the coefficient distributions consumed by the ring
//! and scheme crates. Every random coefficient in the workspace is drawn
//! through a [`source::Source`].

pub mod distributions;
pub mod source;

pub use distributions::Distribution;
pub use source::{Source, new_seed};
