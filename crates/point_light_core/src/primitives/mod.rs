//! Stateless time functions that action channels are built from.
//!
//! Every primitive is a small `Copy` value sampled by time alone; composing them is plain
//! arithmetic on the sampled values.

mod ease;
mod gait;
mod jump;
mod oscillator;
mod rotation;

pub use ease::*;
pub use gait::*;
pub use jump::*;
pub use oscillator::*;
pub use rotation::*;

/// Primitives that evaluate to a single scalar at time `t`.
pub trait SampleAt {
    fn sample_at(&self, time: f64) -> f64;
}
