//! Skeleton model, poses, two-bone IK and motion primitives of the point-light figure.
//!
//! Everything here is an immutable value. Poses are produced as pure functions of time by
//! [`SamplePose`](sampling::SamplePose) implementations, so any number of threads may sample
//! the same skeleton or pose source at once.

pub mod errors;
pub mod id;
pub mod ik;
pub mod pose;
pub mod primitives;
pub mod sampling;
pub mod skeleton;
pub mod symmetry;

pub mod prelude {
    pub use super::errors::*;
    pub use super::id::JointId;
    pub use super::ik::*;
    pub use super::pose::Pose;
    pub use super::primitives::*;
    pub use super::sampling::*;
    pub use super::skeleton::{Joint, Skeleton, serial::*};
    pub use super::symmetry::config::{FlipNameMapper, PatternMapper, SymmetryConfig, SymmetryMode};
}
