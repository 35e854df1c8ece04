//! Action catalog and pose composition.
//!
//! An [`ActionComposer`](composer::ActionComposer) looks an action up in the closed catalog,
//! scales its motion primitives by the subject's tags and binds the result to a skeleton's
//! landmarks. The returned [`PoseFunction`](composer::PoseFunction) is a pure function of time.
//!
//! ```
//! use std::sync::Arc;
//! use point_light_actions::prelude::*;
//!
//! let skeleton = Arc::new(Skeleton::point_light_figure());
//! let tags = SubjectTags::new(None, Some(Weight::Heavy), Some(Emotion::Sad));
//! let walk = build_pose_function(skeleton, "walking", tags).unwrap();
//! let pose = walk.sample(0.5);
//! assert!(pose.is_finite());
//! ```

pub mod action;
pub mod catalog;
pub mod composer;
pub mod errors;
pub mod profile;
pub mod request;
pub mod rig;
pub mod tags;

pub mod prelude {
    pub use super::action::Action;
    pub use super::composer::{ActionComposer, PoseFunction, build_pose_function};
    pub use super::errors::ActionError;
    pub use super::profile::*;
    pub use super::request::ActionRequest;
    pub use super::rig::{FigureRig, LimbChain};
    pub use super::tags::*;
    pub use point_light_core::prelude::*;
}
