//! # Point-Light Motion
//!
//! **Point-Light Motion** synthesises point-light biological motion: the handful of dots on
//! the head, shoulders, elbows, wrists, pelvis, hips, knees and ankles of a figure whose
//! movement alone reads as walking, running, jumping, waving and so on.
//!
//! ## Introduction
//!
//! The pipeline has three stages, one per crate of the workspace:
//! - `point_light_core` holds the [`Skeleton`], immutable [`Pose`] values, the analytic
//!   two-bone IK solver used for elbows and knees, and the stateless motion primitives
//!   ([`Oscillator`], [`GaitPhase`], [`JumpArc`], [`RigidRotation`], [`Ease`]).
//! - `point_light_actions` binds those primitives to the figure for each action of a closed
//!   catalog, scaled by semantic subject tags (sex, weight, emotion). The result is a
//!   [`PoseFunction`], a pure function of time.
//! - This crate samples pose functions into [`MotionClip`]s or endless [`PoseStream`]s and
//!   exports clips for renderers as [`ClipExport`]s in RON or MessagePack.
//!
//! Skeletons, action requests and clip settings can all be described in RON. A skeleton
//! description (`*.skn.ron`) lists joints with their parent and rest offset:
//! ```ron
//! (
//!     joints: [
//!         (id: "pelvis", parent: None, offset_x: 0.0, offset_y: 0.98, offset_z: 0.0),
//!         (id: "hip_L", parent: Some("pelvis"), offset_x: 0.1, offset_y: -0.05),
//!         // ...
//!     ],
//! )
//! ```
//! An action request names the action and the subject:
//! ```ron
//! (action: "walking", tags: (weight: Some(Heavy), emotion: Some(Sad)))
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use point_light_motion::prelude::*;
//!
//! let skeleton = Arc::new(Skeleton::point_light_figure());
//! let request = ActionRequest::from_ron_str(r#"(action: "jumping-up")"#).unwrap();
//! let jump = request.build(&ActionComposer::default(), skeleton).unwrap();
//!
//! let clip = generate(&jump, 30., 2., false).unwrap();
//! assert_eq!(clip.len(), 60);
//!
//! let export = clip.to_export();
//! let bytes = export.to_msgpack().unwrap();
//! assert_eq!(ClipExport::from_msgpack(&bytes).unwrap(), export);
//! ```
//!
//! Everything is synchronous and free of shared mutable state: pose functions, profiles and
//! skeletons are `Send + Sync` and may be sampled from any number of threads at once.

pub mod clip;
pub mod errors;
pub mod export;
pub mod sequencer;
pub mod stream;


#[cfg(doc)]
use prelude::*;

pub mod prelude {
    pub use super::clip::{Frame, MotionClip};
    pub use super::errors::ExportError;
    pub use super::export::ClipExport;
    pub use super::sequencer::{ClipSettings, FrameSequencer, generate, iterate};
    pub use super::stream::PoseStream;
    pub use point_light_actions::prelude::*;
}
