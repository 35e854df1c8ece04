//! The built-in 15-point figure.
//!
//! Units are metres. `+y` points up, `+z` is the figure's facing direction and `+x` is the
//! figure's left. Left and right joints carry `_L` / `_R` suffixes so the default
//! [`SymmetryConfig`](crate::symmetry::config::SymmetryConfig) pairs them.

use super::{
    Skeleton,
    serial::{JointSerial, SkeletonDescription},
};
use bevy_math::DVec3;

pub const PELVIS_HEIGHT: f64 = 0.98;
pub const SPINE_LENGTH: f64 = 0.52;
pub const NECK_LENGTH: f64 = 0.20;
pub const SHOULDER_OFFSET: DVec3 = DVec3::new(0.19, -0.04, 0.);
pub const UPPER_ARM_LENGTH: f64 = 0.28;
pub const FOREARM_LENGTH: f64 = 0.26;
pub const HIP_OFFSET: DVec3 = DVec3::new(0.10, -0.05, 0.);
pub const THIGH_LENGTH: f64 = 0.45;
pub const SHIN_LENGTH: f64 = 0.43;

impl SkeletonDescription {
    pub fn point_light_figure() -> Self {
        let down = |len: f64| DVec3::new(0., -len, 0.);
        let mirror = |v: DVec3| DVec3::new(-v.x, v.y, v.z);

        Self {
            joints: vec![
                JointSerial::new("head", Some("neck"), DVec3::new(0., NECK_LENGTH, 0.)),
                JointSerial::new("neck", Some("pelvis"), DVec3::new(0., SPINE_LENGTH, 0.)),
                JointSerial::new("shoulder_L", Some("neck"), SHOULDER_OFFSET),
                JointSerial::new("shoulder_R", Some("neck"), mirror(SHOULDER_OFFSET)),
                JointSerial::new("elbow_L", Some("shoulder_L"), down(UPPER_ARM_LENGTH)),
                JointSerial::new("elbow_R", Some("shoulder_R"), down(UPPER_ARM_LENGTH)),
                JointSerial::new("wrist_L", Some("elbow_L"), down(FOREARM_LENGTH)),
                JointSerial::new("wrist_R", Some("elbow_R"), down(FOREARM_LENGTH)),
                JointSerial::new("hip_L", Some("pelvis"), HIP_OFFSET),
                JointSerial::new("hip_R", Some("pelvis"), mirror(HIP_OFFSET)),
                JointSerial::new("knee_L", Some("hip_L"), down(THIGH_LENGTH)),
                JointSerial::new("knee_R", Some("hip_R"), down(THIGH_LENGTH)),
                JointSerial::new("ankle_L", Some("knee_L"), down(SHIN_LENGTH)),
                JointSerial::new("ankle_R", Some("knee_R"), down(SHIN_LENGTH)),
                JointSerial::new("pelvis", None, DVec3::new(0., PELVIS_HEIGHT, 0.)),
            ],
        }
    }
}

impl Skeleton {
    /// The standard point-light walker: head, neck, shoulders, elbows, wrists, hips, knees,
    /// ankles and pelvis.
    pub fn point_light_figure() -> Self {
        // The description above is static and known to be well formed
        Self::from_description(SkeletonDescription::point_light_figure()).unwrap()
    }
}
