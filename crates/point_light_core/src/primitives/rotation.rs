use bevy_math::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use super::SampleAt;
use crate::pose::Pose;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// About `+y`: turns the figure around
    #[default]
    Vertical,
    /// About `+x`: positive angles pitch the figure forward
    Lateral,
}

impl RotationAxis {
    pub fn unit(self) -> DVec3 {
        match self {
            Self::Vertical => DVec3::Y,
            Self::Lateral => DVec3::X,
        }
    }

    pub fn rotation(self, angle: f64) -> DQuat {
        match self {
            Self::Vertical => DQuat::from_rotation_y(angle),
            Self::Lateral => DQuat::from_rotation_x(angle),
        }
    }
}

/// Rotation of the whole body at a constant angular velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RigidRotation {
    /// Radians per second
    pub angular_velocity: f64,
    pub axis: RotationAxis,
}

impl RigidRotation {
    pub const fn new(angular_velocity: f64, axis: RotationAxis) -> Self {
        Self {
            angular_velocity,
            axis,
        }
    }

    pub fn angle(&self, time: f64) -> f64 {
        self.angular_velocity * time
    }

    pub fn rotation(&self, time: f64) -> DQuat {
        self.axis.rotation(self.angle(time))
    }

    pub fn apply(&self, pose: &Pose, pivot: DVec3, time: f64) -> Pose {
        pose.rotated_about(pivot, self.rotation(time))
    }
}

impl SampleAt for RigidRotation {
    fn sample_at(&self, time: f64) -> f64 {
        self.angle(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::Skeleton;
    use std::f64::consts::PI;

    #[test]
    fn half_turn_faces_backwards() {
        let skeleton = Skeleton::point_light_figure();
        let rest = skeleton.rest_pose();
        let pelvis = rest[skeleton.id("pelvis").unwrap()];
        let turn = RigidRotation::new(PI / 2., RotationAxis::Vertical);

        let turned = turn.apply(&rest, pelvis, 2.);
        for (before, after) in rest.iter().zip(turned.iter()) {
            let expected = DVec3::new(2. * pelvis.x - before.x, before.y, 2. * pelvis.z - before.z);
            assert!(after.abs_diff_eq(expected, 1e-9));
        }
    }

    #[test]
    fn lateral_pitches_forward() {
        let pitch = RigidRotation::new(1., RotationAxis::Lateral);
        let up = pitch.rotation(0.3) * DVec3::Y;
        assert!(up.z > 0.);
        assert!((pitch.sample_at(0.3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rotation_preserves_segment_lengths() {
        let skeleton = Skeleton::point_light_figure();
        let rest = skeleton.rest_pose();
        let roll = RigidRotation::new(2.1, RotationAxis::Lateral);
        let rolled = roll.apply(&rest, DVec3::new(0., 0.5, 0.), 1.3);
        for joint in skeleton.joints() {
            if let Some(parent) = joint.parent() {
                let before = rest[joint.id()].distance(rest[parent]);
                let after = rolled[joint.id()].distance(rolled[parent]);
                assert!((before - after).abs() < 1e-12);
            }
        }
    }
}
