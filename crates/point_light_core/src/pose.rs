pub use super::id::JointId;
use crate::symmetry::config::SymmetryMode;
use bevy_math::{DQuat, DVec3};
use std::ops::Index;

/// Absolute joint positions at a single instant, in the owning skeleton's canonical order.
///
/// A pose is a value: operations that move it return a new pose.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    positions: Vec<DVec3>,
    pub timestamp: f64,
}

impl Pose {
    /// `positions` must hold exactly one entry per skeleton joint, in canonical order.
    pub fn from_positions(positions: Vec<DVec3>, timestamp: f64) -> Self {
        Self {
            positions,
            timestamp,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, id: JointId) -> Option<DVec3> {
        self.positions.get(id.index()).copied()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.positions.iter().copied()
    }

    /// True when no coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite())
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            positions: self.positions.iter().map(|p| *p + offset).collect(),
            timestamp: self.timestamp,
        }
    }

    /// Rigidly rotates every joint about `pivot`.
    pub fn rotated_about(&self, pivot: DVec3, rotation: DQuat) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| pivot + rotation * (*p - pivot))
                .collect(),
            timestamp: self.timestamp,
        }
    }

    /// Reflects the pose and swaps left/right joints.
    ///
    /// `mirror_map` is the output of
    /// [`Skeleton::mirror_map`](crate::skeleton::Skeleton::mirror_map) for the owning skeleton.
    pub fn mirrored(&self, mirror_map: &[JointId], mode: SymmetryMode) -> Self {
        let mut positions = vec![DVec3::ZERO; self.positions.len()];
        for (index, position) in self.positions.iter().enumerate() {
            positions[mirror_map[index].index()] = mode.apply_position(*position);
        }
        Self {
            positions,
            timestamp: self.timestamp,
        }
    }

    /// Largest per-coordinate difference against another pose of the same skeleton
    pub fn max_abs_diff(&self, other: &Pose) -> f64 {
        self.positions
            .iter()
            .zip(&other.positions)
            .map(|(a, b)| (*a - *b).abs().max_element())
            .fold(0., f64::max)
    }

    /// Flattens the pose into `[x, y, z]` points for renderers.
    pub fn to_points(&self) -> Vec<[f64; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }
}

impl Index<JointId> for Pose {
    type Output = DVec3;

    fn index(&self, index: JointId) -> &Self::Output {
        &self.positions[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{skeleton::Skeleton, symmetry::config::SymmetryConfig};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rest_pose_mirrors_onto_itself() {
        let skeleton = Skeleton::point_light_figure();
        let map = skeleton.mirror_map(&SymmetryConfig::default()).unwrap();
        let config = SymmetryConfig::default();
        let rest = skeleton.rest_pose();
        assert!(rest.mirrored(&map, config.mode).max_abs_diff(&rest) < 1e-12);

        let shifted = rest.translated(DVec3::new(0.3, 0., 0.));
        let mirrored = shifted.mirrored(&map, config.mode);
        let pelvis = skeleton.id("pelvis").unwrap();
        assert!((mirrored[pelvis].x + 0.3).abs() < 1e-12);
    }

    #[test]
    fn rotation_keeps_pivot_fixed() {
        let skeleton = Skeleton::point_light_figure();
        let rest = skeleton.rest_pose();
        let pelvis = skeleton.id("pelvis").unwrap();
        let turned = rest.rotated_about(rest[pelvis], DQuat::from_rotation_y(FRAC_PI_2));
        assert!(turned[pelvis].abs_diff_eq(rest[pelvis], 1e-12));

        // A quarter turn puts the hips on the front-back axis
        let hip = skeleton.id("hip_L").unwrap();
        assert!(turned[hip].z < -0.09 || turned[hip].z > 0.09);
        assert!(turned[hip].x.abs() < 1e-12);
        assert!(turned.is_finite());
        assert_eq!(turned.to_points().len(), 15);
    }
}
