pub mod config;
pub mod serial;

use crate::{errors::ConfigResult, pose::Pose, skeleton::Skeleton};
use config::SymmetryConfig;

/// Mirrors a pose of `skeleton` under `config`, swapping left and right joints.
pub fn flip_pose(val: &Pose, config: &SymmetryConfig, skeleton: &Skeleton) -> ConfigResult<Pose> {
    let mirror_map = skeleton.mirror_map(config)?;
    Ok(val.mirrored(&mirror_map, config.mode))
}
