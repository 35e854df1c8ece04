use std::sync::Arc;

use crate::{pose::Pose, skeleton::Skeleton};

/// A pose produced by a [`SamplePose`] source, plus its diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledPose {
    pub pose: Pose,
    /// At least one limb target was out of reach and had to be clamped onto its limb.
    pub clamped: bool,
}

/// A pure, continuous-time pose source.
///
/// Implementations must return the same pose for the same `time`, independently of any
/// previous call, so callers may sample in any order and from several threads.
pub trait SamplePose {
    fn skeleton(&self) -> &Skeleton;

    fn sample_pose(&self, time: f64) -> SampledPose;
}

/// A skeleton on its own samples as a figure standing still in its rest pose.
impl SamplePose for Skeleton {
    fn skeleton(&self) -> &Skeleton {
        self
    }

    fn sample_pose(&self, time: f64) -> SampledPose {
        SampledPose {
            pose: self.rest_pose().with_timestamp(time),
            clamped: false,
        }
    }
}

impl<T: SamplePose + ?Sized> SamplePose for &T {
    fn skeleton(&self) -> &Skeleton {
        (**self).skeleton()
    }

    fn sample_pose(&self, time: f64) -> SampledPose {
        (**self).sample_pose(time)
    }
}

impl<T: SamplePose + ?Sized> SamplePose for Arc<T> {
    fn skeleton(&self) -> &Skeleton {
        (**self).skeleton()
    }

    fn sample_pose(&self, time: f64) -> SampledPose {
        (**self).sample_pose(time)
    }
}
