use point_light_core::{id::JointId, pose::Pose, sampling::SamplePose};

use crate::export::ClipExport;

/// One sampled instant of a clip.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: usize,
    /// `index / frame_rate`
    pub time: f64,
    pub pose: Pose,
    /// A limb target had to be clamped onto its reach while producing this frame
    pub clamped: bool,
}

impl Frame {
    /// Samples frame `index` directly at `index / frame_rate`.
    pub fn sample<S: SamplePose + ?Sized>(source: &S, index: usize, frame_rate: f64) -> Self {
        let time = index as f64 / frame_rate;
        let sampled = source.sample_pose(time);
        Self {
            index,
            time,
            pose: sampled.pose,
            clamped: sampled.clamped,
        }
    }
}

/// Frames sampled at a fixed rate, strictly ordered by time.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionClip {
    frames: Vec<Frame>,
    frame_rate: f64,
    duration: f64,
    looping: bool,
}

impl MotionClip {
    pub(crate) fn new(frames: Vec<Frame>, frame_rate: f64, duration: f64, looping: bool) -> Self {
        Self {
            frames,
            frame_rate,
            duration,
            looping,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    /// The frame to show at playback step `index`.
    ///
    /// Looping clips wrap around; other clips hold their last frame.
    pub fn playback_frame(&self, index: usize) -> Option<&Frame> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }
        let index = if self.looping {
            index % len
        } else {
            index.min(len - 1)
        };
        self.frames.get(index)
    }

    /// Indices of the frames that needed limb clamping.
    pub fn clamped_frames(&self) -> Vec<usize> {
        self.frames
            .iter()
            .filter(|frame| frame.clamped)
            .map(|frame| frame.index)
            .collect()
    }

    /// Position of one joint over the whole clip.
    pub fn trajectory(&self, joint: JointId) -> impl Iterator<Item = bevy_math::DVec3> + '_ {
        self.frames.iter().filter_map(move |frame| frame.pose.get(joint))
    }

    pub fn to_export(&self) -> ClipExport {
        ClipExport::from(self)
    }
}
