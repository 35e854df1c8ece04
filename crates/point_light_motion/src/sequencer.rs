use bevy_log::{debug, warn};
use point_light_core::{
    errors::{ConfigError, ConfigResult, LoadError},
    sampling::SamplePose,
};
use serde::{Deserialize, Serialize};

use crate::{
    clip::{Frame, MotionClip},
    stream::PoseStream,
};

/// Guards `floor(rate · duration)` against products like `30 · 0.1` landing just below an
/// integer.
const FRAME_COUNT_EPSILON: f64 = 1e-9;

/// Largest clip [`FrameSequencer::generate`] materialises. Longer motions are streamed with
/// [`iterate`].
pub const MAX_CLIP_FRAMES: usize = 1 << 20;

/// Sampling parameters of a clip, as found in `*.clip.ron` files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    /// Frames per second
    pub frame_rate: f64,
    /// Seconds
    pub duration: f64,
    pub looping: bool,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            frame_rate: 30.,
            duration: 2.,
            looping: false,
        }
    }
}

impl ClipSettings {
    pub fn from_ron_str(input: &str) -> Result<Self, LoadError> {
        let settings: Self = ron::de::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_frame_rate(self.frame_rate)?;
        if !(self.duration.is_finite() && self.duration > 0.) {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        let requested = self.frame_rate * self.duration;
        if requested > MAX_CLIP_FRAMES as f64 {
            return Err(ConfigError::TooManyFrames {
                requested,
                limit: MAX_CLIP_FRAMES,
            });
        }
        Ok(())
    }
}

fn validate_frame_rate(frame_rate: f64) -> ConfigResult<()> {
    if frame_rate.is_finite() && frame_rate > 0. {
        Ok(())
    } else {
        Err(ConfigError::InvalidFrameRate(frame_rate))
    }
}

/// Samples pose sources into clips at `t_i = i / frame_rate` for
/// `i in 0..floor(frame_rate · duration)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSequencer {
    settings: ClipSettings,
}

impl FrameSequencer {
    pub fn new(frame_rate: f64, duration: f64, looping: bool) -> ConfigResult<Self> {
        Self::from_settings(ClipSettings {
            frame_rate,
            duration,
            looping,
        })
    }

    pub fn from_settings(settings: ClipSettings) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    pub fn frame_count(&self) -> usize {
        (self.settings.frame_rate * self.settings.duration + FRAME_COUNT_EPSILON).floor() as usize
    }

    pub fn generate<S: SamplePose + ?Sized>(&self, source: &S) -> MotionClip {
        let ClipSettings {
            frame_rate,
            duration,
            looping,
        } = self.settings;

        let frames: Vec<Frame> = (0..self.frame_count())
            .map(|index| Frame::sample(source, index, frame_rate))
            .collect();

        let clip = MotionClip::new(frames, frame_rate, duration, looping);
        let clamped = clip.clamped_frames();
        if !clamped.is_empty() {
            warn!(
                "{} of {} frames needed limb clamping (first at frame {})",
                clamped.len(),
                clip.len(),
                clamped[0]
            );
        }
        debug!(
            "Generated {} frames at {frame_rate} fps over {duration} s",
            clip.len()
        );
        clip
    }
}

/// Samples `source` into a clip.
pub fn generate<S: SamplePose + ?Sized>(
    source: &S,
    frame_rate: f64,
    duration: f64,
    looping: bool,
) -> ConfigResult<MotionClip> {
    Ok(FrameSequencer::new(frame_rate, duration, looping)?.generate(source))
}

/// An endless stream of frames of `source`, identical to the frames [`generate`] produces at
/// the same rate.
pub fn iterate<S: SamplePose>(source: S, frame_rate: f64) -> ConfigResult<PoseStream<S>> {
    validate_frame_rate(frame_rate)?;
    Ok(PoseStream::new(source, frame_rate))
}
