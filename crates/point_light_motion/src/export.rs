use serde::{Deserialize, Serialize};

use crate::{clip::MotionClip, errors::ExportError};

/// Renderer-facing form of a clip: per frame, the `[x, y, z]` point of every joint in the
/// skeleton's canonical order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipExport {
    pub frame_rate: f64,
    pub frame_count: usize,
    pub looping: bool,
    pub frames: Vec<Vec<[f64; 3]>>,
}

impl From<&MotionClip> for ClipExport {
    fn from(clip: &MotionClip) -> Self {
        Self {
            frame_rate: clip.frame_rate(),
            frame_count: clip.len(),
            looping: clip.looping(),
            frames: clip
                .frames()
                .iter()
                .map(|frame| frame.pose.to_points())
                .collect(),
        }
    }
}

impl ClipExport {
    pub fn to_ron(&self) -> Result<String, ExportError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn from_ron_str(input: &str) -> Result<Self, ExportError> {
        let export: Self = ron::de::from_str(input)?;
        export.validated()
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, ExportError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, ExportError> {
        let export: Self = rmp_serde::from_slice(bytes)?;
        export.validated()
    }

    fn validated(self) -> Result<Self, ExportError> {
        if self.frame_count != self.frames.len() {
            return Err(ExportError::FrameCountMismatch {
                declared: self.frame_count,
                actual: self.frames.len(),
            });
        }
        Ok(self)
    }
}
