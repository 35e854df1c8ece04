use thiserror::Error;

/// Possible errors produced while building a skeleton, a rig or a sampling configuration.
///
/// These are always fatal and are returned at construction time, never while sampling.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("skeleton description contains no joints")]
    EmptySkeleton,
    #[error("joint {0:?} is declared more than once")]
    DuplicateJoint(String),
    #[error("skeleton has no root joint (a joint without a parent)")]
    MissingRoot,
    #[error("skeleton has more than one root: {0:?} and {1:?}")]
    MultipleRoots(String, String),
    #[error("joint {joint:?} references unknown parent {parent:?}")]
    OrphanedParent { joint: String, parent: String },
    #[error("joint {0:?} is part of a parent cycle")]
    Cycle(String),
    #[error("segment {parent:?} -> {child:?} has zero length")]
    ZeroLengthSegment { parent: String, child: String },
    #[error("joint {0:?} has a non-finite rest offset")]
    NonFiniteOffset(String),
    #[error("skeleton is missing landmark joint {0:?}")]
    MissingLandmark(String),
    #[error("joint {joint:?} should be a child of {expected:?}")]
    UnexpectedParent { joint: String, expected: String },
    #[error("joint {joint:?} mirrors to {mirrored:?}, which is not in the skeleton")]
    MissingMirror { joint: String, mirrored: String },
    #[error("invalid mirror name pattern: {0}")]
    InvalidPattern(String),
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f64),
    #[error("clip duration must be positive and finite, got {0}")]
    InvalidDuration(f64),
    #[error("clip would hold {requested} frames, more than the limit of {limit}")]
    TooManyFrames { requested: f64, limit: usize },
}

impl From<regex::Error> for ConfigError {
    fn from(value: regex::Error) -> Self {
        Self::InvalidPattern(value.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// An action name outside the closed action catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported action {0:?}")]
pub struct UnsupportedActionError(pub String);

/// A two-bone IK target outside the limb's reachable annulus.
///
/// Sampling never surfaces this: targets are clamped onto the annulus and the frame is flagged.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("target at distance {distance} is outside the reachable range [{min_reach}, {max_reach}]")]
pub struct IkUnreachableError {
    pub distance: f64,
    pub min_reach: f64,
    pub max_reach: f64,
}
