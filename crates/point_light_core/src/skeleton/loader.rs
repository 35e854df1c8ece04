use super::{Skeleton, serial::SkeletonDescription};
use crate::errors::LoadError;

impl Skeleton {
    /// Parses a `*.skn.ron` description and validates it.
    pub fn from_ron_str(source: &str) -> Result<Self, LoadError> {
        let serial: SkeletonDescription = ron::de::from_str(source)?;
        Ok(Self::from_description(serial)?)
    }

    pub fn from_ron_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let serial: SkeletonDescription = ron::de::from_bytes(bytes)?;
        Ok(Self::from_description(serial)?)
    }
}
