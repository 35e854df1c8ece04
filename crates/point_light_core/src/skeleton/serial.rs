use bevy_math::DVec3;
use serde::{Deserialize, Serialize};

/// Declarative skeleton description, as stored in `*.skn.ron` files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDescription {
    pub joints: Vec<JointSerial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSerial {
    pub id: String,
    /// `None` only for the root joint
    #[serde(default)]
    pub parent: Option<String>,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Omitted for planar skeletons
    #[serde(default)]
    pub offset_z: f64,
}

impl JointSerial {
    pub fn new(id: impl Into<String>, parent: Option<&str>, offset: DVec3) -> Self {
        Self {
            id: id.into(),
            parent: parent.map(str::to_string),
            offset_x: offset.x,
            offset_y: offset.y,
            offset_z: offset.z,
        }
    }

    pub fn offset(&self) -> DVec3 {
        DVec3::new(self.offset_x, self.offset_y, self.offset_z)
    }
}

impl SkeletonDescription {
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
