use serde::{Deserialize, Serialize};

/// Index of a joint in its skeleton's canonical order.
///
/// Ids are only meaningful for the skeleton that issued them.
#[derive(Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JointId(usize);

impl JointId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<JointId> for usize {
    fn from(value: JointId) -> Self {
        value.0
    }
}
