mod figure;
mod loader;
pub mod serial;

pub use figure::*;

use crate::{
    errors::{ConfigError, ConfigResult},
    id::JointId,
    pose::Pose,
    symmetry::config::SymmetryConfig,
};
use bevy_log::debug;
use bevy_math::DVec3;
use indexmap::IndexMap;
use serial::SkeletonDescription;
use std::{collections::VecDeque, fmt::Debug};

/// A named point of the skeleton, positioned relative to its parent in the rest pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    id: JointId,
    name: String,
    parent: Option<JointId>,
    offset: DVec3,
}

impl Joint {
    pub fn id(&self) -> JointId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<JointId> {
        self.parent
    }

    /// Rest offset relative to the parent. For the root this is its absolute rest position.
    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    /// Length of the segment joining this joint to its parent, `None` for the root.
    pub fn segment_length(&self) -> Option<f64> {
        self.parent.map(|_| self.offset.length())
    }
}

/// Immutable joint hierarchy. Joints keep their declaration order, which is the canonical
/// order used for every pose and every exported frame.
#[derive(Clone, PartialEq)]
pub struct Skeleton {
    root: JointId,
    joints: IndexMap<String, Joint>,
    children_map: Vec<Vec<JointId>>,
    /// Parent-first traversal order, starting at the root
    topo_order: Vec<JointId>,
}

impl Skeleton {
    /// Validates a declarative description and builds the skeleton from it.
    ///
    /// Every structural problem (duplicates, orphans, cycles, several roots, zero-length
    /// segments) is reported here, so a constructed skeleton is always animatable.
    pub fn from_description(description: SkeletonDescription) -> ConfigResult<Self> {
        if description.joints.is_empty() {
            return Err(ConfigError::EmptySkeleton);
        }

        let mut declared: IndexMap<String, (Option<String>, DVec3)> = IndexMap::new();
        for joint in description.joints {
            let offset = joint.offset();
            if !offset.is_finite() {
                return Err(ConfigError::NonFiniteOffset(joint.id));
            }
            if declared.contains_key(&joint.id) {
                return Err(ConfigError::DuplicateJoint(joint.id));
            }
            declared.insert(joint.id, (joint.parent, offset));
        }

        let mut root: Option<(JointId, &String)> = None;
        let mut joints: IndexMap<String, Joint> = IndexMap::with_capacity(declared.len());
        let mut children_map = vec![vec![]; declared.len()];

        for (index, (name, (parent_name, offset))) in declared.iter().enumerate() {
            let id = JointId::new(index);
            let parent = match parent_name {
                None => {
                    if let Some((_, existing)) = root {
                        return Err(ConfigError::MultipleRoots(existing.clone(), name.clone()));
                    }
                    root = Some((id, name));
                    None
                }
                Some(parent_name) => {
                    let Some(parent_index) = declared.get_index_of(parent_name) else {
                        return Err(ConfigError::OrphanedParent {
                            joint: name.clone(),
                            parent: parent_name.clone(),
                        });
                    };
                    if parent_index == index {
                        return Err(ConfigError::Cycle(name.clone()));
                    }
                    if offset.length() < f64::EPSILON {
                        return Err(ConfigError::ZeroLengthSegment {
                            parent: parent_name.clone(),
                            child: name.clone(),
                        });
                    }
                    children_map[parent_index].push(id);
                    Some(JointId::new(parent_index))
                }
            };

            joints.insert(
                name.clone(),
                Joint {
                    id,
                    name: name.clone(),
                    parent,
                    offset: *offset,
                },
            );
        }

        let Some((root, _)) = root else {
            return Err(ConfigError::MissingRoot);
        };

        let mut topo_order = Vec::with_capacity(joints.len());
        let mut pending = VecDeque::from([root]);
        while let Some(id) = pending.pop_front() {
            topo_order.push(id);
            pending.extend(children_map[id.index()].iter().copied());
        }

        if topo_order.len() != joints.len() {
            // Anything unreachable from the root hangs off a parent cycle
            let mut visited = vec![false; joints.len()];
            for id in &topo_order {
                visited[id.index()] = true;
            }
            let stray = visited
                .iter()
                .position(|v| !v)
                .and_then(|index| joints.get_index(index))
                .map(|(name, _)| name.clone())
                .unwrap_or_default();
            return Err(ConfigError::Cycle(stray));
        }

        let skeleton = Self {
            root,
            joints,
            children_map,
            topo_order,
        };
        debug!("Built skeleton with {} joints", skeleton.len());

        Ok(skeleton)
    }

    pub fn root(&self) -> JointId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Joints in canonical order
    pub fn joints(&self) -> impl ExactSizeIterator<Item = &Joint> {
        self.joints.values()
    }

    pub fn joint_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.joints.keys().map(String::as_str)
    }

    pub fn get(&self, id: JointId) -> Option<&Joint> {
        self.joints.get_index(id.index()).map(|(_, joint)| joint)
    }

    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.get(name)
    }

    /// Given a joint name, returns its id or None if the name is not in this skeleton
    pub fn id(&self, name: &str) -> Option<JointId> {
        self.joints.get_index_of(name).map(JointId::new)
    }

    pub fn name(&self, id: JointId) -> Option<&str> {
        self.get(id).map(Joint::name)
    }

    pub fn parent(&self, id: JointId) -> Option<JointId> {
        self.get(id).and_then(Joint::parent)
    }

    pub fn children(&self, id: JointId) -> &[JointId] {
        self.children_map
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Joint ids ordered so that every parent comes before its children
    pub fn topological_order(&self) -> &[JointId] {
        &self.topo_order
    }

    /// Length of the segment between `parent` and `child`, or None if `child` is not a direct
    /// child of `parent`.
    pub fn segment_length(&self, parent: &str, child: &str) -> Option<f64> {
        let parent_id = self.id(parent)?;
        let child = self.joint(child)?;
        (child.parent == Some(parent_id)).then(|| child.offset.length())
    }

    /// Absolute rest positions, composed root to leaf by vector addition.
    pub fn rest_pose(&self) -> Pose {
        let mut positions = vec![DVec3::ZERO; self.len()];
        for &id in &self.topo_order {
            let joint = &self.joints[id.index()];
            let base = joint
                .parent
                .map(|parent| positions[parent.index()])
                .unwrap_or(DVec3::ZERO);
            positions[id.index()] = base + joint.offset;
        }
        Pose::from_positions(positions, 0.)
    }

    /// For every joint, the id of its mirror counterpart under the given name mapping.
    /// Joints without a side marker map onto themselves.
    pub fn mirror_map(&self, config: &SymmetryConfig) -> ConfigResult<Vec<JointId>> {
        self.joints()
            .map(|joint| match config.name_mapper.flip(joint.name()) {
                None => Ok(joint.id),
                Some(mirrored) => self.id(&mirrored).ok_or(ConfigError::MissingMirror {
                    joint: joint.name.clone(),
                    mirrored,
                }),
            })
            .collect()
    }

    fn indent(f: &mut std::fmt::Formatter<'_>, level: u32) -> std::fmt::Result {
        if level == 0 {
            return Ok(());
        }
        for _ in 0..(level - 1) {
            write!(f, "┃ ")?;
        }
        write!(f, "┣━")?;
        Ok(())
    }

    fn fmt_level(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        level: u32,
        id: JointId,
    ) -> std::fmt::Result {
        let joint = &self.joints[id.index()];
        Self::indent(f, level)?;
        writeln!(f, "🦴 {:?} [{}]", joint.name, id.index())?;
        for child in self.children(id) {
            self.fmt_level(f, level + 1, *child)?;
        }
        Ok(())
    }
}

impl Debug for Skeleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Skeleton hierarchy:")?;
        self.fmt_level(f, 0, self.root)
    }
}
