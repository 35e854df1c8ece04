use point_light_core::{
    errors::{ConfigError, ConfigResult},
    id::JointId,
    pose::Pose,
    skeleton::Skeleton,
    symmetry::config::{FlipNameMapper, SymmetryConfig},
};

use crate::profile::Side;

pub const PELVIS: &str = "pelvis";
pub const NECK: &str = "neck";
pub const HEAD: &str = "head";
/// Side-neutral stems of the limb joints, root first. The sided joint names come from the
/// symmetry config, e.g. `shoulder_L`/`shoulder_R` or `left_shoulder`/`right_shoulder`.
pub const ARM: [&str; 3] = ["shoulder", "elbow", "wrist"];
pub const LEG: [&str; 3] = ["hip", "knee", "ankle"];

/// A two-segment limb: root, middle joint and end effector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimbChain {
    pub root: JointId,
    pub mid: JointId,
    pub end: JointId,
    pub upper_len: f64,
    pub lower_len: f64,
}

impl LimbChain {
    /// Resolves a limb from joint names. The middle joint must be a direct child of the root
    /// and the end a direct child of the middle joint.
    pub fn resolve(skeleton: &Skeleton, names: [&str; 3]) -> ConfigResult<Self> {
        let [root, mid, end] = names;
        let upper_len = Self::segment(skeleton, root, mid)?;
        let lower_len = Self::segment(skeleton, mid, end)?;

        Ok(Self {
            root: landmark(skeleton, root)?,
            mid: landmark(skeleton, mid)?,
            end: landmark(skeleton, end)?,
            upper_len,
            lower_len,
        })
    }

    fn segment(skeleton: &Skeleton, parent: &str, child: &str) -> ConfigResult<f64> {
        landmark(skeleton, parent)?;
        landmark(skeleton, child)?;
        skeleton
            .segment_length(parent, child)
            .ok_or_else(|| ConfigError::UnexpectedParent {
                joint: child.to_string(),
                expected: parent.to_string(),
            })
    }

    pub fn joints(&self) -> [JointId; 3] {
        [self.root, self.mid, self.end]
    }
}

fn as_refs(names: &[String; 3]) -> [&str; 3] {
    [names[0].as_str(), names[1].as_str(), names[2].as_str()]
}

/// Left and right joint names for `stem`. Either side is enough to find both: the other one
/// is its mirror name, which must then exist in the skeleton too.
fn sided_names(
    skeleton: &Skeleton,
    mapper: &FlipNameMapper,
    stem: &str,
) -> ConfigResult<[String; 2]> {
    let (found, key) = skeleton
        .joint_names()
        .find_map(|name| {
            let (key, name_stem) = mapper.split_side(name)?;
            (name_stem == stem).then_some((name, key))
        })
        .ok_or_else(|| ConfigError::MissingLandmark(stem.to_string()))?;
    let mirrored = mapper
        .flip(found)
        .ok_or_else(|| ConfigError::MissingLandmark(stem.to_string()))?;

    Ok(if key == mapper.left_key() {
        [found.to_string(), mirrored]
    } else {
        [mirrored, found.to_string()]
    })
}

fn limb_names(
    skeleton: &Skeleton,
    mapper: &FlipNameMapper,
    stems: [&str; 3],
) -> ConfigResult<[[String; 3]; 2]> {
    let [root, mid, end] = stems.map(|stem| sided_names(skeleton, mapper, stem));
    let ([root_l, root_r], [mid_l, mid_r], [end_l, end_r]) = (root?, mid?, end?);
    Ok([[root_l, mid_l, end_l], [root_r, mid_r, end_r]])
}

fn resolve_limbs(
    skeleton: &Skeleton,
    mapper: &FlipNameMapper,
    stems: [&str; 3],
) -> ConfigResult<[LimbChain; 2]> {
    let [left, right] = limb_names(skeleton, mapper, stems)?;
    Ok([
        LimbChain::resolve(skeleton, as_refs(&left))?,
        LimbChain::resolve(skeleton, as_refs(&right))?,
    ])
}

fn landmark(skeleton: &Skeleton, name: &str) -> ConfigResult<JointId> {
    skeleton
        .id(name)
        .ok_or_else(|| ConfigError::MissingLandmark(name.to_string()))
}

/// The landmark joints an action animates, resolved once against a skeleton.
///
/// Limb joints are found by their side-neutral stem under the symmetry config, whose `key_1`
/// marks the figure's left. Any joint that is not a landmark is carried along rigidly by its
/// parent.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureRig {
    pub pelvis: JointId,
    pub neck: JointId,
    pub head: JointId,
    /// Indexed by [`Side::index`]
    pub arms: [LimbChain; 2],
    pub legs: [LimbChain; 2],
    /// Non-landmark joints in parent-first order
    pub extras: Vec<JointId>,
    pub rest: Pose,
}

impl FigureRig {
    pub fn resolve(skeleton: &Skeleton, symmetry: &SymmetryConfig) -> ConfigResult<Self> {
        let arms = resolve_limbs(skeleton, &symmetry.name_mapper, ARM)?;
        let legs = resolve_limbs(skeleton, &symmetry.name_mapper, LEG)?;
        let pelvis = landmark(skeleton, PELVIS)?;
        let neck = landmark(skeleton, NECK)?;
        let head = landmark(skeleton, HEAD)?;

        let mut landmarks = vec![pelvis, neck, head];
        landmarks.extend(arms.iter().chain(&legs).flat_map(LimbChain::joints));
        let extras = skeleton
            .topological_order()
            .iter()
            .copied()
            .filter(|id| !landmarks.contains(id))
            .collect();

        Ok(Self {
            pelvis,
            neck,
            head,
            arms,
            legs,
            extras,
            rest: skeleton.rest_pose(),
        })
    }

    pub fn arm(&self, side: Side) -> &LimbChain {
        &self.arms[side.index()]
    }

    pub fn leg(&self, side: Side) -> &LimbChain {
        &self.legs[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::DVec3;
    use point_light_core::skeleton::serial::{JointSerial, SkeletonDescription};

    /// The standard figure with `left_`/`right_` prefixes instead of `_L`/`_R` suffixes.
    fn prefixed_figure() -> Skeleton {
        let rename = |name: &str| match (name.strip_suffix("_L"), name.strip_suffix("_R")) {
            (Some(stem), _) => format!("left_{stem}"),
            (_, Some(stem)) => format!("right_{stem}"),
            _ => name.to_string(),
        };
        figure_with(|joints| {
            for joint in joints.iter_mut() {
                joint.id = rename(joint.id.as_str());
                joint.parent = joint.parent.as_deref().map(rename);
            }
        })
        .unwrap()
    }

    fn prefixed_symmetry() -> SymmetryConfig {
        ron::from_str(
            r#"(name_mapper: Pattern((key_1: "left", key_2: "right", pattern_before: "^", pattern_after: "_.*$")))"#,
        )
        .unwrap()
    }

    fn figure_with(edit: impl FnOnce(&mut Vec<JointSerial>)) -> ConfigResult<Skeleton> {
        let mut description = SkeletonDescription::point_light_figure();
        edit(&mut description.joints);
        Skeleton::from_description(description)
    }

    #[test]
    fn resolves_the_standard_figure() {
        let skeleton = Skeleton::point_light_figure();
        let rig = FigureRig::resolve(&skeleton, &SymmetryConfig::default()).unwrap();
        assert_eq!(rig.arm(Side::Right).end, skeleton.id("wrist_R").unwrap());
        assert_eq!(rig.leg(Side::Left).mid, skeleton.id("knee_L").unwrap());
        assert!((rig.leg(Side::Right).upper_len - 0.45).abs() < 1e-12);
        assert!(rig.extras.is_empty());
    }

    #[test]
    fn extra_joints_are_kept_in_parent_first_order() {
        let skeleton = figure_with(|joints| {
            let toe = JointSerial::new("toe_L", Some("ankle_L"), DVec3::new(0., -0.05, 0.12));
            joints.insert(0, toe);
            joints.push(JointSerial::new("nose", Some("head"), DVec3::new(0., 0., 0.1)));
        })
        .unwrap();
        let rig = FigureRig::resolve(&skeleton, &SymmetryConfig::default()).unwrap();
        assert_eq!(rig.extras.len(), 2);
        assert!(rig.extras.contains(&skeleton.id("toe_L").unwrap()));
    }

    #[test]
    fn missing_landmark() {
        let skeleton = figure_with(|joints| {
            joints.retain(|joint| joint.id != "head");
        })
        .unwrap();
        assert_eq!(
            FigureRig::resolve(&skeleton, &SymmetryConfig::default()),
            Err(ConfigError::MissingLandmark("head".into()))
        );
    }

    #[test]
    fn missing_limb_side() {
        let skeleton = figure_with(|joints| {
            joints.retain(|joint| joint.id != "elbow_L");
            for joint in joints.iter_mut() {
                if joint.id == "wrist_L" {
                    joint.parent = Some("shoulder_L".into());
                }
            }
        })
        .unwrap();
        assert_eq!(
            FigureRig::resolve(&skeleton, &SymmetryConfig::default()),
            Err(ConfigError::MissingLandmark("elbow_L".into()))
        );

        let skeleton = figure_with(|joints| {
            joints.retain(|joint| !joint.id.starts_with("ankle"));
        })
        .unwrap();
        assert_eq!(
            FigureRig::resolve(&skeleton, &SymmetryConfig::default()),
            Err(ConfigError::MissingLandmark("ankle".into()))
        );
    }

    #[test]
    fn prefixed_side_names() {
        let skeleton = prefixed_figure();
        let config = prefixed_symmetry();
        assert!(skeleton.mirror_map(&config).is_ok());

        let rig = FigureRig::resolve(&skeleton, &config).unwrap();
        assert_eq!(rig.arm(Side::Left).root, skeleton.id("left_shoulder").unwrap());
        assert_eq!(rig.arm(Side::Right).end, skeleton.id("right_wrist").unwrap());
        assert_eq!(rig.leg(Side::Right).mid, skeleton.id("right_knee").unwrap());
        assert!(rig.extras.is_empty());

        let standard = Skeleton::point_light_figure();
        assert_eq!(Ok(rig), FigureRig::resolve(&standard, &SymmetryConfig::default()));
    }

    #[test]
    fn broken_limb_chain() {
        let skeleton = figure_with(|joints| {
            for joint in joints.iter_mut() {
                if joint.id == "wrist_R" {
                    joint.parent = Some("shoulder_R".into());
                }
            }
        })
        .unwrap();
        assert_eq!(
            FigureRig::resolve(&skeleton, &SymmetryConfig::default()),
            Err(ConfigError::UnexpectedParent {
                joint: "wrist_R".into(),
                expected: "elbow_R".into()
            })
        );
    }
}
