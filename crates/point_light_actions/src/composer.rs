use std::sync::Arc;

use bevy_log::{debug, trace};
use bevy_math::DVec3;
use point_light_core::{
    id::JointId,
    ik::{LimbHinge, TwoBoneRequest},
    pose::Pose,
    primitives::RotationAxis,
    sampling::{SamplePose, SampledPose},
    skeleton::Skeleton,
    symmetry::config::{SymmetryConfig, SymmetryMode},
};

use crate::{
    action::Action,
    errors::ActionError,
    profile::{ActionProfile, Side},
    rig::{FigureRig, LimbChain},
    tags::SubjectTags,
};

/// Turns action names and subject tags into pose functions for a skeleton.
#[derive(Debug, Clone, Default)]
pub struct ActionComposer {
    symmetry: SymmetryConfig,
}

impl ActionComposer {
    /// A composer pairing left and right landmarks with `symmetry` instead of the default
    /// `_L`/`_R` suffixes. The config's `key_1` marks the figure's left side.
    pub fn new(symmetry: SymmetryConfig) -> Self {
        Self { symmetry }
    }

    pub fn symmetry(&self) -> &SymmetryConfig {
        &self.symmetry
    }

    /// Validates the action name and the skeleton's landmarks, then returns the pure
    /// `t -> Pose` function for the action.
    pub fn build_pose_function(
        &self,
        skeleton: Arc<Skeleton>,
        action_name: &str,
        tags: SubjectTags,
    ) -> Result<PoseFunction, ActionError> {
        let action: Action = action_name.parse()?;
        self.build_for_action(skeleton, action, tags)
    }

    pub fn build_for_action(
        &self,
        skeleton: Arc<Skeleton>,
        action: Action,
        tags: SubjectTags,
    ) -> Result<PoseFunction, ActionError> {
        let rig = FigureRig::resolve(&skeleton, &self.symmetry)?;
        let profile = ActionProfile::for_action(action, &tags);
        debug!(
            "Built pose function for {action} ({tags}) with {} bindings",
            profile.bindings.len()
        );

        Ok(PoseFunction {
            skeleton,
            profile: Arc::new(profile),
            rig: Arc::new(rig),
            mode: self.symmetry.mode,
        })
    }
}

/// Builds a pose function with the default `_L`/`_R` symmetry.
pub fn build_pose_function(
    skeleton: Arc<Skeleton>,
    action_name: &str,
    tags: SubjectTags,
) -> Result<PoseFunction, ActionError> {
    ActionComposer::default().build_pose_function(skeleton, action_name, tags)
}

/// A pure function from time to pose.
///
/// Cloning is cheap and clones share the skeleton, profile and rig.
#[derive(Clone, Debug)]
pub struct PoseFunction {
    skeleton: Arc<Skeleton>,
    profile: Arc<ActionProfile>,
    rig: Arc<FigureRig>,
    mode: SymmetryMode,
}

impl PoseFunction {
    pub fn action(&self) -> Action {
        self.profile.action
    }

    pub fn profile(&self) -> &ActionProfile {
        &self.profile
    }

    pub fn rig(&self) -> &FigureRig {
        &self.rig
    }

    /// Cycle length of cyclic actions.
    pub fn period(&self) -> Option<f64> {
        self.profile.period
    }

    pub fn sample(&self, time: f64) -> Pose {
        self.sample_with_diagnostics(time).pose
    }

    /// Evaluates the figure at `time`: torso first, then the limbs through IK, then any extra
    /// joints, and finally the whole-body pitch and heading about the pelvis.
    pub fn sample_with_diagnostics(&self, time: f64) -> SampledPose {
        let channels = self.profile.channels(time);
        let rig = &*self.rig;
        let rest = &rig.rest;
        let mut positions = rest.positions().to_vec();
        let mut clamped = false;

        let rest_pelvis = rest[rig.pelvis];
        let pelvis = rest_pelvis + channels.pelvis;
        let spine = RotationAxis::Lateral.rotation(channels.spine_pitch);
        let upper_body = |joint: JointId| pelvis + spine * (rest[joint] - rest_pelvis);

        let neck = upper_body(rig.neck);
        let head_rotation = spine * RotationAxis::Lateral.rotation(channels.head_pitch);
        positions[rig.pelvis.index()] = pelvis;
        positions[rig.neck.index()] = neck;
        positions[rig.head.index()] = neck + head_rotation * (rest[rig.head] - rest[rig.neck]);

        for side in Side::BOTH {
            let arm = rig.arm(side);
            let shoulder = upper_body(arm.root);
            let hand = shoulder + (rest[arm.end] - rest[arm.root]) + channels.hand_offset(side);
            clamped |= place_limb(
                &mut positions,
                arm,
                shoulder,
                hand,
                self.profile.arm_hinge(side, self.mode),
            );

            let leg = rig.leg(side);
            let hip = pelvis + (rest[leg.root] - rest_pelvis);
            let foot = rest[leg.end] + channels.foot_offset(side);
            clamped |= place_limb(
                &mut positions,
                leg,
                hip,
                foot,
                self.profile.leg_hinge(side, self.mode),
            );
        }

        for &id in &rig.extras {
            if let Some(joint) = self.skeleton.get(id) {
                let base = joint
                    .parent()
                    .map(|parent| positions[parent.index()])
                    .unwrap_or(DVec3::ZERO);
                positions[id.index()] = base + joint.offset();
            }
        }

        let mut pose = Pose::from_positions(positions, time);
        if channels.body_pitch != 0. {
            pose = pose.rotated_about(pelvis, RotationAxis::Lateral.rotation(channels.body_pitch));
        }
        if channels.heading != 0. {
            pose = pose.rotated_about(pelvis, RotationAxis::Vertical.rotation(channels.heading));
        }

        SampledPose { pose, clamped }
    }
}

/// Solves one limb and writes its three joints. Returns whether the target had to be clamped.
fn place_limb(
    positions: &mut [DVec3],
    limb: &LimbChain,
    root: DVec3,
    target: DVec3,
    hinge: LimbHinge,
) -> bool {
    let solved = TwoBoneRequest {
        root,
        target,
        upper_len: limb.upper_len,
        lower_len: limb.lower_len,
        hinge,
    }
    .solve_clamped();

    positions[limb.root.index()] = root;
    positions[limb.mid.index()] = solved.mid;
    positions[limb.end.index()] = solved.end;
    if solved.clamped {
        trace!("Clamped limb target {target} to {}", solved.end);
    }
    solved.clamped
}

impl SamplePose for PoseFunction {
    fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    fn sample_pose(&self, time: f64) -> SampledPose {
        self.sample_with_diagnostics(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{Emotion, Sex, Weight};
    use point_light_core::{
        errors::ConfigError,
        skeleton::serial::{JointSerial, SkeletonDescription},
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn figure() -> Arc<Skeleton> {
        Arc::new(Skeleton::point_light_figure())
    }

    fn build(action: Action, tags: SubjectTags) -> PoseFunction {
        ActionComposer::default()
            .build_for_action(figure(), action, tags)
            .unwrap()
    }

    fn joint(pose_fn: &PoseFunction, pose: &Pose, name: &str) -> DVec3 {
        pose[pose_fn.skeleton().id(name).unwrap()]
    }

    fn all_tags() -> impl Iterator<Item = SubjectTags> {
        SubjectTags::weight_emotion_grid()
            .chain([SubjectTags::new(Some(Sex::Female), Some(Weight::Heavy), Some(Emotion::Happy))])
    }

    #[test]
    fn unknown_action_fails_at_build_time() {
        let result = build_pose_function(figure(), "moonwalking", SubjectTags::default());
        assert!(matches!(result, Err(ActionError::Unsupported(_))));
    }

    #[test]
    fn incomplete_skeleton_fails_at_build_time() {
        let mut description = SkeletonDescription::point_light_figure();
        description.joints.retain(|joint| joint.id != "ankle_R");
        let skeleton = Arc::new(Skeleton::from_description(description).unwrap());
        let result = build_pose_function(skeleton, "walking", SubjectTags::default());
        assert_eq!(
            result.unwrap_err(),
            ActionError::Config(ConfigError::MissingLandmark("ankle_R".into()))
        );
    }

    #[test]
    fn side_names_follow_the_symmetry_config() {
        let rename = |name: &str| match (name.strip_suffix("_L"), name.strip_suffix("_R")) {
            (Some(stem), _) => format!("left_{stem}"),
            (_, Some(stem)) => format!("right_{stem}"),
            _ => name.to_string(),
        };
        let mut description = SkeletonDescription::point_light_figure();
        for joint in description.joints.iter_mut() {
            joint.id = rename(joint.id.as_str());
            joint.parent = joint.parent.as_deref().map(rename);
        }
        let skeleton = Arc::new(Skeleton::from_description(description).unwrap());
        let symmetry: SymmetryConfig = ron::from_str(
            r#"(name_mapper: Pattern((key_1: "left", key_2: "right", pattern_before: "^", pattern_after: "_.*$")))"#,
        )
        .unwrap();
        let composer = ActionComposer::new(symmetry);

        for action in [Action::Walking, Action::Waving] {
            let prefixed = composer
                .build_pose_function(skeleton.clone(), action.name(), SubjectTags::default())
                .unwrap();
            let standard = build(action, SubjectTags::default());
            for i in 0..40 {
                let t = i as f64 * 0.07;
                assert_eq!(prefixed.sample(t), standard.sample(t));
            }
        }

        let suffixed = build_pose_function(skeleton, "walking", SubjectTags::default());
        assert!(matches!(
            suffixed,
            Err(ActionError::Config(ConfigError::MissingLandmark(_)))
        ));
    }

    #[test]
    fn names_are_normalized() {
        let pose_fn =
            build_pose_function(figure(), "Jumping_Forward", SubjectTags::default()).unwrap();
        assert_eq!(pose_fn.action(), Action::JumpingForward);
    }

    #[test]
    fn mirror_symmetry() {
        let mirror_map = figure().mirror_map(&SymmetryConfig::default()).unwrap();
        for action in Action::ALL {
            for tags in all_tags() {
                let pose_fn = build(action, tags);
                let Some(delay) = pose_fn.profile().mirror_delay() else {
                    continue;
                };
                for i in 0..200 {
                    let t = i as f64 * 0.037;
                    let mirrored = pose_fn.sample(t).mirrored(&mirror_map, SymmetryMode::MirrorX);
                    let later = pose_fn.sample(t + delay);
                    assert!(
                        mirrored.max_abs_diff(&later) < 1e-6,
                        "{action} ({tags}) is not mirror symmetric at t = {t}"
                    );
                }
            }
        }
    }

    #[test]
    fn cyclic_actions_are_periodic() {
        for action in Action::ALL.into_iter().filter(Action::is_cyclic) {
            for tags in all_tags() {
                let pose_fn = build(action, tags);
                let period = pose_fn.period().unwrap();
                for i in 0..200 {
                    let t = i as f64 * period / 100.;
                    let a = pose_fn.sample(t);
                    let b = pose_fn.sample(t + period);
                    assert!(
                        a.max_abs_diff(&b) < 1e-6,
                        "{action} ({tags}) is not periodic at t = {t}"
                    );
                }
            }
        }
    }

    #[test]
    fn poses_are_always_finite() {
        let mut rng = StdRng::seed_from_u64(0xb10);
        for action in Action::ALL {
            for tags in SubjectTags::weight_emotion_grid() {
                let pose_fn = build(action, tags);
                for _ in 0..10_000 {
                    let t = rng.random_range(-10.0..30.0);
                    let pose = pose_fn.sample(t);
                    assert_eq!(pose.len(), 15);
                    assert!(pose.is_finite(), "{action} ({tags}) is not finite at t = {t}");
                }
            }
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        for action in Action::ALL {
            let tags = SubjectTags::new(None, Some(Weight::Heavy), Some(Emotion::Sad));
            let a = build(action, tags);
            let b = build(action, tags);
            for t in [0., 0.1, 0.77, 1.5, 3.14, 12.] {
                assert_eq!(a.sample(t), b.sample(t));
            }
            // Order of evaluation does not matter
            let late = a.sample(12.);
            let _ = a.sample(0.3);
            assert_eq!(a.sample(12.), late);
        }
    }

    #[test]
    fn segment_lengths_are_preserved() {
        let skeleton = figure();
        let rest = skeleton.rest_pose();
        for action in Action::ALL {
            let pose_fn = build(action, SubjectTags::default());
            for i in 0..100 {
                let pose = pose_fn.sample(i as f64 * 0.05);
                for joint in skeleton.joints() {
                    let Some(parent) = joint.parent() else {
                        continue;
                    };
                    let expected = rest[joint.id()].distance(rest[parent]);
                    let actual = pose[joint.id()].distance(pose[parent]);
                    assert!(
                        (expected - actual).abs() < 1e-6,
                        "{action}: segment {} stretched",
                        joint.name()
                    );
                }
            }
        }
    }

    #[test]
    fn catalog_motion_stays_within_reach() {
        for action in [Action::Walking, Action::Running, Action::Waving, Action::SittingDown] {
            for tags in all_tags() {
                let pose_fn = build(action, tags);
                for i in 0..300 {
                    let t = i as f64 * 0.01;
                    assert!(
                        !pose_fn.sample_with_diagnostics(t).clamped,
                        "{action} ({tags}) clamped at t = {t}"
                    );
                }
            }
        }
    }

    #[test]
    fn walking_keeps_a_foot_down_running_does_not() {
        let lifted = |pose_fn: &PoseFunction, t: f64| {
            let pose = pose_fn.sample(t);
            let rest = pose_fn.skeleton().rest_pose();
            ["ankle_L", "ankle_R"]
                .into_iter()
                .filter(|name| joint(pose_fn, &pose, name).y > joint(pose_fn, &rest, name).y + 1e-9)
                .count()
        };

        let walking = build(Action::Walking, SubjectTags::default());
        assert!((0..1_000).all(|i| lifted(&walking, i as f64 * 0.005) <= 1));

        let running = build(Action::Running, SubjectTags::default());
        assert!((0..1_000).any(|i| lifted(&running, i as f64 * 0.005) == 2));
    }

    #[test]
    fn waving_raises_the_right_hand_only() {
        let pose_fn = build(Action::Waving, SubjectTags::default());
        let rest = pose_fn.skeleton().rest_pose();
        for i in 0..100 {
            let pose = pose_fn.sample(i as f64 * 0.02);
            let wrist = joint(&pose_fn, &pose, "wrist_R");
            let shoulder = joint(&pose_fn, &pose, "shoulder_R");
            let elbow = joint(&pose_fn, &pose, "elbow_R");
            assert!(wrist.y > shoulder.y);
            assert!(wrist.x < shoulder.x);
            // Elbow hangs below the line from shoulder to wrist
            assert!(elbow.y < shoulder.y.max(wrist.y));
            let left_wrist = joint(&pose_fn, &pose, "wrist_L");
            assert!(left_wrist.abs_diff_eq(joint(&pose_fn, &rest, "wrist_L"), 1e-9));
        }
    }

    #[test]
    fn postures_end_where_expected() {
        let sitting = build(Action::SittingDown, SubjectTags::default());
        let seated = sitting.sample(5.);
        assert!((joint(&sitting, &seated, "pelvis").y - 0.53).abs() < 1e-9);
        assert!(joint(&sitting, &seated, "knee_L").z > joint(&sitting, &seated, "hip_L").z);

        let lying = build(Action::LyingDown, SubjectTags::default());
        let down = lying.sample(5.);
        assert!(down.iter().all(|p| p.y > 0. && p.y < 0.3));
        assert!(joint(&lying, &down, "head").z < -0.5);
        assert!(joint(&lying, &down, "ankle_L").z > 0.5);

        let turning = build(Action::TurningAround, SubjectTags::default());
        let turned = turning.sample(5.);
        assert!(joint(&turning, &turned, "shoulder_L").x < 0.);
        assert!(joint(&turning, &turned, "shoulder_R").x > 0.);
    }

    #[test]
    fn extra_joints_follow_their_parents() {
        let mut description = SkeletonDescription::point_light_figure();
        description
            .joints
            .push(JointSerial::new("toe_L", Some("ankle_L"), DVec3::new(0., -0.04, 0.12)));
        let skeleton = Arc::new(Skeleton::from_description(description).unwrap());
        let pose_fn = build_pose_function(skeleton, "walking", SubjectTags::default()).unwrap();
        for i in 0..50 {
            let pose = pose_fn.sample(i as f64 * 0.03);
            let offset = joint(&pose_fn, &pose, "toe_L") - joint(&pose_fn, &pose, "ankle_L");
            assert!(offset.abs_diff_eq(DVec3::new(0., -0.04, 0.12), 1e-12));
        }
    }

    #[test]
    fn short_legs_are_clamped_not_broken() {
        let mut description = SkeletonDescription::point_light_figure();
        for joint in description.joints.iter_mut() {
            if joint.id.starts_with("knee") || joint.id.starts_with("ankle") {
                joint.offset_y = -0.1;
            }
        }
        let skeleton = Arc::new(Skeleton::from_description(description).unwrap());
        let pose_fn =
            build_pose_function(skeleton.clone(), "walking", SubjectTags::default()).unwrap();

        let sampled = pose_fn.sample_with_diagnostics(0.);
        assert!(sampled.clamped);
        assert!(sampled.pose.is_finite());
        let knee = sampled.pose[skeleton.id("knee_L").unwrap()];
        let hip = sampled.pose[skeleton.id("hip_L").unwrap()];
        assert!((knee.distance(hip) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn pose_functions_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PoseFunction>();
        assert_send_sync::<ActionProfile>();
        assert_send_sync::<Skeleton>();

        let pose_fn = build(Action::Running, SubjectTags::default());
        let expected = pose_fn.sample(0.42);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pose_fn = pose_fn.clone();
                std::thread::spawn(move || pose_fn.sample(0.42))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
