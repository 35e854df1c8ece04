//! Per-action assignment of motion primitives to rig channels, at neutral intensity.
//!
//! Amplitudes are in metres (or radians for pitches and headings) and chosen so that the
//! built-in figure's limbs stay within reach for every subject tag combination.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use bevy_math::DVec3;
use point_light_core::{
    ik::{Bend, LimbHinge},
    primitives::{Ease, GaitPhase, JumpArc, Oscillator, RigidRotation, RotationAxis},
};

use crate::{
    action::Action,
    profile::{
        ActionProfile, Channel, ChannelBinding, Drive, GaitSignal, JumpSignal, Role, Side,
    },
};

/// Knees hinge about the lateral axis and bend forward.
pub const LEG_HINGE: LimbHinge = LimbHinge::new(DVec3::X, Bend::Forward);
/// Elbows hinge about the lateral axis and bend backward.
pub const ARM_HINGE: LimbHinge = LimbHinge::new(DVec3::X, Bend::Backward);
/// A raised waving arm hinges about the forward axis, elbow pointing down and out.
pub const WAVING_ARM_HINGE: LimbHinge = LimbHinge::new(DVec3::Z, Bend::Forward);

pub fn base_profile(action: Action) -> ActionProfile {
    match action {
        Action::Walking => walking(),
        Action::Running => running(),
        Action::JumpingUp => jumping(Action::JumpingUp, JumpArc::new(2., 0.5, 0.)),
        Action::JumpingForward => jumping(Action::JumpingForward, JumpArc::new(1.8, 0.35, 1.2)),
        Action::Waving => waving(),
        Action::Bowing => bowing(),
        Action::SittingDown => sitting_down(),
        Action::LyingDown => lying_down(),
        Action::TurningAround => turning_around(),
        Action::ForwardRolling => forward_rolling(),
    }
}

fn bind(channel: Channel, role: Role, drive: Drive) -> ChannelBinding {
    ChannelBinding::new(channel, role, drive)
}

/// One binding per side, the right one built from the right side's parameters.
fn both_sides(bindings: &mut Vec<ChannelBinding>, binding: impl Fn(Side) -> ChannelBinding) {
    bindings.extend(Side::BOTH.map(binding));
}

fn side_gait(gait: GaitPhase, side: Side) -> GaitPhase {
    match side {
        Side::Left => gait,
        Side::Right => gait.opposite(),
    }
}

fn side_oscillator(oscillator: Oscillator, side: Side) -> Oscillator {
    match side {
        Side::Left => oscillator,
        Side::Right => oscillator.shifted(0.5),
    }
}

struct GaitParams {
    gait: GaitPhase,
    pelvis_drop: f64,
    bob: f64,
    sway: f64,
    stride: f64,
    lift: f64,
    lean: f64,
    hand_lift: f64,
    hand_forward: f64,
    arm_swing: f64,
}

/// Cyclic locomotion in place. The pelvis is lowest at heel strike, arms counter-swing the
/// legs and the right side runs half a cycle behind the left.
fn gait(action: Action, params: GaitParams) -> ActionProfile {
    let cadence = params.gait.cadence;
    let mut bindings = vec![
        bind(
            Channel::PelvisVertical,
            Role::Posture,
            Drive::Constant(-params.pelvis_drop),
        ),
        bind(
            Channel::PelvisVertical,
            Role::Primary,
            Drive::Oscillator(Oscillator::new(params.bob, 2. * cadence, -FRAC_PI_2)),
        ),
        bind(
            Channel::PelvisLateral,
            Role::Sway,
            Drive::Oscillator(Oscillator::new(params.sway, cadence, -0.1 * PI)),
        ),
    ];

    if params.lean != 0. {
        bindings.push(bind(
            Channel::SpinePitch,
            Role::Posture,
            Drive::Constant(params.lean),
        ));
    }

    both_sides(&mut bindings, |side| {
        bind(
            Channel::FootForward(side),
            Role::Primary,
            Drive::Gait {
                gait: side_gait(params.gait, side),
                signal: GaitSignal::Stride,
                amplitude: params.stride,
            },
        )
    });
    both_sides(&mut bindings, |side| {
        bind(
            Channel::FootLift(side),
            Role::Primary,
            Drive::Gait {
                gait: side_gait(params.gait, side),
                signal: GaitSignal::Swing,
                amplitude: params.lift,
            },
        )
    });
    both_sides(&mut bindings, |side| {
        bind(
            Channel::HandLift(side),
            Role::Posture,
            Drive::Constant(params.hand_lift),
        )
    });
    if params.hand_forward != 0. {
        both_sides(&mut bindings, |side| {
            bind(
                Channel::HandForward(side),
                Role::Posture,
                Drive::Constant(params.hand_forward),
            )
        });
    }
    // The left arm is furthest back while the left foot is furthest ahead
    let swing = Oscillator::new(params.arm_swing, cadence, -FRAC_PI_2);
    both_sides(&mut bindings, |side| {
        bind(
            Channel::HandForward(side),
            Role::Secondary,
            Drive::Oscillator(side_oscillator(swing, side)),
        )
    });

    ActionProfile::new(action, cadence, bindings, ARM_HINGE, LEG_HINGE)
}

fn walking() -> ActionProfile {
    gait(
        Action::Walking,
        GaitParams {
            gait: GaitPhase::walking(0.9),
            pelvis_drop: 0.06,
            bob: 0.015,
            sway: 0.02,
            stride: 0.2,
            lift: 0.08,
            lean: 0.,
            hand_lift: 0.04,
            hand_forward: 0.,
            arm_swing: 0.15,
        },
    )
}

fn running() -> ActionProfile {
    gait(
        Action::Running,
        GaitParams {
            gait: GaitPhase::running(1.4),
            pelvis_drop: 0.1,
            bob: 0.04,
            sway: 0.012,
            stride: 0.22,
            lift: 0.2,
            lean: 0.15,
            hand_lift: 0.25,
            hand_forward: 0.1,
            arm_swing: 0.2,
        },
    )
}

/// Crouch, take off, fly and land. Feet follow the body in flight so the legs keep their
/// shape, arms swing up during the flight and back during the crouches.
fn jumping(action: Action, arc: JumpArc) -> ActionProfile {
    let jump = |signal, gain| Drive::Jump { arc, signal, gain };

    let mut bindings = vec![
        bind(
            Channel::PelvisVertical,
            Role::Primary,
            jump(JumpSignal::Height, 1.),
        ),
        bind(
            Channel::PelvisVertical,
            Role::Primary,
            jump(JumpSignal::Crouch, -1.),
        ),
        bind(
            Channel::SpinePitch,
            Role::Secondary,
            jump(JumpSignal::Crouch, 2.),
        ),
    ];
    both_sides(&mut bindings, |side| {
        bind(
            Channel::FootLift(side),
            Role::Primary,
            jump(JumpSignal::Height, 1.),
        )
    });
    both_sides(&mut bindings, |side| {
        bind(
            Channel::HandLift(side),
            Role::Secondary,
            jump(JumpSignal::Height, 0.6),
        )
    });
    both_sides(&mut bindings, |side| {
        bind(
            Channel::HandLift(side),
            Role::Secondary,
            jump(JumpSignal::Crouch, 0.5),
        )
    });
    both_sides(&mut bindings, |side| {
        bind(
            Channel::HandForward(side),
            Role::Secondary,
            jump(JumpSignal::Crouch, -1.),
        )
    });

    if arc.is_forward() {
        bindings.push(bind(
            Channel::PelvisForward,
            Role::Posture,
            jump(JumpSignal::Forward, 1.),
        ));
        both_sides(&mut bindings, |side| {
            bind(
                Channel::FootForward(side),
                Role::Posture,
                jump(JumpSignal::Forward, 1.),
            )
        });
    }

    ActionProfile::new(action, 0., bindings, ARM_HINGE, LEG_HINGE)
}

/// The right hand is held up beside the head and swept from side to side. The elbow is
/// solved from the moving wrist target on every frame.
fn waving() -> ActionProfile {
    let cadence = 1.5;
    let bindings = vec![
        bind(
            Channel::HandLift(Side::Right),
            Role::Posture,
            Drive::Constant(0.75),
        ),
        bind(
            Channel::HandLateral(Side::Right),
            Role::Posture,
            Drive::Constant(0.15),
        ),
        bind(
            Channel::HandLateral(Side::Right),
            Role::Primary,
            Drive::Oscillator(Oscillator::new(0.12, cadence, 0.)),
        ),
        bind(
            Channel::HandForward(Side::Right),
            Role::Posture,
            Drive::Constant(0.08),
        ),
        bind(
            Channel::HeadPitch,
            Role::Secondary,
            Drive::Oscillator(Oscillator::new(0.03, 2. * cadence, 0.)),
        ),
    ];

    ActionProfile::new(Action::Waving, cadence, bindings, WAVING_ARM_HINGE, LEG_HINGE)
}

/// Repeated bows: the upper body pitches forward and back while the hips shift back to keep
/// balance.
fn bowing() -> ActionProfile {
    let cadence = 0.4;
    let half_depth = 0.35;
    let bow = Oscillator::new(half_depth, cadence, -FRAC_PI_2);
    let bindings = vec![
        bind(
            Channel::SpinePitch,
            Role::Primary,
            Drive::Constant(half_depth),
        ),
        bind(Channel::SpinePitch, Role::Primary, Drive::Oscillator(bow)),
        bind(Channel::HeadPitch, Role::Secondary, Drive::Constant(0.1)),
        bind(
            Channel::HeadPitch,
            Role::Secondary,
            Drive::Oscillator(Oscillator::new(0.1, cadence, -FRAC_PI_2)),
        ),
        bind(
            Channel::PelvisVertical,
            Role::Posture,
            Drive::Constant(-0.03),
        ),
        bind(Channel::PelvisForward, Role::Primary, Drive::Constant(-0.04)),
        bind(
            Channel::PelvisForward,
            Role::Primary,
            Drive::Oscillator(Oscillator::new(-0.04, cadence, -FRAC_PI_2)),
        ),
    ];

    ActionProfile::new(Action::Bowing, cadence, bindings, ARM_HINGE, LEG_HINGE)
}

/// Lowers the pelvis back onto an imaginary seat, leaning forward with the hands coming to
/// rest on the thighs.
fn sitting_down() -> ActionProfile {
    let ease = Ease::new(0., 1.5);
    let eased = |amplitude| Drive::Ease { ease, amplitude };

    let mut bindings = vec![
        bind(Channel::PelvisVertical, Role::Posture, eased(-0.45)),
        bind(Channel::PelvisForward, Role::Posture, eased(-0.25)),
        bind(Channel::SpinePitch, Role::Primary, eased(0.25)),
    ];
    both_sides(&mut bindings, |side| {
        bind(Channel::HandForward(side), Role::Posture, eased(0.25))
    });
    both_sides(&mut bindings, |side| {
        bind(Channel::HandLift(side), Role::Posture, eased(0.2))
    });

    ActionProfile::new(Action::SittingDown, 0., bindings, ARM_HINGE, LEG_HINGE)
}

/// The straight body tips over backwards about the pelvis while dropping to the floor,
/// ending on its back with the legs pointing forward.
fn lying_down() -> ActionProfile {
    let ease = Ease::new(0., 2.);
    let eased = |amplitude| Drive::Ease { ease, amplitude };

    let mut bindings = vec![
        bind(Channel::BodyPitch, Role::Posture, eased(-FRAC_PI_2)),
        bind(Channel::PelvisVertical, Role::Posture, eased(-0.8)),
    ];
    // Feet drop with the pelvis so the legs stay straight while the body tips
    both_sides(&mut bindings, |side| {
        bind(Channel::FootLift(side), Role::Posture, eased(-0.8))
    });

    ActionProfile::new(Action::LyingDown, 0., bindings, ARM_HINGE, LEG_HINGE)
}

/// A half turn about the vertical axis while stepping in place.
fn turning_around() -> ActionProfile {
    let gait = GaitPhase::walking(1.2);
    let mut bindings = vec![
        bind(
            Channel::PelvisVertical,
            Role::Posture,
            Drive::Constant(-0.03),
        ),
        bind(
            Channel::Heading,
            Role::Posture,
            Drive::Rotation {
                rotation: RigidRotation::new(PI / 1.5, RotationAxis::Vertical),
                sweep: Some(PI),
            },
        ),
    ];
    both_sides(&mut bindings, |side| {
        bind(
            Channel::FootLift(side),
            Role::Primary,
            Drive::Gait {
                gait: side_gait(gait, side),
                signal: GaitSignal::Swing,
                amplitude: 0.06,
            },
        )
    });
    both_sides(&mut bindings, |side| {
        bind(Channel::HandLift(side), Role::Posture, Drive::Constant(0.03))
    });

    ActionProfile::new(
        Action::TurningAround,
        gait.cadence,
        bindings,
        ARM_HINGE,
        LEG_HINGE,
    )
}

/// One full tucked roll about the lateral axis through the pelvis, travelling forward.
fn forward_rolling() -> ActionProfile {
    let roll_time = 1.2;
    let travel = Drive::Ease {
        ease: Ease::new(0., roll_time),
        amplitude: 1.5,
    };

    let mut bindings = vec![
        bind(
            Channel::BodyPitch,
            Role::Posture,
            Drive::Rotation {
                rotation: RigidRotation::new(TAU / roll_time, RotationAxis::Lateral),
                sweep: Some(TAU),
            },
        ),
        bind(Channel::SpinePitch, Role::Posture, Drive::Constant(0.9)),
        bind(Channel::HeadPitch, Role::Posture, Drive::Constant(0.5)),
        bind(
            Channel::PelvisVertical,
            Role::Posture,
            Drive::Constant(-0.45),
        ),
        bind(Channel::PelvisForward, Role::Posture, travel),
    ];
    both_sides(&mut bindings, |side| {
        bind(Channel::FootForward(side), Role::Posture, travel)
    });
    both_sides(&mut bindings, |side| {
        bind(Channel::HandForward(side), Role::Posture, Drive::Constant(0.3))
    });
    both_sides(&mut bindings, |side| {
        bind(Channel::HandLift(side), Role::Posture, Drive::Constant(0.25))
    });

    ActionProfile::new(Action::ForwardRolling, 0., bindings, ARM_HINGE, LEG_HINGE)
}
