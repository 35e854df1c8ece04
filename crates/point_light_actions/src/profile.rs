use bevy_math::DVec3;
use point_light_core::{
    ik::LimbHinge,
    primitives::{Ease, GaitPhase, JumpArc, Oscillator, RigidRotation, SampleAt},
    symmetry::config::SymmetryMode,
};

use crate::{
    action::Action,
    catalog,
    tags::{Modifiers, SubjectTags},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// `+1` on the left (`+x`), `-1` on the right
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.,
            Self::Right => -1.,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Decides which [`Modifiers`] apply to a drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The movement that defines the action
    Primary,
    /// Follow-through motion, damped for heavy subjects
    Secondary,
    /// Side-to-side pelvis motion
    Sway,
    /// Static offsets and transitions between postures
    Posture,
}

/// Degrees of freedom of the procedural rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    PelvisLateral,
    PelvisVertical,
    PelvisForward,
    /// Rotation of the whole figure about the vertical axis through the pelvis
    Heading,
    /// Rotation of the whole figure about the lateral axis through the pelvis
    BodyPitch,
    /// Forward lean of the upper body about the pelvis
    SpinePitch,
    HeadPitch,
    /// Foot target along the direction of travel, relative to its rest position on the ground
    FootForward(Side),
    FootLift(Side),
    /// Hand target away from the body, relative to the hanging wrist under the current shoulder
    HandLateral(Side),
    HandLift(Side),
    HandForward(Side),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GaitSignal {
    Stride,
    Swing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JumpSignal {
    Height,
    Forward,
    Crouch,
}

/// A motion primitive with the parameters needed to turn it into a channel value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drive {
    Constant(f64),
    Oscillator(Oscillator),
    Gait {
        gait: GaitPhase,
        signal: GaitSignal,
        amplitude: f64,
    },
    Jump {
        arc: JumpArc,
        signal: JumpSignal,
        gain: f64,
    },
    /// The rotation angle, optionally stopping once it has swept `sweep` radians.
    Rotation {
        rotation: RigidRotation,
        sweep: Option<f64>,
    },
    Ease {
        ease: Ease,
        amplitude: f64,
    },
}

impl Drive {
    pub fn sample(&self, time: f64) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Oscillator(oscillator) => oscillator.sample_at(time),
            Self::Gait {
                gait,
                signal,
                amplitude,
            } => {
                let sample = gait.sample(time);
                amplitude
                    * match signal {
                        GaitSignal::Stride => sample.stride_signal(),
                        GaitSignal::Swing => sample.swing_signal(),
                    }
            }
            Self::Jump { arc, signal, gain } => {
                let sample = arc.sample(time);
                gain * match signal {
                    JumpSignal::Height => sample.height,
                    JumpSignal::Forward => sample.forward,
                    JumpSignal::Crouch => sample.crouch,
                }
            }
            Self::Rotation { rotation, sweep } => {
                let angle = rotation.sample_at(time);
                match sweep {
                    Some(limit) => angle.clamp(-limit.abs(), limit.abs()),
                    None => angle,
                }
            }
            Self::Ease { ease, amplitude } => amplitude * ease.sample_at(time),
        }
    }

    /// The same drive with its amplitude and tempo scaled.
    ///
    /// Rotations only change speed, their sweep is kept. Jumps keep the distance they cover.
    pub fn modulated(self, amplitude_scale: f64, tempo_scale: f64) -> Self {
        match self {
            Self::Constant(value) => Self::Constant(value * amplitude_scale),
            Self::Oscillator(oscillator) => {
                Self::Oscillator(oscillator.scaled(amplitude_scale, tempo_scale))
            }
            Self::Gait {
                gait,
                signal,
                amplitude,
            } => Self::Gait {
                gait: gait.with_cadence(gait.cadence * tempo_scale),
                signal,
                amplitude: amplitude * amplitude_scale,
            },
            Self::Jump { arc, signal, gain } => Self::Jump {
                arc: JumpArc {
                    duration: arc.duration / tempo_scale,
                    horizontal_speed: arc.horizontal_speed * tempo_scale,
                    ..arc
                },
                signal,
                gain: gain * amplitude_scale,
            },
            Self::Rotation { rotation, sweep } => Self::Rotation {
                rotation: RigidRotation {
                    angular_velocity: rotation.angular_velocity * tempo_scale,
                    ..rotation
                },
                sweep,
            },
            Self::Ease { ease, amplitude } => Self::Ease {
                ease: ease.scaled(tempo_scale),
                amplitude: amplitude * amplitude_scale,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelBinding {
    pub channel: Channel,
    pub role: Role,
    pub drive: Drive,
}

impl ChannelBinding {
    pub const fn new(channel: Channel, role: Role, drive: Drive) -> Self {
        Self {
            channel,
            role,
            drive,
        }
    }

    pub fn modulated(self, modifiers: &Modifiers) -> Self {
        Self {
            drive: self
                .drive
                .modulated(modifiers.amplitude_for(self.role), modifiers.cadence_scale),
            ..self
        }
    }
}

/// Summed channel values at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelValues {
    /// Lateral, vertical and forward pelvis offset
    pub pelvis: DVec3,
    pub heading: f64,
    pub body_pitch: f64,
    pub spine_pitch: f64,
    pub head_pitch: f64,
    /// Per side foot target offset. Only `y` (lift) and `z` (forward) are driven.
    pub feet: [DVec3; 2],
    /// Per side hand target offset: outward, lift and forward
    pub hands: [DVec3; 2],
}

impl ChannelValues {
    pub fn add(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::PelvisLateral => self.pelvis.x += value,
            Channel::PelvisVertical => self.pelvis.y += value,
            Channel::PelvisForward => self.pelvis.z += value,
            Channel::Heading => self.heading += value,
            Channel::BodyPitch => self.body_pitch += value,
            Channel::SpinePitch => self.spine_pitch += value,
            Channel::HeadPitch => self.head_pitch += value,
            Channel::FootForward(side) => self.feet[side.index()].z += value,
            Channel::FootLift(side) => self.feet[side.index()].y += value,
            Channel::HandLateral(side) => self.hands[side.index()].x += value,
            Channel::HandLift(side) => self.hands[side.index()].y += value,
            Channel::HandForward(side) => self.hands[side.index()].z += value,
        }
    }

    /// Hand target offset in figure coordinates, with "outward" resolved to the side's `x`.
    pub fn hand_offset(&self, side: Side) -> DVec3 {
        let hand = self.hands[side.index()];
        DVec3::new(hand.x * side.sign(), hand.y, hand.z)
    }

    pub fn foot_offset(&self, side: Side) -> DVec3 {
        let foot = self.feet[side.index()];
        DVec3::new(0., foot.y, foot.z)
    }
}

/// Everything needed to animate one action for one subject.
///
/// Built once per action and tag set, then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionProfile {
    pub action: Action,
    pub modifiers: Modifiers,
    /// Base cycles per second after tempo scaling. Zero for one-off actions.
    pub cadence: f64,
    /// Cycle length of cyclic actions
    pub period: Option<f64>,
    pub bindings: Vec<ChannelBinding>,
    /// Hinges of the left limbs. Right limbs use the mirrored hinge.
    pub arm_hinge: LimbHinge,
    pub leg_hinge: LimbHinge,
}

impl ActionProfile {
    /// A profile with neutral modifiers. Cyclic actions get their period from `cadence`.
    pub fn new(
        action: Action,
        cadence: f64,
        bindings: Vec<ChannelBinding>,
        arm_hinge: LimbHinge,
        leg_hinge: LimbHinge,
    ) -> Self {
        Self {
            action,
            modifiers: Modifiers::default(),
            cadence,
            period: Self::period_of(action, cadence),
            bindings,
            arm_hinge,
            leg_hinge,
        }
    }

    /// Catalog profile of `action`, modulated by `tags`.
    pub fn for_action(action: Action, tags: &SubjectTags) -> Self {
        catalog::base_profile(action).modulated(tags.modifiers())
    }

    fn period_of(action: Action, cadence: f64) -> Option<f64> {
        (action.is_cyclic() && cadence > 0.).then(|| 1. / cadence)
    }

    /// Applies subject modifiers to every binding.
    pub fn modulated(self, modifiers: Modifiers) -> Self {
        let cadence = self.cadence * modifiers.cadence_scale;
        Self {
            modifiers,
            cadence,
            period: Self::period_of(self.action, cadence),
            bindings: self
                .bindings
                .into_iter()
                .map(|binding| binding.modulated(&modifiers))
                .collect(),
            ..self
        }
    }

    pub fn channels(&self, time: f64) -> ChannelValues {
        let mut values = ChannelValues::default();
        for binding in &self.bindings {
            values.add(binding.channel, binding.drive.sample(time));
        }
        values
    }

    pub fn arm_hinge(&self, side: Side, mode: SymmetryMode) -> LimbHinge {
        match side {
            Side::Left => self.arm_hinge,
            Side::Right => self.arm_hinge.mirrored(mode),
        }
    }

    pub fn leg_hinge(&self, side: Side, mode: SymmetryMode) -> LimbHinge {
        match side {
            Side::Left => self.leg_hinge,
            Side::Right => self.leg_hinge.mirrored(mode),
        }
    }

    /// Time offset after which the mirrored pose matches the current one: half a cycle for
    /// gaits, zero for other symmetric actions, `None` for one-sided actions.
    pub fn mirror_delay(&self) -> Option<f64> {
        if !self.action.is_symmetric() {
            return None;
        }
        if self.action.is_gait() {
            return self.period.map(|period| period / 2.);
        }
        Some(0.)
    }
}
