use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Stance/swing cycle of one limb.
///
/// A cycle starts with the stance sub-phase (foot planted) which lasts `duty_cycle` of the
/// cycle, followed by swing. The opposite limb runs the same cycle half a period later, see
/// [`GaitPhase::opposite`]. A duty cycle of at least one half keeps one foot on the ground at
/// all times (walking), anything shorter leaves flight phases where both limbs swing
/// (running).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaitPhase {
    /// Cycles per second
    pub cadence: f64,
    pub duty_cycle: f64,
    /// Fraction of a cycle
    pub phase_offset: f64,
}

impl Default for GaitPhase {
    fn default() -> Self {
        Self::walking(1.)
    }
}

pub const WALKING_DUTY_CYCLE: f64 = 0.6;
pub const RUNNING_DUTY_CYCLE: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaitSample {
    /// Position in the cycle, in `[0, 1)`
    pub phase: f64,
    pub stance: bool,
    /// Position within the current sub-phase, in `[0, 1]`
    pub progress: f64,
}

impl GaitPhase {
    pub const fn new(cadence: f64, duty_cycle: f64, phase_offset: f64) -> Self {
        Self {
            cadence,
            duty_cycle,
            phase_offset,
        }
    }

    pub const fn walking(cadence: f64) -> Self {
        Self::new(cadence, WALKING_DUTY_CYCLE, 0.)
    }

    pub const fn running(cadence: f64) -> Self {
        Self::new(cadence, RUNNING_DUTY_CYCLE, 0.)
    }

    /// The same cycle, half a period later.
    pub fn opposite(&self) -> Self {
        Self {
            phase_offset: self.phase_offset + 0.5,
            ..*self
        }
    }

    pub fn is_walking(&self) -> bool {
        self.duty_cycle >= 0.5
    }

    pub fn period(&self) -> Option<f64> {
        (self.cadence.abs() > f64::EPSILON).then(|| 1. / self.cadence.abs())
    }

    pub fn with_cadence(self, cadence: f64) -> Self {
        Self { cadence, ..self }
    }

    pub fn sample(&self, time: f64) -> GaitSample {
        let mut phase = (self.cadence * time + self.phase_offset).rem_euclid(1.);
        // rem_euclid rounds tiny negative inputs up to exactly 1
        if phase >= 1. {
            phase = 0.;
        }
        let duty = self.duty_cycle.clamp(0., 1.);

        if phase < duty {
            GaitSample {
                phase,
                stance: true,
                progress: phase / duty,
            }
        } else {
            GaitSample {
                phase,
                stance: false,
                progress: ((phase - duty) / (1. - duty)).clamp(0., 1.),
            }
        }
    }
}

impl GaitSample {
    /// 0 while planted, rising to 1 at mid-swing.
    pub fn swing_signal(&self) -> f64 {
        if self.stance {
            0.
        } else {
            (PI * self.progress).sin()
        }
    }

    /// Foot position along the direction of travel, relative to the hip.
    ///
    /// The planted foot slides linearly from `+1` (ahead) to `-1` (behind), then swings back
    /// along a cosine, so the signal is continuous over the whole cycle.
    pub fn stride_signal(&self) -> f64 {
        if self.stance {
            1. - 2. * self.progress
        } else {
            -(PI * self.progress).cos()
        }
    }
}
