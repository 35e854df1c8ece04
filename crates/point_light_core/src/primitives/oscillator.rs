use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::SampleAt;

/// `amplitude · sin(2π · frequency · t + phase)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub amplitude: f64,
    /// Cycles per second
    pub frequency: f64,
    /// Radians
    pub phase: f64,
}

impl Oscillator {
    pub const fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    pub fn sample(&self, time: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * time + self.phase).sin()
    }

    /// `None` for a zero frequency, which never repeats meaningfully.
    pub fn period(&self) -> Option<f64> {
        (self.frequency.abs() > f64::EPSILON).then(|| 1. / self.frequency.abs())
    }

    /// Scales the amplitude and the tempo. The phase is kept.
    pub fn scaled(self, amplitude_scale: f64, tempo_scale: f64) -> Self {
        Self {
            amplitude: self.amplitude * amplitude_scale,
            frequency: self.frequency * tempo_scale,
            phase: self.phase,
        }
    }

    /// Shifts the signal by a fraction of a cycle.
    pub fn shifted(self, cycles: f64) -> Self {
        Self {
            phase: self.phase + TAU * cycles,
            ..self
        }
    }
}

impl SampleAt for Oscillator {
    fn sample_at(&self, time: f64) -> f64 {
        self.sample(time)
    }
}
