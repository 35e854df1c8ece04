use serde::{Deserialize, Serialize};

use super::SampleAt;

/// Smoothstep transition from 0 to 1 over `[start, start + duration]`, held flat outside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ease {
    pub start: f64,
    pub duration: f64,
}

impl Ease {
    pub const fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration.max(0.)
    }

    pub fn sample(&self, time: f64) -> f64 {
        if self.duration <= 0. {
            return if time >= self.start { 1. } else { 0. };
        }
        let x = ((time - self.start) / self.duration).clamp(0., 1.);
        x * x * (3. - 2. * x)
    }

    /// Same transition on a stretched or compressed clock.
    pub fn scaled(self, tempo_scale: f64) -> Self {
        if tempo_scale <= 0. {
            return self;
        }
        Self {
            start: self.start / tempo_scale,
            duration: self.duration / tempo_scale,
        }
    }
}

impl SampleAt for Ease {
    fn sample_at(&self, time: f64) -> f64 {
        self.sample(time)
    }
}
