use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpPhase {
    Crouch,
    Flight,
    Landing,
    Landed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpSample {
    pub phase: JumpPhase,
    /// Height of the body above its standing height
    pub height: f64,
    /// Horizontal distance travelled since take-off
    pub forward: f64,
    /// How far the body is lowered while preparing or absorbing
    pub crouch: f64,
}

impl JumpSample {
    fn at_rest(phase: JumpPhase, forward: f64) -> Self {
        Self {
            phase,
            height: 0.,
            forward,
            crouch: 0.,
        }
    }
}

/// A single jump: a preparatory crouch, a parabolic flight and a mirrored landing.
///
/// The crouch and the landing each take `crouch_fraction` of `duration`, the flight takes the
/// rest. The apex is therefore reached at exactly half the duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpArc {
    pub duration: f64,
    pub apex_height: f64,
    pub horizontal_speed: f64,
    pub crouch_fraction: f64,
    pub crouch_depth: f64,
}

impl Default for JumpArc {
    fn default() -> Self {
        Self::new(2., 0.5, 0.)
    }
}

/// `elapsed / span` clamped to `[0, 1]`, treating an empty span as already finished.
fn fraction(elapsed: f64, span: f64) -> f64 {
    if span > 0. {
        (elapsed / span).clamp(0., 1.)
    } else {
        1.
    }
}

impl JumpArc {
    pub const DEFAULT_CROUCH_FRACTION: f64 = 0.3;
    pub const DEFAULT_CROUCH_DEPTH: f64 = 0.15;

    pub const fn new(duration: f64, apex_height: f64, horizontal_speed: f64) -> Self {
        Self {
            duration,
            apex_height,
            horizontal_speed,
            crouch_fraction: Self::DEFAULT_CROUCH_FRACTION,
            crouch_depth: Self::DEFAULT_CROUCH_DEPTH,
        }
    }

    /// Jumping forward rather than straight up.
    pub fn is_forward(&self) -> bool {
        self.horizontal_speed > 0.
    }

    /// Take-off and touch-down times.
    pub fn flight_window(&self) -> (f64, f64) {
        let crouch = self.crouch_fraction.clamp(0., 0.5) * self.duration.max(0.);
        (crouch, self.duration.max(0.) - crouch)
    }

    pub fn apex_time(&self) -> f64 {
        self.duration.max(0.) / 2.
    }

    /// Total horizontal distance covered by the jump.
    pub fn distance(&self) -> f64 {
        let (take_off, touch_down) = self.flight_window();
        self.horizontal_speed * (touch_down - take_off)
    }

    pub fn sample(&self, time: f64) -> JumpSample {
        let duration = self.duration.max(0.);
        let (take_off, touch_down) = self.flight_window();

        if time < 0. {
            return JumpSample::at_rest(JumpPhase::Crouch, 0.);
        }

        if time < take_off {
            let u = fraction(time, take_off);
            return JumpSample {
                phase: JumpPhase::Crouch,
                height: 0.,
                forward: 0.,
                crouch: self.crouch_depth * (PI * u).sin(),
            };
        }

        if time < touch_down {
            let elapsed = time - take_off;
            let t = fraction(elapsed, touch_down - take_off);
            return JumpSample {
                phase: JumpPhase::Flight,
                height: 4. * self.apex_height * t * (1. - t),
                forward: self.horizontal_speed * elapsed,
                crouch: 0.,
            };
        }

        if time <= duration {
            let u = fraction(time - touch_down, duration - touch_down);
            return JumpSample {
                phase: JumpPhase::Landing,
                height: 0.,
                forward: self.distance(),
                crouch: self.crouch_depth * (PI * u).sin(),
            };
        }

        JumpSample::at_rest(JumpPhase::Landed, self.distance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_boundaries() {
        let arc = JumpArc::new(2., 0.5, 0.);
        let (take_off, touch_down) = arc.flight_window();
        assert!((take_off - 0.6).abs() < 1e-12);
        assert!((touch_down - 1.4).abs() < 1e-12);
        assert_eq!(arc.sample(-0.1).phase, JumpPhase::Crouch);
        assert_eq!(arc.sample(-0.1).crouch, 0.);
        assert_eq!(arc.sample(0.3).phase, JumpPhase::Crouch);
        assert!((arc.sample(0.3).crouch - 0.15).abs() < 1e-12);
        assert_eq!(arc.sample(0.65).phase, JumpPhase::Flight);
        assert_eq!(arc.sample(1.45).phase, JumpPhase::Landing);
        assert_eq!(arc.sample(2.).phase, JumpPhase::Landing);
        assert_eq!(arc.sample(2.5).phase, JumpPhase::Landed);
    }

    #[test]
    fn apex_at_midpoint() {
        let arc = JumpArc::new(2., 0.5, 0.);
        let apex = arc.sample(arc.apex_time());
        assert_eq!(apex.phase, JumpPhase::Flight);
        assert!((apex.height - 0.5).abs() < 1e-12);
        for i in 0..=200 {
            assert!(arc.sample(i as f64 * 0.01).height <= apex.height + 1e-12);
        }
    }

    #[test]
    fn forward_jump_travels() {
        let up = JumpArc::new(1.5, 0.3, 0.);
        let forward = JumpArc::new(1.5, 0.3, 1.2);
        assert!(!up.is_forward());
        assert!(forward.is_forward());
        assert_eq!(up.sample(10.).forward, 0.);

        let landed = forward.sample(10.);
        assert_eq!(landed.phase, JumpPhase::Landed);
        assert!((landed.forward - 1.2 * 0.6).abs() < 1e-12);
        assert!(forward.sample(0.7).forward > 0.);
    }

    #[test]
    fn degenerate_arcs_stay_finite() {
        let no_crouch = JumpArc {
            crouch_fraction: 0.,
            ..JumpArc::new(1., 0.4, 0.)
        };
        let all_crouch = JumpArc {
            crouch_fraction: 0.5,
            ..JumpArc::new(1., 0.4, 0.)
        };
        let empty = JumpArc::new(0., 0.4, 1.);
        for arc in [no_crouch, all_crouch, empty] {
            for t in [-1., 0., 0.25, 0.5, 0.75, 1., 3.] {
                let sample = arc.sample(t);
                assert!(sample.height.is_finite());
                assert!(sample.forward.is_finite());
                assert!(sample.crouch.is_finite());
            }
        }
    }
}
