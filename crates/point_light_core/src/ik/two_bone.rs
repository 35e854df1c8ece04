use bevy_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{errors::IkUnreachableError, symmetry::config::SymmetryMode};

/// Distances within this tolerance of the reach limits still count as reachable, so a limb
/// held exactly straight does not flicker in and out of the clamped state.
pub const REACH_TOLERANCE: f64 = 1e-9;

/// Root-to-target distances at or below this are treated as degenerate.
const DEGENERATE_DISTANCE: f64 = 1e-12;

/// Which of the two mirror-image solutions the middle joint takes.
///
/// `Forward` puts the middle joint on the `axis × hinge` side of the root→target axis,
/// `Backward` on the opposite side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bend {
    Forward,
    Backward,
}

impl Bend {
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.,
            Self::Backward => -1.,
        }
    }
}

/// Hinge axis of a limb's middle joint plus the side it bends towards.
///
/// For knees and elbows of an upright figure the hinge is the lateral (`X`) axis: knees bend
/// `Forward`, elbows `Backward`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimbHinge {
    pub axis: DVec3,
    pub bend: Bend,
}

impl LimbHinge {
    pub const fn new(axis: DVec3, bend: Bend) -> Self {
        Self { axis, bend }
    }

    /// The hinge of the opposite limb, so that mirrored targets produce mirrored solutions.
    pub fn mirrored(&self, mode: SymmetryMode) -> Self {
        Self {
            axis: mode.apply_axis(self.axis),
            bend: self.bend,
        }
    }

    /// Unit direction from the root→target axis towards the middle joint.
    pub fn bend_direction(&self, axis: DVec3) -> DVec3 {
        let side = axis.cross(self.axis);
        let side = if side.length_squared() > DEGENERATE_DISTANCE {
            side.normalize()
        } else {
            axis.any_orthonormal_vector()
        };
        side * self.bend.sign()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoBoneRequest {
    pub root: DVec3,
    pub target: DVec3,
    pub upper_len: f64,
    pub lower_len: f64,
    pub hinge: LimbHinge,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IkSolution {
    Solved { mid: DVec3 },
    Unreachable {
        distance: f64,
        min_reach: f64,
        max_reach: f64,
    },
}

impl IkSolution {
    pub fn mid(&self) -> Option<DVec3> {
        match self {
            Self::Solved { mid } => Some(*mid),
            Self::Unreachable { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<DVec3, IkUnreachableError> {
        match self {
            Self::Solved { mid } => Ok(mid),
            Self::Unreachable {
                distance,
                min_reach,
                max_reach,
            } => Err(IkUnreachableError {
                distance,
                min_reach,
                max_reach,
            }),
        }
    }
}

/// Outcome of [`TwoBoneRequest::solve_clamped`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampedSolve {
    pub mid: DVec3,
    /// The end effector position actually reached
    pub end: DVec3,
    pub clamped: bool,
}

impl TwoBoneRequest {
    /// Inner and outer radius of the annulus the end effector can reach.
    pub fn reach(&self) -> (f64, f64) {
        (
            (self.upper_len - self.lower_len).abs(),
            self.upper_len + self.lower_len,
        )
    }

    /// Places the middle joint with the law of cosines.
    pub fn solve(&self) -> IkSolution {
        let offset = self.target - self.root;
        let distance = offset.length();
        let (min_reach, max_reach) = self.reach();

        if !distance.is_finite()
            || distance > max_reach + REACH_TOLERANCE
            || distance < min_reach - REACH_TOLERANCE
        {
            return IkSolution::Unreachable {
                distance,
                min_reach,
                max_reach,
            };
        }

        if distance <= DEGENERATE_DISTANCE {
            // Equal segments folded onto the root; the middle joint bends off the hanging axis
            return IkSolution::Solved {
                mid: self.root + self.hinge.bend_direction(DVec3::NEG_Y) * self.upper_len,
            };
        }

        let axis = offset / distance;
        let upper_sq = self.upper_len * self.upper_len;
        let along = (upper_sq - self.lower_len * self.lower_len + distance * distance)
            / (2. * distance);
        let height = (upper_sq - along * along).max(0.).sqrt();

        IkSolution::Solved {
            mid: self.root + axis * along + self.hinge.bend_direction(axis) * height,
        }
    }

    /// The target moved onto the nearest point of the reachable annulus. Reachable targets
    /// are returned unchanged.
    pub fn clamped_target(&self) -> DVec3 {
        clamp_target(self.root, self.target, self.upper_len, self.lower_len)
    }

    /// Solves, clamping the target onto the limb's reach first if needed.
    pub fn solve_clamped(&self) -> ClampedSolve {
        if let IkSolution::Solved { mid } = self.solve() {
            return ClampedSolve {
                mid,
                end: self.target,
                clamped: false,
            };
        }

        let end = self.clamped_target();
        let retry = TwoBoneRequest { target: end, ..*self };
        let mid = match retry.solve() {
            IkSolution::Solved { mid } => mid,
            // Only a non-finite target ends up here
            IkSolution::Unreachable { .. } => {
                self.root + (end - self.root).normalize_or_zero() * self.upper_len
            }
        };

        ClampedSolve {
            mid,
            end,
            clamped: true,
        }
    }
}

pub fn solve(request: &TwoBoneRequest) -> IkSolution {
    request.solve()
}

/// `root + (target − root) · clamp(d, |upper − lower|, upper + lower) / d`.
///
/// A target on the root is only reachable by a limb with equal segments. Otherwise it, like a
/// non-finite offset, falls back to pointing the limb straight down.
pub fn clamp_target(root: DVec3, target: DVec3, upper_len: f64, lower_len: f64) -> DVec3 {
    let min_reach = (upper_len - lower_len).abs();
    let max_reach = upper_len + lower_len;
    let offset = target - root;
    let distance = offset.length();

    if distance.is_finite()
        && distance <= max_reach + REACH_TOLERANCE
        && distance >= min_reach - REACH_TOLERANCE
    {
        return target;
    }

    let (direction, clamped) = if distance.is_finite() && distance > DEGENERATE_DISTANCE {
        (offset / distance, distance.clamp(min_reach, max_reach))
    } else {
        (DVec3::NEG_Y, min_reach)
    };

    root + direction * clamped
}
