use std::{fmt::Display, str::FromStr};

use point_light_core::errors::UnsupportedActionError;

/// The closed catalog of actions a figure can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Walking,
    Running,
    JumpingUp,
    JumpingForward,
    Waving,
    Bowing,
    SittingDown,
    LyingDown,
    TurningAround,
    ForwardRolling,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Walking,
        Action::Running,
        Action::JumpingUp,
        Action::JumpingForward,
        Action::Waving,
        Action::Bowing,
        Action::SittingDown,
        Action::LyingDown,
        Action::TurningAround,
        Action::ForwardRolling,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Running => "running",
            Self::JumpingUp => "jumping-up",
            Self::JumpingForward => "jumping-forward",
            Self::Waving => "waving",
            Self::Bowing => "bowing",
            Self::SittingDown => "sitting-down",
            Self::LyingDown => "lying-down",
            Self::TurningAround => "turning-around",
            Self::ForwardRolling => "forward-rolling",
        }
    }

    /// Locomotion driven by a stance/swing cycle, with the two sides half a cycle apart.
    pub fn is_gait(&self) -> bool {
        matches!(self, Self::Walking | Self::Running)
    }

    /// Actions that repeat with a fixed period.
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Self::Walking | Self::Running | Self::Waving | Self::Bowing
        )
    }

    /// Actions whose left and right sides do the same thing, either at the same time or, for
    /// gaits, half a cycle apart.
    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Self::Waving | Self::TurningAround)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = UnsupportedActionError;

    /// Case-insensitive, accepting `_` and spaces in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|action| action.name() == normalized)
            .ok_or_else(|| UnsupportedActionError(s.to_string()))
    }
}
