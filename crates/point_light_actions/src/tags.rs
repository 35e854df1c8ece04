use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::profile::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    Light,
    Heavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
}

/// Semantic description of the performer. Every tag is optional; a missing tag is neutral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectTags {
    pub sex: Option<Sex>,
    pub weight: Option<Weight>,
    pub emotion: Option<Emotion>,
}

/// Multiplicative intensity factors derived from [`SubjectTags`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    /// Tempo of every time-varying drive
    pub cadence_scale: f64,
    pub amplitude_scale: f64,
    /// Divides the amplitude of secondary motion
    pub damping: f64,
    /// Scales pelvis sway on top of the amplitude
    pub sway_scale: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            cadence_scale: 1.,
            amplitude_scale: 1.,
            damping: 1.,
            sway_scale: 1.,
        }
    }
}

impl Modifiers {
    /// Amplitude factor for a drive playing the given role.
    pub fn amplitude_for(&self, role: Role) -> f64 {
        match role {
            Role::Primary => self.amplitude_scale,
            Role::Secondary => self.amplitude_scale / self.damping,
            Role::Sway => self.amplitude_scale * self.sway_scale,
            Role::Posture => 1.,
        }
    }
}

impl SubjectTags {
    pub fn new(sex: Option<Sex>, weight: Option<Weight>, emotion: Option<Emotion>) -> Self {
        Self {
            sex,
            weight,
            emotion,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::default();

        if let Some(Weight::Heavy) = self.weight {
            modifiers.cadence_scale *= 0.8;
            modifiers.amplitude_scale *= 0.7;
            modifiers.damping *= 1.25;
        }

        match self.emotion {
            Some(Emotion::Sad) => {
                modifiers.cadence_scale *= 0.75;
                modifiers.amplitude_scale *= 0.9;
            }
            Some(Emotion::Happy) => {
                modifiers.cadence_scale *= 1.1;
                modifiers.amplitude_scale *= 1.15;
            }
            None => {}
        }

        match self.sex {
            Some(Sex::Female) => modifiers.sway_scale *= 1.3,
            Some(Sex::Male) => modifiers.sway_scale *= 0.8,
            None => {}
        }

        modifiers
    }

    /// Every combination of weight and emotion, including the neutral `None`s.
    pub fn weight_emotion_grid() -> impl Iterator<Item = SubjectTags> {
        [None, Some(Weight::Light), Some(Weight::Heavy)]
            .into_iter()
            .flat_map(|weight| {
                [None, Some(Emotion::Happy), Some(Emotion::Sad)]
                    .into_iter()
                    .map(move |emotion| SubjectTags::new(None, weight, emotion))
            })
    }
}

impl Display for SubjectTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = [
            self.sex.map(|s| format!("{s:?}")),
            self.weight.map(|w| format!("{w:?}")),
            self.emotion.map(|e| format!("{e:?}")),
        ]
        .into_iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect();

        if parts.is_empty() {
            write!(f, "neutral")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_tags_change_nothing() {
        assert_eq!(SubjectTags::default().modifiers(), Modifiers::default());
        let light = SubjectTags::new(None, Some(Weight::Light), None);
        assert_eq!(light.modifiers(), Modifiers::default());
    }

    #[test]
    fn tags_compose_multiplicatively() {
        let tags = SubjectTags::new(Some(Sex::Female), Some(Weight::Heavy), Some(Emotion::Sad));
        let modifiers = tags.modifiers();
        assert!((modifiers.cadence_scale - 0.8 * 0.75).abs() < 1e-12);
        assert!((modifiers.amplitude_scale - 0.7 * 0.9).abs() < 1e-12);
        assert!((modifiers.damping - 1.25).abs() < 1e-12);
        assert!((modifiers.sway_scale - 1.3).abs() < 1e-12);

        let happy = SubjectTags::new(Some(Sex::Male), None, Some(Emotion::Happy)).modifiers();
        assert!((happy.cadence_scale - 1.1).abs() < 1e-12);
        assert!((happy.amplitude_scale - 1.15).abs() < 1e-12);
        assert!((happy.sway_scale - 0.8).abs() < 1e-12);
    }

    #[test]
    fn roles_pick_their_factors() {
        let modifiers = SubjectTags::new(Some(Sex::Female), Some(Weight::Heavy), None).modifiers();
        assert!((modifiers.amplitude_for(Role::Primary) - 0.7).abs() < 1e-12);
        assert!((modifiers.amplitude_for(Role::Secondary) - 0.56).abs() < 1e-12);
        assert!((modifiers.amplitude_for(Role::Sway) - 0.91).abs() < 1e-12);
        assert_eq!(modifiers.amplitude_for(Role::Posture), 1.);
    }

    #[test]
    fn deserializes_partial_tags() {
        let tags: SubjectTags = ron::from_str("(weight: Some(Heavy), emotion: Some(Sad))").unwrap();
        assert_eq!(tags, SubjectTags::new(None, Some(Weight::Heavy), Some(Emotion::Sad)));
        assert_eq!(ron::from_str::<SubjectTags>("()").unwrap(), SubjectTags::default());
    }

    #[test]
    fn grid_covers_every_combination() {
        assert_eq!(SubjectTags::weight_emotion_grid().count(), 9);
        assert_eq!(SubjectTags::default().to_string(), "neutral");
        assert_eq!(
            SubjectTags::new(None, Some(Weight::Heavy), Some(Emotion::Happy)).to_string(),
            "heavy, happy"
        );
    }
}
