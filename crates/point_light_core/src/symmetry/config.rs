use std::hash::Hash;

use bevy_math::DVec3;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::symmetry::serial::{PatternMapperSerial, SymmetryConfigSerial};

/// How left/right counterparts are found and how positions are reflected between them.
#[derive(Debug, Default, Clone)]
pub struct SymmetryConfig {
    pub name_mapper: FlipNameMapper,
    pub mode: SymmetryMode,
}

#[derive(Debug, Clone)]
pub struct PatternMapper {
    pub key_1: String,
    pub key_2: String,
    pub pattern_before: String,
    pub pattern_after: String,
    pub regex: Regex,
}

impl Hash for PatternMapper {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key_1.hash(state);
        self.key_2.hash(state);
        self.pattern_before.hash(state);
        self.pattern_after.hash(state);
    }
}

impl Default for PatternMapper {
    fn default() -> Self {
        // The default `L`/`R` suffix pattern always compiles
        PatternMapperSerial::default().to_value().unwrap()
    }
}

impl Serialize for SymmetryConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SymmetryConfigSerial::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymmetryConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        SymmetryConfigSerial::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

impl PatternMapper {
    pub fn flip(&self, input: &str) -> Option<String> {
        let captures = self.regex.captures(input)?;
        let key_capture = captures.get(2)?.as_str();
        let replacement_key = if key_capture == self.key_1 {
            &self.key_2
        } else {
            &self.key_1
        };
        Some(
            self.regex
                .replace(input, format!("${{1}}{replacement_key}${{3}}"))
                .into(),
        )
    }

    /// Splits a sided name into its side key and the rest of the name, trimmed of separators.
    pub fn split_side<'a>(&self, input: &'a str) -> Option<(&'a str, String)> {
        let key = self.regex.captures(input)?.get(2)?;
        let stem = format!("{}{}", &input[..key.start()], &input[key.end()..]);
        let stem = stem.trim_matches(|c: char| !c.is_alphanumeric());
        Some((key.as_str(), stem.to_string()))
    }
}

#[derive(Debug, Clone)]
pub enum FlipNameMapper {
    Pattern(PatternMapper),
}

impl Default for FlipNameMapper {
    fn default() -> Self {
        Self::Pattern(PatternMapper::default())
    }
}

impl FlipNameMapper {
    /// Name of the mirrored counterpart, or None if `input` carries no side marker.
    pub fn flip(&self, input: &str) -> Option<String> {
        match self {
            Self::Pattern(pattern) => pattern.flip(input),
        }
    }

    /// Side key and side-neutral stem of `input`, e.g. `("L", "knee")` for `knee_L`.
    pub fn split_side<'a>(&self, input: &'a str) -> Option<(&'a str, String)> {
        match self {
            Self::Pattern(pattern) => pattern.split_side(input),
        }
    }

    /// The key marking the figure's left side (`key_1`).
    pub fn left_key(&self) -> &str {
        match self {
            Self::Pattern(pattern) => &pattern.key_1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetryMode {
    /// Mirror about the plane perpendicular to the X axis.
    #[default]
    MirrorX,
}

impl SymmetryMode {
    pub fn apply_position(&self, mut input: DVec3) -> DVec3 {
        match self {
            Self::MirrorX => input.x *= -1.,
        }
        input
    }

    /// Mirrors a direction that behaves like a rotation axis (a pseudovector).
    pub fn apply_axis(&self, input: DVec3) -> DVec3 {
        -self.apply_position(input)
    }
}
