//! RON-facing proxies for [`SymmetryConfig`]. The compiled regex is rebuilt on load.

use regex::{Regex, escape};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    symmetry::config::{FlipNameMapper, PatternMapper, SymmetryConfig, SymmetryMode},
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SymmetryConfigSerial {
    pub name_mapper: FlipNameMapperSerial,
    #[serde(default)]
    pub mode: SymmetryMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FlipNameMapperSerial {
    Pattern(PatternMapperSerial),
}

impl Default for FlipNameMapperSerial {
    fn default() -> Self {
        Self::Pattern(PatternMapperSerial::default())
    }
}

/// Matches `<pattern_before><key_1|key_2><pattern_after>` and swaps the key.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, PartialEq, Eq)]
pub struct PatternMapperSerial {
    pub key_1: String,
    pub key_2: String,
    pub pattern_before: String,
    pub pattern_after: String,
}

impl Default for PatternMapperSerial {
    fn default() -> Self {
        Self {
            key_1: "L".into(),
            key_2: "R".into(),
            pattern_before: r"^.*".into(),
            pattern_after: r"$".into(),
        }
    }
}

impl PatternMapperSerial {
    pub fn to_value(&self) -> Result<PatternMapper, ConfigError> {
        if self.key_1.is_empty() || self.key_1 == self.key_2 {
            return Err(ConfigError::InvalidPattern(format!(
                "side keys {:?} and {:?} must be distinct and non-empty",
                self.key_1, self.key_2
            )));
        }

        let source = format!(
            "({})({}|{})({})",
            self.pattern_before,
            escape(&self.key_1),
            escape(&self.key_2),
            self.pattern_after,
        );

        Ok(PatternMapper {
            key_1: self.key_1.clone(),
            key_2: self.key_2.clone(),
            pattern_before: self.pattern_before.clone(),
            pattern_after: self.pattern_after.clone(),
            regex: Regex::new(&source)?,
        })
    }
}

impl From<&PatternMapper> for PatternMapperSerial {
    fn from(value: &PatternMapper) -> Self {
        Self {
            key_1: value.key_1.clone(),
            key_2: value.key_2.clone(),
            pattern_before: value.pattern_before.clone(),
            pattern_after: value.pattern_after.clone(),
        }
    }
}

impl TryFrom<SymmetryConfigSerial> for SymmetryConfig {
    type Error = ConfigError;

    fn try_from(value: SymmetryConfigSerial) -> Result<Self, Self::Error> {
        let FlipNameMapperSerial::Pattern(pattern) = value.name_mapper;
        Ok(Self {
            name_mapper: FlipNameMapper::Pattern(pattern.to_value()?),
            mode: value.mode,
        })
    }
}

impl From<&SymmetryConfig> for SymmetryConfigSerial {
    fn from(value: &SymmetryConfig) -> Self {
        let FlipNameMapper::Pattern(pattern) = &value.name_mapper;
        Self {
            name_mapper: FlipNameMapperSerial::Pattern(pattern.into()),
            mode: value.mode,
        }
    }
}
