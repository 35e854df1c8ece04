use point_light_core::errors::{ConfigError, UnsupportedActionError};
use thiserror::Error;

/// Possible errors produced when building a pose function
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    #[error("skeleton cannot perform actions: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedActionError),
}
