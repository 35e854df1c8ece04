use thiserror::Error;

use super::{ConfigError, UnsupportedActionError};

/// Possible errors produced when loading RON descriptions
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LoadError {
    /// A [RON](ron) Error
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("description is inconsistent: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    UnsupportedAction(#[from] UnsupportedActionError),
}
