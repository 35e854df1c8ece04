use thiserror::Error;

/// Possible errors produced while writing or reading clip exports
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write RON: {0}")]
    Ron(#[from] ron::Error),
    #[error("could not parse RON: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),
    #[error("could not encode MessagePack: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
    #[error("could not decode MessagePack: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
    #[error("export declares {declared} frames but contains {actual}")]
    FrameCountMismatch { declared: usize, actual: usize },
}
