use thiserror::Error;

/// Errors raised while building a score or rendering and writing a track.
///
/// Silent buffers are not an error: normalization of an all-zero buffer is
/// a no-op.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A progression entry (or one half of the chord tables) names a chord
    /// that has no partials or no bass root.
    #[error("unknown chord '{name}'")]
    UnknownChord { name: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Layers handed to the mixer must all share one length.
    #[error("layer '{layer}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("could not resolve a desktop or home directory")]
    NoOutputDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, SynthError>;
