//! Error types

use crate::sid::StringId;

/// Kind of data a channel stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Rotation, translation and scale per frame
    Joint,
    /// One scalar per frame
    Float,
}

impl core::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelKind::Joint => write!(f, "joint"),
            ChannelKind::Float => write!(f, "float"),
        }
    }
}

/// Errors building or parsing a compressed channel record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelFormatError {
    #[error("channel must have at least one sample")]
    NoSamples,

    #[error("channel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("channel data size {actual} does not match layout size {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("channel flags {0:#06x} contain unknown bits")]
    UnknownFlags(u16),

    #[error("channel {0} already present in table")]
    DuplicateChannel(StringId),
}

/// Recoverable failures while evaluating a channel.
///
/// Callers treat every variant as "no data" and fall back to an identity
/// transform (or zero for scalar channels).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("channel {channel} not found in anim '{anim}'")]
    ChannelNotFound { anim: String, channel: StringId },

    #[error("channel {channel} in anim '{anim}' is a {actual} channel, expected {expected}")]
    KindMismatch {
        anim: String,
        channel: StringId,
        expected: ChannelKind,
        actual: ChannelKind,
    },

    #[error("evaluation phase {0} outside [0, 1]")]
    InvalidPhase(f32),

    #[error("channel {channel} has {available} samples but sample {requested} was requested")]
    SampleOutOfRange {
        channel: StringId,
        available: u16,
        requested: u16,
    },
}
