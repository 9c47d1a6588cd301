//! Codec error types.

use thiserror::Error;

/// Errors from the archive codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The 16-bit colour format stores a single transparency bit, so only
    /// alpha 0x00 and 0xFF survive a round trip; anything in between is
    /// refused rather than silently clamped.
    #[error(
        "colour with alpha 0x{alpha:02x} is not representable; \
         16-bit colours are fully opaque or fully transparent"
    )]
    PartialAlpha {
        /// The unrepresentable alpha value.
        alpha: u8,
    },

    /// Input data has the wrong shape for a fixed-size wire value.
    #[error("{context}: {detail}")]
    InvalidFormat {
        /// What was being decoded.
        context: &'static str,
        /// Description of the mismatch.
        detail: String,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
