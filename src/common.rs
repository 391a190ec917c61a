//! Common types and constants for the LCW format
//!
//! This module defines the opcode constants, decoding statistics and the
//! error type shared by the decoder and the palette/image adapters.

use crate::decompress::OpcodeKind;
use thiserror::Error;

/// Error type for LCW operations
///
/// Decoding itself never fails. These variants come from the adapters
/// around the decoder (palette loading, image export, file I/O).
#[derive(Debug, Error)]
pub enum LcwError {
    /// Palette file extension is not one of `.pal`, `.act` or `.gpl`
    #[error("Unsupported palette format: {0}")]
    UnsupportedPaletteFormat(String),

    /// Palette file contents could not be parsed
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// Image dimensions are zero or too large to address
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] ::image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LCW operations
pub type Result<T> = std::result::Result<T, LcwError>;

// LCW opcode constants

/// End of stream marker
pub const OP_END: u8 = 0x80;

/// Long run: 16-bit count followed by a fill byte
pub const OP_FILL: u8 = 0xFE;

/// Long copy: 16-bit count followed by a 16-bit absolute offset
pub const OP_LONG_COPY: u8 = 0xFF;

/// Added to the encoded count of short and medium copies
pub const MIN_COPY_LENGTH: usize = 3;

/// Largest count a single literal opcode can carry
pub const MAX_LITERAL_LENGTH: usize = 0x3F;

/// Largest distance a short copy can encode (12 bits)
pub const MAX_SHORT_DISTANCE: usize = 0x0FFF;

/// Reason a decode pass stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// An explicit `0x80` terminator was read at `position`
    EndMarker {
        /// Input offset of the terminator byte
        position: usize,
    },
    /// The input ran out on a command boundary
    #[default]
    Exhausted,
    /// The input ran out inside the command whose opcode sits at `position`
    Truncated {
        /// Kind of the interrupted command
        kind: OpcodeKind,
        /// Input offset of the opcode byte
        position: usize,
    },
}

impl Termination {
    /// Whether decoding ended on an explicit terminator
    pub fn is_end_marker(&self) -> bool {
        matches!(self, Termination::EndMarker { .. })
    }

    /// Whether the stream was cut inside a command
    pub fn is_truncated(&self) -> bool {
        matches!(self, Termination::Truncated { .. })
    }
}

/// Statistics for a decompression pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecompressionStats {
    /// Number of commands executed, including the terminator
    pub commands: usize,
    /// Bytes copied verbatim from the input
    pub literal_bytes: usize,
    /// Bytes produced by long runs
    pub fill_bytes: usize,
    /// Bytes copied from earlier output
    pub copy_bytes: usize,
    /// Bytes substituted with zero (dangling copies, short literals)
    pub zero_filled_bytes: usize,
    /// Short copies whose distance reached before the start of the output
    pub clamped_copies: usize,
    /// Input bytes consumed
    pub input_bytes: usize,
    /// Output bytes produced
    pub output_bytes: usize,
    /// Why decoding stopped
    pub termination: Termination,
}

impl DecompressionStats {
    /// Input size as a percentage of output size
    pub fn ratio(&self) -> f64 {
        if self.output_bytes == 0 {
            return 0.0;
        }
        (self.input_bytes as f64 / self.output_bytes as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(OP_END, 0x80);
        assert_eq!(OP_FILL, 0xFE);
        assert_eq!(OP_LONG_COPY, 0xFF);
        assert_eq!(MIN_COPY_LENGTH, 3);
        assert_eq!(MAX_LITERAL_LENGTH, 63);
        assert_eq!(MAX_SHORT_DISTANCE, 4095);
    }

    #[test]
    fn test_termination_predicates() {
        assert!(Termination::EndMarker { position: 0 }.is_end_marker());
        assert!(!Termination::Exhausted.is_end_marker());
        assert!(!Termination::Exhausted.is_truncated());

        let cut = Termination::Truncated {
            kind: OpcodeKind::Fill,
            position: 4,
        };
        assert!(cut.is_truncated());
        assert_eq!(Termination::default(), Termination::Exhausted);
    }

    #[test]
    fn test_ratio() {
        let stats = DecompressionStats {
            input_bytes: 25,
            output_bytes: 100,
            ..Default::default()
        };
        assert_eq!(stats.ratio(), 25.0);
        assert_eq!(DecompressionStats::default().ratio(), 0.0);
    }
}
