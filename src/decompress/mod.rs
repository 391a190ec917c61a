//! LCW decompression
//!
//! This module decodes the byte-oriented LCW command stream used by
//! Westwood Studios titles. Decoding is a single forward pass that never
//! fails: malformed input yields whatever output was produced before the
//! damage, with dangling copies filled by zero bytes.

mod cursor;
mod decoder;
mod opcode;
mod reader;

pub use cursor::StreamCursor;
pub use decoder::Decoder;
pub use opcode::{Command, OpcodeKind};
pub use reader::LcwReader;

use crate::DecompressionStats;

/// Convenience function to decompress data in memory
pub fn decompress_bytes(data: &[u8]) -> Vec<u8> {
    Decoder::new(data).finish()
}

/// Decompress data in memory and report how the stream was decoded
pub fn decompress_with_stats(data: &[u8]) -> (Vec<u8>, DecompressionStats) {
    let (output, stats) = Decoder::new(data).finish_with_stats();
    log::debug!(
        "Decoded {} commands: {} -> {} bytes ({:?})",
        stats.commands,
        stats.input_bytes,
        stats.output_bytes,
        stats.termination
    );
    (output, stats)
}
