//! LCW - Rust decoder for Westwood Studios LCW compression
//!
//! This crate decodes the LCW format (also known as "Format80") used for
//! sprites, tiles and other assets in Westwood Studios games. LCW is a
//! byte-oriented LZ77 variant with literal runs, value fills and two kinds
//! of back-reference: short copies address the output relative to its
//! current end, medium and long copies address it by absolute index.
//!
//! # Features
//!
//! - Single-pass decoder that never fails on malformed input
//! - Statistics describing how a stream was decoded and why it stopped
//! - Streaming `Read` adapter
//! - JASC-PAL, ACT and GIMP palette loading
//! - PNG export of decoded indexed images
//!
//! # Example
//!
//! ```
//! use lcw::decompress;
//!
//! // two literal bytes, a run of five 0x7F, end of stream
//! let compressed = [0x82, 0xAA, 0xBB, 0xFE, 0x05, 0x00, 0x7F, 0x80];
//! let decompressed = decompress(&compressed);
//! assert_eq!(decompressed, [0xAA, 0xBB, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F]);
//! ```
//!
//! # Example - PNG export
//!
//! ```no_run
//! use lcw::{decompress, IndexedImage, Palette};
//!
//! let compressed = std::fs::read("sprite.lcw")?;
//! let palette = Palette::load("temperat.pal")?;
//! let image = IndexedImage::from_decoded(decompress(&compressed), 64, 48)?;
//! image.save_png(&palette, "sprite.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decompress;
pub mod error;
pub mod indexed_image;
pub mod palette;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{
    DecompressionStats, LcwError, Result, Termination, MAX_LITERAL_LENGTH, MAX_SHORT_DISTANCE,
    MIN_COPY_LENGTH, OP_END, OP_FILL, OP_LONG_COPY,
};
pub use decompress::{Command, Decoder, LcwReader, OpcodeKind};
pub use indexed_image::IndexedImage;
pub use palette::{Palette, PaletteFormat};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Decompress LCW data
///
/// Never fails: truncated or corrupt input yields the output decoded up to
/// the point of damage.
///
/// # Arguments
/// * `data` - The compressed data
///
/// # Returns
/// A vector containing the decompressed data
pub fn decompress(data: &[u8]) -> Vec<u8> {
    decompress::decompress_bytes(data)
}

/// Decompress LCW data and collect statistics about the pass
pub fn decompress_with_stats(data: &[u8]) -> (Vec<u8>, DecompressionStats) {
    decompress::decompress_with_stats(data)
}
