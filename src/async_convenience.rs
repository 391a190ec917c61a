//! Async convenience functions
//!
//! This module provides easy-to-use async functions for decoding LCW data
//! from async readers and files.

#[cfg(feature = "async")]
/// Async decode helpers for readers and files
pub mod functions {
    use crate::{Decoder, DecompressionStats, Result};
    use std::path::Path;
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Decompress data from an async reader
    ///
    /// The reader is drained completely before decoding starts.
    pub async fn decompress_async<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<u8>> {
        let (output, _stats) = decompress_async_with_stats(reader).await?;
        Ok(output)
    }

    /// Decompress data from an async reader and collect statistics
    pub async fn decompress_async_with_stats<R: AsyncRead + Unpin>(
        mut reader: R,
    ) -> Result<(Vec<u8>, DecompressionStats)> {
        let mut compressed = Vec::new();
        reader.read_to_end(&mut compressed).await?;
        Ok(Decoder::new(&compressed).finish_with_stats())
    }

    /// Decompress a file asynchronously
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
    ) -> Result<DecompressionStats> {
        let compressed = tokio::fs::read(input_path.as_ref()).await?;
        let (decompressed, stats) = Decoder::new(&compressed).finish_with_stats();
        tokio::fs::write(output_path.as_ref(), &decompressed).await?;

        log::debug!(
            "Decompressed {} -> {} ({} -> {} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display(),
            stats.input_bytes,
            stats.output_bytes
        );
        Ok(stats)
    }
}

#[cfg(feature = "async")]
pub use functions::*;
