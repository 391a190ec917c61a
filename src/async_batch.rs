//! Async batch processing module
//!
//! This module provides concurrent decoding of many LCW files, such as the
//! contents of an extracted game archive.

#[cfg(feature = "async")]
/// Concurrent file decoding with a configurable concurrency limit
pub mod processor {
    use crate::{Decoder, DecompressionStats, Result};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent file decoder
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with one task per CPU
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
            }
        }

        /// Set the concurrency limit (at least 1)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Current concurrency limit
        pub fn concurrency(&self) -> usize {
            self.concurrency_limit
        }

        /// Decode multiple files concurrently
        ///
        /// Results are returned in the order of `files`. The first I/O
        /// error aborts the batch.
        pub async fn decompress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let results: Vec<(PathBuf, Vec<u8>, DecompressionStats)> =
                stream::iter(files.into_iter().map(|path| async move {
                    Self::decompress_single_file(path).await
                }))
                .buffered(self.concurrency_limit)
                .try_collect()
                .await?;

            Ok(results
                .into_iter()
                .map(|(path, data, _stats)| (path, data))
                .collect())
        }

        /// Stream per-file statistics as decoding completes
        pub fn decompress_files_streaming<P: AsRef<Path> + Send + Sync + 'static>(
            &self,
            files: Vec<P>,
        ) -> impl futures::Stream<Item = Result<(PathBuf, DecompressionStats)>> + '_ {
            stream::iter(files.into_iter().map(|path| async move {
                let (path_buf, _data, stats) = Self::decompress_single_file(path).await?;
                Ok((path_buf, stats))
            }))
            .buffer_unordered(self.concurrency_limit)
        }

        /// Decode a single file
        async fn decompress_single_file<P: AsRef<Path>>(
            path: P,
        ) -> Result<(PathBuf, Vec<u8>, DecompressionStats)> {
            let path = path.as_ref();
            let compressed = tokio::fs::read(path).await?;
            let (data, stats) = Decoder::new(&compressed).finish_with_stats();

            if stats.termination.is_truncated() {
                log::debug!(
                    "{}: stream truncated ({:?})",
                    path.display(),
                    stats.termination
                );
            }

            // Yield control between files for fairness
            tokio::task::yield_now().await;
            Ok((path.to_path_buf(), data, stats))
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
