//! LcwReader - Read adapter over a compressed source
//!
//! LCW copies address the whole output buffer by absolute index, so the
//! reader buffers the complete compressed input on first use, decodes it
//! in one pass and then serves the result.

use super::decoder::Decoder;
use crate::DecompressionStats;
use std::io::Read;

/// Decompressing reader implementing the Read trait
#[derive(Debug)]
pub struct LcwReader<R: Read> {
    reader: R,
    decoded: bool,
    output_buffer: Vec<u8>,
    output_pos: usize,
    stats: Option<DecompressionStats>,
}

impl<R: Read> LcwReader<R> {
    /// Create a new LcwReader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoded: false,
            output_buffer: Vec::new(),
            output_pos: 0,
            stats: None,
        }
    }

    /// Statistics of the decode pass, available after the first read
    pub fn stats(&self) -> Option<&DecompressionStats> {
        self.stats.as_ref()
    }

    /// Consume the reader and return the wrapped source
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn decode(&mut self) -> std::io::Result<()> {
        let mut compressed = Vec::new();
        self.reader.read_to_end(&mut compressed)?;

        let (output, stats) = Decoder::new(&compressed).finish_with_stats();
        self.output_buffer = output;
        self.output_pos = 0;
        self.stats = Some(stats);
        self.decoded = true;
        Ok(())
    }
}

impl<R: Read> Read for LcwReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if !self.decoded {
            self.decode()?;
        }

        let available = self.output_buffer.len() - self.output_pos;
        let to_copy = buf.len().min(available);
        buf[..to_copy]
            .copy_from_slice(&self.output_buffer[self.output_pos..self.output_pos + to_copy]);
        self.output_pos += to_copy;
        Ok(to_copy)
    }
}
