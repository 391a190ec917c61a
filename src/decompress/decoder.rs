//! LCW command interpreter
//!
//! This module implements the single-pass decoding loop. Every malformed
//! construct degrades instead of failing: truncated operands stop the loop,
//! dangling copy sources produce zero bytes, and short copies reaching
//! before the start of the output are clamped to index 0.

use super::cursor::StreamCursor;
use super::opcode::{Command, OpcodeKind};
use crate::common::{DecompressionStats, Termination};

/// Stateful LCW decoder over a borrowed input buffer
///
/// The decoder owns the growing output buffer and hands it to the caller
/// through [`Decoder::finish`].
#[derive(Debug)]
pub struct Decoder<'a> {
    cursor: StreamCursor<'a>,
    output: Vec<u8>,
    stats: DecompressionStats,
    finished: bool,
}

impl<'a> Decoder<'a> {
    /// Create a decoder for `input`
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_capacity(input, 0)
    }

    /// Create a decoder that reserves `capacity` output bytes up front
    ///
    /// The hint only affects allocation; output may grow past it.
    pub fn with_capacity(input: &'a [u8], capacity: usize) -> Self {
        Self {
            cursor: StreamCursor::new(input),
            output: Vec::with_capacity(capacity),
            stats: DecompressionStats::default(),
            finished: false,
        }
    }

    /// Output decoded so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Whether decoding has stopped
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current input offset
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Decode and execute one command
    ///
    /// Returns the executed command, or `None` once decoding has stopped.
    /// A literal that runs out of input is still executed and returned;
    /// the decoder is finished afterwards.
    pub fn step(&mut self) -> Option<Command> {
        if self.finished {
            return None;
        }

        let position = self.cursor.position();
        let Some(opcode) = self.cursor.read_u8() else {
            self.stop(Termination::Exhausted);
            return None;
        };

        let Some(command) = Command::read(opcode, &mut self.cursor) else {
            self.stop(Termination::Truncated {
                kind: OpcodeKind::classify(opcode),
                position,
            });
            return None;
        };

        log::trace!("{position:#06x}: {command:?}");
        self.stats.commands += 1;
        self.execute(command, position);
        Some(command)
    }

    /// Run to completion and return the output
    pub fn finish(self) -> Vec<u8> {
        self.finish_with_stats().0
    }

    /// Run to completion and return the output with statistics
    pub fn finish_with_stats(mut self) -> (Vec<u8>, DecompressionStats) {
        while self.step().is_some() {}

        self.stats.input_bytes = self.cursor.position();
        self.stats.output_bytes = self.output.len();
        (self.output, self.stats)
    }

    fn execute(&mut self, command: Command, position: usize) {
        match command {
            Command::ShortCopy { count, distance } => self.copy_relative(count, distance),
            Command::End => self.stop(Termination::EndMarker { position }),
            Command::Literal { count } => {
                let bytes = self.cursor.take(count);
                self.output.extend_from_slice(bytes);
                self.stats.literal_bytes += bytes.len();

                let missing = count - bytes.len();
                if missing > 0 {
                    self.zero_fill(missing);
                    self.stop(Termination::Truncated {
                        kind: OpcodeKind::Literal,
                        position,
                    });
                }
            }
            Command::Fill { count, value } => {
                self.output.resize(self.output.len() + count, value);
                self.stats.fill_bytes += count;
            }
            Command::LongCopy { count, offset } | Command::MediumCopy { count, offset } => {
                self.copy_absolute(count, offset)
            }
        }
    }

    /// Copy from `distance` bytes before the current end of the output
    fn copy_relative(&mut self, count: usize, distance: usize) {
        let len = self.output.len();
        let start = match len.checked_sub(distance) {
            Some(start) => start,
            None => {
                self.stats.clamped_copies += 1;
                0
            }
        };
        self.copy_absolute(count, start);
    }

    /// Copy from absolute output index `start`
    ///
    /// Each appended byte is visible to later positions of the same copy,
    /// so a source at or past the current end yields only zeros while any
    /// earlier source is fully readable.
    fn copy_absolute(&mut self, count: usize, start: usize) {
        let len = self.output.len();
        if start >= len {
            self.zero_fill(count);
            return;
        }

        if start + count <= len {
            self.output.extend_from_within(start..start + count);
        } else {
            // overlapping
            self.output.reserve(count);
            for i in start..start + count {
                let byte = self.output[i];
                self.output.push(byte);
            }
        }
        self.stats.copy_bytes += count;
    }

    fn zero_fill(&mut self, count: usize) {
        self.output.resize(self.output.len() + count, 0);
        self.stats.zero_filled_bytes += count;
    }

    fn stop(&mut self, termination: Termination) {
        if termination.is_truncated() {
            log::debug!(
                "LCW stream truncated ({termination:?}) after {} output bytes",
                self.output.len()
            );
        }
        self.stats.termination = termination;
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8]) -> (Vec<u8>, DecompressionStats) {
        Decoder::new(input).finish_with_stats()
    }

    #[test]
    fn test_step_reports_commands() {
        let input = [0x82, 0xAA, 0xBB, 0xFE, 0x02, 0x00, 0x11, 0x80];
        let mut decoder = Decoder::new(&input);

        assert_eq!(decoder.step(), Some(Command::Literal { count: 2 }));
        assert_eq!(decoder.output(), &[0xAA, 0xBB]);
        assert_eq!(
            decoder.step(),
            Some(Command::Fill {
                count: 2,
                value: 0x11
            })
        );
        assert_eq!(decoder.step(), Some(Command::End));
        assert!(decoder.is_finished());
        assert_eq!(decoder.step(), None);
        assert_eq!(decoder.output(), &[0xAA, 0xBB, 0x11, 0x11]);
    }

    #[test]
    fn test_overlapping_relative_copy() {
        // seed 0x05, then short copy count 4 distance 1
        let (output, stats) = decode(&[0x81, 0x05, 0x10, 0x01]);
        assert_eq!(output, vec![0x05; 5]);
        assert_eq!(stats.copy_bytes, 4);
        assert_eq!(stats.zero_filled_bytes, 0);
    }

    #[test]
    fn test_relative_copy_clamps_to_start() {
        // two seed bytes, short copy count 3 distance 0x100
        let (output, stats) = decode(&[0x82, 0x01, 0x02, 0x01, 0x00]);
        assert_eq!(output, vec![0x01, 0x02, 0x01, 0x02, 0x01]);
        assert_eq!(stats.clamped_copies, 1);
    }

    #[test]
    fn test_relative_copy_distance_zero_is_dangling() {
        let (output, stats) = decode(&[0x81, 0x09, 0x00, 0x00]);
        assert_eq!(output, vec![0x09, 0x00, 0x00, 0x00]);
        assert_eq!(stats.zero_filled_bytes, 3);
        assert_eq!(stats.clamped_copies, 0);
    }

    #[test]
    fn test_absolute_copy_past_end_zero_fills() {
        let (output, stats) = decode(&[0x81, 0x07, 0xC0, 0x05, 0x00]);
        assert_eq!(output, vec![0x07, 0x00, 0x00, 0x00]);
        assert_eq!(stats.zero_filled_bytes, 3);
        assert_eq!(stats.copy_bytes, 0);
    }

    #[test]
    fn test_empty_output_copy() {
        let (output, stats) = decode(&[0x20, 0x04]);
        assert_eq!(output, vec![0; 5]);
        assert_eq!(stats.clamped_copies, 1);
        assert_eq!(stats.termination, Termination::Exhausted);
    }

    #[test]
    fn test_literal_truncation_pads_and_stops() {
        let (output, stats) = decode(&[0x84, 0x01, 0x02]);
        assert_eq!(output, vec![0x01, 0x02, 0x00, 0x00]);
        assert_eq!(stats.literal_bytes, 2);
        assert_eq!(stats.zero_filled_bytes, 2);
        assert_eq!(
            stats.termination,
            Termination::Truncated {
                kind: OpcodeKind::Literal,
                position: 0
            }
        );
    }

    #[test]
    fn test_truncated_operand_records_position() {
        let (output, stats) = decode(&[0x81, 0x33, 0xFE, 0x10]);
        assert_eq!(output, vec![0x33]);
        assert_eq!(
            stats.termination,
            Termination::Truncated {
                kind: OpcodeKind::Fill,
                position: 2
            }
        );
        assert_eq!(stats.input_bytes, 3);
        assert_eq!(stats.commands, 1);
    }

    #[test]
    fn test_stats_totals() {
        let input = [0x82, 0x01, 0x02, 0xFE, 0x03, 0x00, 0xEE, 0x00, 0x02, 0x80];
        let (output, stats) = decode(&input);
        assert_eq!(output, vec![0x01, 0x02, 0xEE, 0xEE, 0xEE, 0xEE, 0xEE, 0xEE]);
        assert_eq!(stats.commands, 4);
        assert_eq!(stats.literal_bytes, 2);
        assert_eq!(stats.fill_bytes, 3);
        assert_eq!(stats.copy_bytes, 3);
        assert_eq!(stats.input_bytes, input.len());
        assert_eq!(stats.output_bytes, 8);
        assert_eq!(stats.termination, Termination::EndMarker { position: 9 });
    }

    #[test]
    fn test_with_capacity_does_not_limit() {
        let output = Decoder::with_capacity(&[0xFE, 0x00, 0x01, 0x42], 4).finish();
        assert_eq!(output.len(), 256);
        assert!(output.iter().all(|&b| b == 0x42));
    }
}
