//! Opcode classification and operand decoding
//!
//! Opcode byte layout:
//!
//! ```text
//! 0cccoooo oooooooo     short copy, count = c + 3, distance back from output end
//! 10000000              end of stream
//! 10cccccc              literal, count = c (1..=63) bytes follow
//! 11111110 cccc vv      run of count bytes with value v
//! 11111111 cccc oooo    long copy from absolute output offset
//! 11cccccc oooo         medium copy, count = c + 3, absolute output offset
//! ```
//!
//! `cccc` and `oooo` are little-endian 16-bit operands.

use super::cursor::StreamCursor;
use crate::common::{MIN_COPY_LENGTH, OP_END, OP_FILL, OP_LONG_COPY};

/// Operand-free classification of an opcode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeKind {
    /// `0xxxxxxx`: copy relative to the current output length
    ShortCopy,
    /// `0x80`: stop decoding
    End,
    /// `10xxxxxx` except `0x80`: bytes copied from the input
    Literal,
    /// `0xFE`: repeated fill byte
    Fill,
    /// `0xFF`: copy from an absolute output offset
    LongCopy,
    /// `11xxxxxx` except `0xFE` and `0xFF`: copy from an absolute output offset
    MediumCopy,
}

impl OpcodeKind {
    /// Classify an opcode by its high bits
    pub fn classify(opcode: u8) -> Self {
        match opcode {
            OP_END => OpcodeKind::End,
            OP_FILL => OpcodeKind::Fill,
            OP_LONG_COPY => OpcodeKind::LongCopy,
            op if op & 0x80 == 0 => OpcodeKind::ShortCopy,
            op if op & 0x40 == 0 => OpcodeKind::Literal,
            _ => OpcodeKind::MediumCopy,
        }
    }

    /// Fixed operand bytes following the opcode
    ///
    /// Literal payload is variable-length and not counted here.
    pub fn operand_len(&self) -> usize {
        match self {
            OpcodeKind::ShortCopy => 1,
            OpcodeKind::End | OpcodeKind::Literal => 0,
            OpcodeKind::Fill => 3,
            OpcodeKind::LongCopy => 4,
            OpcodeKind::MediumCopy => 2,
        }
    }
}

/// A decoded command with its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy `count` bytes starting `distance` bytes before the output end
    ShortCopy {
        /// Bytes to copy (3..=10)
        count: usize,
        /// Distance back from the current output length (0..=4095)
        distance: usize,
    },
    /// End of stream
    End,
    /// Copy `count` bytes from the input
    Literal {
        /// Bytes to copy (1..=63)
        count: usize,
    },
    /// Append `value` `count` times
    Fill {
        /// Run length
        count: usize,
        /// Fill byte
        value: u8,
    },
    /// Copy `count` bytes from absolute output index `offset`
    LongCopy {
        /// Bytes to copy
        count: usize,
        /// Absolute output index of the first source byte
        offset: usize,
    },
    /// Copy `count` bytes from absolute output index `offset`
    MediumCopy {
        /// Bytes to copy (3..=64)
        count: usize,
        /// Absolute output index of the first source byte
        offset: usize,
    },
}

impl Command {
    /// Decode the command selected by `opcode`, consuming its operands
    ///
    /// Returns `None` when the operands are cut off by the end of the input.
    /// The cursor is left untouched in that case.
    pub fn read(opcode: u8, cursor: &mut StreamCursor<'_>) -> Option<Self> {
        let command = match OpcodeKind::classify(opcode) {
            OpcodeKind::ShortCopy => {
                let low = cursor.read_u8()? as usize;
                Command::ShortCopy {
                    count: (opcode >> 4) as usize + MIN_COPY_LENGTH,
                    distance: low | (((opcode & 0x0F) as usize) << 8),
                }
            }
            OpcodeKind::End => Command::End,
            OpcodeKind::Literal => Command::Literal {
                count: (opcode & 0x3F) as usize,
            },
            OpcodeKind::Fill => {
                let [lo, hi, value] = cursor.read_array::<3>()?;
                Command::Fill {
                    count: u16::from_le_bytes([lo, hi]) as usize,
                    value,
                }
            }
            OpcodeKind::LongCopy => {
                let [c0, c1, o0, o1] = cursor.read_array::<4>()?;
                Command::LongCopy {
                    count: u16::from_le_bytes([c0, c1]) as usize,
                    offset: u16::from_le_bytes([o0, o1]) as usize,
                }
            }
            OpcodeKind::MediumCopy => Command::MediumCopy {
                count: (opcode & 0x3F) as usize + MIN_COPY_LENGTH,
                offset: cursor.read_u16_le()? as usize,
            },
        };
        Some(command)
    }

    /// Classification of this command
    pub fn kind(&self) -> OpcodeKind {
        match self {
            Command::ShortCopy { .. } => OpcodeKind::ShortCopy,
            Command::End => OpcodeKind::End,
            Command::Literal { .. } => OpcodeKind::Literal,
            Command::Fill { .. } => OpcodeKind::Fill,
            Command::LongCopy { .. } => OpcodeKind::LongCopy,
            Command::MediumCopy { .. } => OpcodeKind::MediumCopy,
        }
    }
}
