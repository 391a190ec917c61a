//! Forward-only cursor over compressed input

/// Read position into a borrowed input buffer
///
/// The position only moves forward and never passes the end of the input.
/// Fixed-size reads are all-or-nothing: a read that does not fit leaves the
/// position untouched.
#[derive(Debug, Clone)]
pub struct StreamCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StreamCursor<'a> {
    /// Create a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the input
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every input byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Read exactly `N` bytes, or nothing if fewer remain
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes: [u8; N] = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    /// Read a little-endian 16-bit value
    pub fn read_u16_le(&mut self) -> Option<u16> {
        self.read_array::<2>().map(u16::from_le_bytes)
    }

    /// Take up to `count` bytes, stopping early at the end of the input
    pub fn take(&mut self, count: usize) -> &'a [u8] {
        let end = self.pos + count.min(self.remaining());
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        bytes
    }
}
