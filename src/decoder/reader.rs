//! Fixed-width field reader over a message body
//!
//! Every read names the field it is reading so a short payload reports
//! exactly which field ran out of bytes.

use super::error::{DecodeError, DecodeResult};
use byteorder::{BigEndian, ByteOrder};

pub struct PayloadReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> DecodeResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::TruncatedPayload { field })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, field: &'static str) -> DecodeResult<u8> {
        Ok(self.read_bytes(1, field)?[0])
    }

    pub fn read_bool(&mut self, field: &'static str) -> DecodeResult<bool> {
        Ok(self.read_u8(field)? != 0)
    }

    pub fn read_u16(&mut self, field: &'static str) -> DecodeResult<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2, field)?))
    }

    pub fn read_u32(&mut self, field: &'static str) -> DecodeResult<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4, field)?))
    }

    pub fn read_u64(&mut self, field: &'static str) -> DecodeResult<u64> {
        Ok(BigEndian::read_u64(self.read_bytes(8, field)?))
    }

    /// Peek at the next byte without consuming it
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consume and return everything left
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }
}
