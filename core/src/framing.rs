use crate::codec::Endian;
use crate::error::IndexError;

const LEN_SIZE: u64 = 8;

/// Cursor over a length-prefixed key/value stream held fully in memory:
/// 8-byte key length, key bytes, 8-byte value length, value bytes, repeated
/// until the buffer is exhausted. Every declared length is checked against
/// the remaining bytes, so a truncated file surfaces as a `Framing` error
/// instead of an out-of-bounds read.
pub struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> FrameReader<'a> {
    pub fn new(buf: &'a [u8], endian: Endian) -> Self {
        Self { buf, pos: 0, endian }
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8], IndexError> {
        let remaining = self.buf.len() - self.pos;
        if len > remaining as u64 {
            return Err(IndexError::Framing { offset: self.pos, declared: len, remaining });
        }
        let start = self.pos;
        self.pos += len as usize;
        Ok(&self.buf[start..self.pos])
    }

    /// Next (key, value) pair, or `None` once the buffer is exhausted.
    pub fn next_record(&mut self) -> Result<Option<(&'a [u8], &'a [u8])>, IndexError> {
        if self.pos >= self.buf.len() {
            return Ok(None);
        }
        let key_len = self.take(LEN_SIZE).map(|b| self.endian.read_u64(b))?;
        let key = self.take(key_len)?;
        let value_len = self.take(LEN_SIZE).map(|b| self.endian.read_u64(b))?;
        let value = self.take(value_len)?;
        Ok(Some((key, value)))
    }
}
