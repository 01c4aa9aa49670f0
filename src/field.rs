// Little-endian field extraction and a bounds-checked cursor

use crate::error::{PdsError, Result};

/// Read an unsigned little-endian integer of `width` bytes (1 to 4), zero extended.
///
/// Panics if `width` is not in `1..=4` or the field runs past the end of `buf`;
/// use [`ByteCursor`] when the buffer comes from the wire.
pub fn read_u32le(buf: &[u8], offset: usize, width: usize) -> u32 {
    assert!((1..=4).contains(&width), "invalid field width {width}");
    let mut bytes = [0u8; 4];
    bytes[..width].copy_from_slice(&buf[offset..offset + width]);
    u32::from_le_bytes(bytes)
}

/// Read a signed little-endian integer of `width` bytes (1 to 4), sign extended.
///
/// Same preconditions as [`read_u32le`].
pub fn read_i32le(buf: &[u8], offset: usize, width: usize) -> i32 {
    let raw = read_u32le(buf, offset, width);
    let shift = 32 - 8 * width as u32;
    ((raw << shift) as i32) >> shift
}

/// Position within a byte buffer where every read is checked against the
/// buffer length before any bytes are touched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        ByteCursor { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Fail unless `needed` bytes are available `rel` bytes past the cursor.
    fn check(&self, rel: usize, needed: usize) -> Result<usize> {
        let start = self.pos.checked_add(rel);
        match start.and_then(|s| s.checked_add(needed)) {
            Some(end) if end <= self.buf.len() => Ok(self.pos + rel),
            _ => Err(PdsError::Truncated {
                offset: start.unwrap_or(usize::MAX),
                needed,
                available: self.buf.len().saturating_sub(start.unwrap_or(usize::MAX)),
            }),
        }
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(PdsError::Truncated {
                offset: pos,
                needed: 0,
                available: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        let start = self.check(0, n)?;
        self.pos = start + n;
        Ok(())
    }

    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let start = self.check(0, n)?;
        self.pos = start + n;
        Ok(&self.buf[start..start + n])
    }

    /// Borrow `n` bytes at `rel` past the cursor without moving it.
    pub fn peek_bytes(&self, rel: usize, n: usize) -> Result<&'a [u8]> {
        let start = self.check(rel, n)?;
        Ok(&self.buf[start..start + n])
    }

    pub fn peek_u32(&self, rel: usize, width: usize) -> Result<u32> {
        let start = self.check(rel, width)?;
        Ok(read_u32le(self.buf, start, width))
    }

    pub fn peek_i32(&self, rel: usize, width: usize) -> Result<i32> {
        let start = self.check(rel, width)?;
        Ok(read_i32le(self.buf, start, width))
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    pub fn i16(&mut self) -> Result<i16> {
        let b = self.bytes(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32> {
        let v = self.peek_u32(0, 4)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn i32(&mut self) -> Result<i32> {
        let v = self.peek_i32(0, 4)?;
        self.pos += 4;
        Ok(v)
    }
}
