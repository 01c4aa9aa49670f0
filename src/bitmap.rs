// Bitmap capture decoding

use crate::error::{PdsError, Result};
use crate::field::ByteCursor;

pub const BITMAP_HEADER_SIZE: usize = 54;
pub const BITMAP_WIDTH: usize = 640;
pub const BITMAP_HEIGHT: usize = 480;
pub const BITMAP_PIXEL_SIZE: usize = 3;

pub const ROW_SIZE: usize = BITMAP_WIDTH * BITMAP_PIXEL_SIZE;
pub const IMAGE_SIZE: usize = ROW_SIZE * BITMAP_HEIGHT;

/// A screen capture, rows top to bottom, pixels in the device's
/// blue-green-red byte order.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        BITMAP_WIDTH as u32
    }

    pub fn height(&self) -> u32 {
        BITMAP_HEIGHT as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Row `y`, counted from the top.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= BITMAP_HEIGHT {
            return None;
        }
        Some(&self.pixels[y * ROW_SIZE..(y + 1) * ROW_SIZE])
    }

    /// Blue, green and red components of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= BITMAP_WIDTH {
            return None;
        }
        let row = self.row(y)?;
        let p = x * BITMAP_PIXEL_SIZE;
        Some([row[p], row[p + 1], row[p + 2]])
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Bitmap({}x{}, {} bytes)", BITMAP_WIDTH, BITMAP_HEIGHT, self.pixels.len())
    }
}

/// Decode the raster following the 54 byte header, flipping the device's
/// bottom-up row order. Only the first `length` bytes of `buf` are looked at.
pub fn decode_bitmap(buf: &[u8], length: usize) -> Result<Bitmap> {
    let data = buf.get(..length).ok_or(PdsError::Truncated {
        offset: 0,
        needed: length,
        available: buf.len(),
    })?;

    let mut cursor = ByteCursor::new(data);
    cursor.skip(BITMAP_HEADER_SIZE)?;
    let image = cursor.bytes(IMAGE_SIZE)?;
    if !cursor.is_at_end() {
        log::debug!("bitmap: ignoring {} trailing bytes", cursor.remaining());
    }

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(IMAGE_SIZE)?;
    for src_row in image.chunks_exact(ROW_SIZE).rev() {
        pixels.extend_from_slice(src_row);
    }

    log::debug!("bitmap: decoded {}x{} image", BITMAP_WIDTH, BITMAP_HEIGHT);
    Ok(Bitmap { pixels })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Bitmap payload whose source row `r` is filled with byte `r % 251`.
    pub fn create_bitmap() -> Vec<u8> {
        let mut buf = vec![0u8; BITMAP_HEADER_SIZE];
        buf[..2].copy_from_slice(b"BM");
        buf[2..6].copy_from_slice(&((BITMAP_HEADER_SIZE + IMAGE_SIZE) as u32).to_le_bytes());
        for r in 0..BITMAP_HEIGHT {
            buf.extend(std::iter::repeat((r % 251) as u8).take(ROW_SIZE));
        }
        buf
    }

    #[test]
    fn test_vertical_flip() {
        let mut buf = create_bitmap();
        // Marker in the first source row
        buf[BITMAP_HEADER_SIZE..BITMAP_HEADER_SIZE + 3].copy_from_slice(&[0xde, 0xad, 0xbe]);

        let bitmap = decode_bitmap(&buf, buf.len()).unwrap();
        assert_eq!(bitmap.as_bytes().len(), IMAGE_SIZE);
        assert_eq!(bitmap.pixel(0, BITMAP_HEIGHT - 1), Some([0xde, 0xad, 0xbe]));
        assert_eq!(bitmap.pixel(1, BITMAP_HEIGHT - 1), Some([0, 0, 0]));

        for y in 0..BITMAP_HEIGHT - 1 {
            let expected = ((BITMAP_HEIGHT - 1 - y) % 251) as u8;
            assert!(bitmap.row(y).unwrap().iter().all(|&b| b == expected), "row {}", y);
        }
    }

    #[test]
    fn test_out_of_range_access() {
        let buf = create_bitmap();
        let bitmap = decode_bitmap(&buf, buf.len()).unwrap();
        assert!(bitmap.row(BITMAP_HEIGHT).is_none());
        assert!(bitmap.pixel(BITMAP_WIDTH, 0).is_none());
        assert_eq!(bitmap.width(), 640);
        assert_eq!(bitmap.height(), 480);
    }

    #[test]
    fn test_truncated() {
        let buf = create_bitmap();
        let result = decode_bitmap(&buf, buf.len() - 1);
        assert!(matches!(result, Err(PdsError::Truncated { .. })));

        let result = decode_bitmap(&buf[..100], 100);
        assert!(matches!(result, Err(PdsError::Truncated { .. })));

        let result = decode_bitmap(&buf, buf.len() + 1);
        assert!(matches!(result, Err(PdsError::Truncated { .. })));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut buf = create_bitmap();
        buf.extend_from_slice(&[1, 2, 3, 4]);
        let bitmap = decode_bitmap(&buf, buf.len()).unwrap();
        assert_eq!(bitmap.into_bytes().len(), IMAGE_SIZE);
    }
}
