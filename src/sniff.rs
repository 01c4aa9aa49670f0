// Capture format detection

use crate::error::{PdsError, Result};

pub const WAVEFORM_TAG: &[u8; 3] = b"SPB";
pub const BITMAP_TAG: &[u8; 2] = b"BM";

/// Offset of the byte that selects the waveform variant.
pub const VARIANT_OFFSET: usize = 3;

/// Firmware variant of a waveform capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    V,
    W,
    X,
}

impl Variant {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            b'V' => Ok(Variant::V),
            b'W' => Ok(Variant::W),
            b'X' => Ok(Variant::X),
            other => Err(PdsError::UnknownVariant(other)),
        }
    }

    /// W and X firmware report sensitivities slightly high.
    pub fn corrects_sensitivity(self) -> bool {
        matches!(self, Variant::W | Variant::X)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Waveform(Variant),
    Bitmap,
}

/// Classify a payload by its leading bytes.
pub fn sniff(buf: &[u8]) -> Result<CaptureKind> {
    if buf.starts_with(WAVEFORM_TAG) {
        let variant = buf.get(VARIANT_OFFSET).copied().ok_or(PdsError::Truncated {
            offset: VARIANT_OFFSET,
            needed: 1,
            available: 0,
        })?;
        return Ok(CaptureKind::Waveform(Variant::from_byte(variant)?));
    }
    if buf.starts_with(BITMAP_TAG) {
        return Ok(CaptureKind::Bitmap);
    }

    let mut tag = [0u8; 3];
    let n = buf.len().min(tag.len());
    tag[..n].copy_from_slice(&buf[..n]);
    Err(PdsError::UnknownTag(tag))
}
