// Decoded capture and format dispatch

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::bitmap::{decode_bitmap, Bitmap};
use crate::error::{PdsError, Result};
use crate::export;
use crate::sniff::{sniff, CaptureKind, Variant};
use crate::waveform::{decode_waveform, Channel};

pub const SCOPE_NAME_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Waveform { variant: Variant, channels: Vec<Channel> },
    Bitmap(Bitmap),
}

/// The result of one device read.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    /// Leading bytes of the payload, e.g. `SPBV01`.
    pub name: [u8; SCOPE_NAME_LEN],
    /// Declared payload length in bytes.
    pub length: usize,
    pub payload: Payload,
}

impl Capture {
    /// Decode a complete payload, such as a capture file saved by the scope.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with_length(buf, buf.len())
    }

    /// Decode the first `length` bytes of `buf`.
    pub fn decode_with_length(buf: &[u8], length: usize) -> Result<Self> {
        if length > buf.len() {
            return Err(PdsError::Truncated {
                offset: 0,
                needed: length,
                available: buf.len(),
            });
        }
        let data = &buf[..length];

        let mut name = [0u8; SCOPE_NAME_LEN];
        let n = data.len().min(SCOPE_NAME_LEN);
        name[..n].copy_from_slice(&data[..n]);

        let payload = match sniff(data)? {
            CaptureKind::Waveform(variant) => Payload::Waveform {
                variant,
                channels: decode_waveform(data, length, variant)?,
            },
            CaptureKind::Bitmap => Payload::Bitmap(decode_bitmap(data, length)?),
        };

        Ok(Capture { name, length, payload })
    }

    pub fn name_str(&self) -> Cow<'_, str> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end])
    }

    pub fn is_waveform(&self) -> bool {
        matches!(self.payload, Payload::Waveform { .. })
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.payload, Payload::Bitmap(_))
    }

    /// Decoded channels, empty for a bitmap capture.
    pub fn channels(&self) -> &[Channel] {
        match &self.payload {
            Payload::Waveform { channels, .. } => channels,
            Payload::Bitmap(_) => &[],
        }
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels().get(index)
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.payload {
            Payload::Bitmap(bitmap) => Some(bitmap),
            Payload::Waveform { .. } => None,
        }
    }

    /// Write the channels of a waveform capture as CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, output_file: P, verbose: bool) -> Result<()> {
        if !self.is_waveform() {
            return Err(PdsError::WrongCaptureKind("waveform"));
        }
        let file = File::create(output_file)?;
        let mut writer = BufWriter::new(file);
        export::write_csv(self, &mut writer, verbose)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a bitmap capture as PNG.
    pub fn write_png<P: AsRef<Path>>(&self, output_file: P) -> Result<()> {
        let bitmap = self.bitmap().ok_or(PdsError::WrongCaptureKind("bitmap"))?;
        let file = File::create(output_file)?;
        let mut writer = BufWriter::new(file);
        export::write_png(bitmap, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
